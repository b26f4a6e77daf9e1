//! The world: body storage, the grid index, the clock and the tick driver.
//!
//! `World` owns every body behind a generational handle and keeps the grid
//! in sync with body positions. Bodies that ask for updates are tracked in
//! insertion order and driven through two passes per tick:
//!
//! 1. advance: integrate, then re-key in the grid if the cell changed
//! 2. finalize: react to the post-advance state of every other body, then
//!    re-key again in case the body moved itself
//!
//! Both passes walk a snapshot of the tracked list taken at the start of the
//! tick. Callbacks cannot touch the world directly; spawns, removals and
//! events go through `TickContext` and are applied after the finalize pass.

use log::{debug, trace, warn};

use meteor_core::config::ArenaConfig;
use meteor_core::enums::{BodyKind, UpdateScope};
use meteor_core::error::MeteorError;
use meteor_core::events::WorldEvent;
use meteor_core::handle::BodyAllocator;
use meteor_core::state::{BodySnapshot, WorldSnapshot};
use meteor_core::{Aabb, BodyId, SimTime, Vec3};

use crate::body::Body;
use crate::grid::Grid;

/// Mutation requested from inside a body callback.
enum Command {
    Spawn(Box<dyn Body>),
    Remove(BodyId),
    Event(WorldEvent),
}

/// What one update call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: usize,
    pub finalized: usize,
    /// Grid cell changes caused by either pass.
    pub rekeyed: usize,
    pub spawned: usize,
    pub removed: usize,
}

/// Handle given to body callbacks.
///
/// Reads see the world as it stands mid-pass, minus the calling body.
/// Writes are queued and applied once both passes have finished.
pub struct TickContext<'w> {
    world: &'w World,
    id: BodyId,
    commands: &'w mut Vec<Command>,
}

impl<'w> TickContext<'w> {
    /// Handle of the body whose callback is running.
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn world(&self) -> &'w World {
        self.world
    }

    pub fn time(&self) -> SimTime {
        self.world.time
    }

    pub fn body(&self, id: BodyId) -> Option<&'w dyn Body> {
        self.world.body(id)
    }

    /// Grid query that leaves the remembered update region alone.
    pub fn query(&self, region: &Aabb, out: &mut Vec<BodyId>) {
        self.world.query_region(region, out);
    }

    pub fn spawn(&mut self, body: Box<dyn Body>) {
        self.commands.push(Command::Spawn(body));
    }

    pub fn remove(&mut self, id: BodyId) {
        self.commands.push(Command::Remove(id));
    }

    pub fn remove_self(&mut self) {
        self.remove(self.id);
    }

    pub fn emit(&mut self, event: WorldEvent) {
        self.commands.push(Command::Event(event));
    }

    /// True if some callback this tick already asked for `id` to go.
    pub fn is_removal_pending(&self, id: BodyId) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, Command::Remove(pending) if *pending == id))
    }
}

pub struct World {
    arena: ArenaConfig,
    grid: Grid<BodyId>,
    slots: Vec<Option<Box<dyn Body>>>,
    allocator: BodyAllocator,
    /// Bodies that asked for updates, in insertion order.
    tracked: Vec<BodyId>,
    time: SimTime,
    /// Last region passed to `query` centered on the reference plane.
    last_query: Option<Aabb>,
    events: Vec<WorldEvent>,
    /// Reused per-tick copy of `tracked`.
    pass: Vec<BodyId>,
}

impl World {
    pub fn new(arena: &ArenaConfig) -> Result<Self, MeteorError> {
        Ok(Self {
            arena: arena.clone(),
            grid: Grid::from_config(arena)?,
            slots: Vec::new(),
            allocator: BodyAllocator::new(),
            tracked: Vec::new(),
            time: SimTime::default(),
            last_query: None,
            events: Vec::new(),
            pass: Vec::new(),
        })
    }

    pub fn arena(&self) -> &ArenaConfig {
        &self.arena
    }

    /// Register a body and return its handle.
    ///
    /// Bodies with a non-finite position are rejected before they get a
    /// handle, since they would land in an arbitrary bucket.
    pub fn add(&mut self, mut body: Box<dyn Body>) -> Result<BodyId, MeteorError> {
        let position = body.position();
        if !position.is_finite() {
            warn!("rejecting {:?} at non-finite position {position}", body.kind());
            return Err(MeteorError::RejectedBody);
        }

        let id = self.allocator.allocate();
        let slot = id.slot();
        if slot >= self.slots.len() {
            self.slots.resize_with(slot + 1, || None);
        }

        body.on_added(id);
        self.grid.insert(id, position);
        if body.needs_update() {
            self.tracked.push(id);
        }
        let kind = body.kind();
        self.slots[slot] = Some(body);
        self.events.push(WorldEvent::BodyAdded { id, kind });
        debug!("added {kind:?} {id} at {position}");
        Ok(id)
    }

    /// Deregister a body and hand it back. Unknown or stale handles are a
    /// no-op.
    pub fn remove(&mut self, id: BodyId) -> Option<Box<dyn Body>> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        let mut body = self.slots.get_mut(id.slot())?.take()?;
        self.allocator.deallocate(id);
        self.grid.remove(id);
        if let Some(index) = self.tracked.iter().position(|&t| t == id) {
            self.tracked.remove(index);
        }

        body.on_removed();
        let kind = body.kind();
        self.events.push(WorldEvent::BodyRemoved { id, kind });
        debug!("removed {kind:?} {id}");
        Some(body)
    }

    /// Drop every body and reset the clock. Bodies are not notified.
    /// Handles issued before the clear stay stale.
    pub fn clear(&mut self) {
        self.time.reset();
        self.grid.clear();
        self.slots.clear();
        self.allocator.reset();
        self.tracked.clear();
        self.last_query = None;
        self.events.clear();
        debug!("world cleared");
    }

    /// Primary query. Appends every body whose box overlaps `region`, and
    /// remembers `region` as the default update scope when it is centered
    /// on the reference plane.
    pub fn query(&mut self, region: &Aabb, out: &mut Vec<BodyId>) {
        self.query_region(region, out);
        if region.center().y == self.arena.reference_plane_y {
            self.last_query = Some(*region);
        }
    }

    /// Query without side effects.
    pub fn query_region(&self, region: &Aabb, out: &mut Vec<BodyId>) {
        self.grid
            .query(region, |id| self.body(id).map(|b| b.bounding_box()), out);
    }

    /// Advance one tick over the remembered query region.
    pub fn update(&mut self, dt: f64) -> Result<TickReport, MeteorError> {
        self.update_scoped(dt, UpdateScope::LastQuery)
    }

    /// Advance one tick over the bodies selected by `scope`.
    ///
    /// A negative or non-finite `dt` is rejected before anything changes.
    ///
    /// A body whose position turns non-finite in either pass is evicted from
    /// the world without being re-keyed, and the tick runs to completion for
    /// everyone else. The error names the first evicted body; the next
    /// update proceeds normally.
    pub fn update_scoped(
        &mut self,
        dt: f64,
        scope: UpdateScope,
    ) -> Result<TickReport, MeteorError> {
        if !(dt.is_finite() && dt >= 0.0) {
            warn!("rejecting time step {dt}");
            return Err(MeteorError::InvalidDelta(dt));
        }
        self.time.advance(dt);

        let region = match scope {
            UpdateScope::LastQuery => self.last_query,
            UpdateScope::Region(region) => Some(region),
            UpdateScope::All => None,
        };

        let mut pass = std::mem::take(&mut self.pass);
        pass.clear();
        pass.extend_from_slice(&self.tracked);

        let mut commands = Vec::new();
        let mut faulted = Vec::new();
        let mut report = TickReport::default();
        self.advance_pass(&pass, region.as_ref(), dt, &mut commands, &mut faulted, &mut report);
        self.evict(&faulted, &mut report);
        let evicted = faulted.len();
        self.finalize_pass(&pass, region.as_ref(), &mut commands, &mut faulted, &mut report);
        self.evict(&faulted[evicted..], &mut report);
        self.pass = pass;

        self.apply(commands, &mut report);
        trace!("tick {} {:?}", self.time.tick, report);
        match faulted.first() {
            Some(&id) => Err(MeteorError::NonFinitePosition { id }),
            None => Ok(report),
        }
    }

    fn advance_pass(
        &mut self,
        pass: &[BodyId],
        region: Option<&Aabb>,
        dt: f64,
        commands: &mut Vec<Command>,
        faulted: &mut Vec<BodyId>,
        report: &mut TickReport,
    ) {
        for &id in pass {
            let Some(mut body) = self.detach_in_scope(id, region) else {
                continue;
            };
            body.advance(
                dt,
                &mut TickContext {
                    world: &*self,
                    id,
                    commands: &mut *commands,
                },
            );
            let position = body.position();
            self.slots[id.slot()] = Some(body);
            self.settle(id, position, faulted, report);
            report.advanced += 1;
        }
    }

    fn finalize_pass(
        &mut self,
        pass: &[BodyId],
        region: Option<&Aabb>,
        commands: &mut Vec<Command>,
        faulted: &mut Vec<BodyId>,
        report: &mut TickReport,
    ) {
        for &id in pass {
            let Some(mut body) = self.detach_in_scope(id, region) else {
                continue;
            };
            body.finalize(&mut TickContext {
                world: &*self,
                id,
                commands: &mut *commands,
            });
            let position = body.position();
            self.slots[id.slot()] = Some(body);
            self.settle(id, position, faulted, report);
            report.finalized += 1;
        }
    }

    /// Bring the grid in line with a body's position after a callback.
    ///
    /// The old key comes from the grid's own record, not from the body, so a
    /// body that drifted out of its bucket is always moved back into sync.
    fn settle(
        &mut self,
        id: BodyId,
        position: Vec3,
        faulted: &mut Vec<BodyId>,
        report: &mut TickReport,
    ) {
        if !position.is_finite() {
            faulted.push(id);
            return;
        }
        let moved = match self.grid.key_of(id) {
            Some(old_key) => self.grid.rekey(id, old_key, position),
            None => {
                self.grid.insert(id, position);
                true
            }
        };
        if moved {
            report.rekeyed += 1;
        }
    }

    fn evict(&mut self, ids: &[BodyId], report: &mut TickReport) {
        for &id in ids {
            warn!("evicting {id}: non-finite position");
            if self.remove(id).is_some() {
                report.removed += 1;
            }
        }
    }

    /// Take a body out of its slot if it is live and overlaps `region`
    /// (any body when `region` is `None`).
    fn detach_in_scope(&mut self, id: BodyId, region: Option<&Aabb>) -> Option<Box<dyn Body>> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        let slot = self.slots.get_mut(id.slot())?;
        let in_scope = match (slot.as_deref(), region) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(body), Some(region)) => body.bounding_box().intersects(region),
        };
        if in_scope {
            slot.take()
        } else {
            None
        }
    }

    fn apply(&mut self, commands: Vec<Command>, report: &mut TickReport) {
        for command in commands {
            match command {
                Command::Spawn(body) => match self.add(body) {
                    Ok(_) => report.spawned += 1,
                    Err(err) => warn!("dropping spawn: {err}"),
                },
                Command::Remove(id) => {
                    if self.remove(id).is_some() {
                        report.removed += 1;
                    }
                }
                Command::Event(event) => self.events.push(event),
            }
        }
    }

    /// Record an event raised outside a body callback.
    pub fn emit(&mut self, event: WorldEvent) {
        self.events.push(event);
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn body(&self, id: BodyId) -> Option<&dyn Body> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.slots.get(id.slot())?.as_deref()
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut (dyn Body + 'static)> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.slots.get_mut(id.slot())?.as_deref_mut()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.body(id).is_some()
    }

    /// Live bodies in handle-index order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &dyn Body)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let body = slot.as_deref()?;
            let generation = self.allocator.generation_of(index as u32)?;
            Some((BodyId::new(index as u32, generation), body))
        })
    }

    pub fn count_of(&self, kind: BodyKind) -> usize {
        self.iter().filter(|(_, b)| b.kind() == kind).count()
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_tracked(&self, id: BodyId) -> bool {
        self.tracked.contains(&id)
    }

    pub fn last_query(&self) -> Option<Aabb> {
        self.last_query
    }

    pub fn grid(&self) -> &Grid<BodyId> {
        &self.grid
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            time: self.time,
            bodies: self
                .iter()
                .map(|(id, body)| BodySnapshot {
                    id,
                    kind: body.kind(),
                    position: body.position(),
                    velocity: body.velocity(),
                    radius: body.bounding_radius(),
                    tracked: self.is_tracked(id),
                })
                .collect(),
            bucket_count: self.grid.bucket_count(),
        }
    }
}
