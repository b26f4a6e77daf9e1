//! Headless tick loop.
//!
//! Each tick the targeting policy gets one chance to fire, then the world
//! advances by `DT`. With pacing on, ticks are spread over wall-clock time
//! at `TICK_RATE`.

use std::time::{Duration, Instant};

use log::info;
use serde::Serialize;

use meteor_core::config::MeteorConfig;
use meteor_core::constants::{DT, TICK_RATE};
use meteor_core::enums::{BodyKind, UpdateScope};
use meteor_core::error::MeteorError;
use meteor_core::events::WorldEvent;
use meteor_core::state::WorldSnapshot;
use meteor_core::BodyId;
use meteor_sim::scenario;
use meteor_sim::{TargetingPolicy, TickReport, World};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub shots: u64,
    pub impacts: u64,
    pub asteroids_left: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "seed {}: {} ticks ({:.2} s), {} shots, {} impacts, {} asteroids left",
            self.seed,
            self.ticks,
            self.elapsed_secs,
            self.shots,
            self.impacts,
            self.asteroids_left
        )
    }
}

pub struct Runner {
    world: World,
    ship: BodyId,
    policy: TargetingPolicy,
    scope: UpdateScope,
    summary: RunSummary,
}

impl Runner {
    /// Build and populate a world from `config`.
    pub fn new(config: &MeteorConfig, scope: UpdateScope) -> Result<Self, MeteorError> {
        config.validate()?;
        let mut world = World::new(&config.arena)?;
        let ship = scenario::populate(&mut world, &config.scenario)?;
        world.drain_events();
        Ok(Self {
            world,
            ship,
            policy: TargetingPolicy::new(&config.targeting),
            scope,
            summary: RunSummary {
                seed: config.scenario.seed,
                ..Default::default()
            },
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ship(&self) -> BodyId {
        self.ship
    }

    /// Engage, then advance one tick.
    pub fn step(&mut self) -> Result<TickReport, MeteorError> {
        if self.world.contains(self.ship) {
            self.policy.engage(&mut self.world, self.ship)?;
        }
        let report = self.world.update_scoped(DT, self.scope)?;

        for event in self.world.drain_events() {
            match event {
                WorldEvent::ShotFired { .. } => self.summary.shots += 1,
                WorldEvent::Impact { .. } => self.summary.impacts += 1,
                WorldEvent::BodyAdded { .. } | WorldEvent::BodyRemoved { .. } => {}
            }
        }
        self.summary.ticks += 1;
        Ok(report)
    }

    /// Run `ticks` ticks, sleeping between them when `realtime` is set.
    pub fn run(&mut self, ticks: u64, realtime: bool) -> Result<RunSummary, MeteorError> {
        let mut next_tick_time = Instant::now();
        for _ in 0..ticks {
            self.step()?;

            if realtime {
                next_tick_time += TICK_DURATION;
                let now = Instant::now();
                if next_tick_time > now {
                    std::thread::sleep(next_tick_time - now);
                } else if now - next_tick_time > TICK_DURATION * 2 {
                    // Too far behind; drop the backlog instead of catching up.
                    next_tick_time = now;
                }
            }
        }

        let summary = self.summary();
        info!("{summary}");
        Ok(summary)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            elapsed_secs: self.world.time().elapsed_secs,
            asteroids_left: self.world.count_of(BodyKind::Asteroid),
            ..self.summary.clone()
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }
}
