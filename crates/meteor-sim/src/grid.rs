//! Uniform spatial hash over the X/Z plane.
//!
//! Each item lives in exactly one bucket, keyed by the cell its position
//! falls in. The Y axis is not part of the key: bodies stacked vertically
//! share a bucket, which is fine for a field that is mostly planar but
//! degrades to a linear scan per column for fully 3-D scatter.
//!
//! The grid knows nothing about physics. Queries take a `bounds` callback
//! so the caller decides what box each item currently occupies.

use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use meteor_core::config::ArenaConfig;
use meteor_core::error::MeteorError;
use meteor_core::types::{Aabb, Vec3};

/// Folded cell coordinate: `row * row_stride + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(pub i64);

#[derive(Debug, Clone)]
pub struct Grid<T> {
    cell_size: f64,
    row_stride: i64,
    /// Cells whose keys collide (column span beyond the row stride) share a
    /// bucket; queries filter by item bounds, so that only costs speed.
    buckets: HashMap<CellKey, Vec<T>>,
    /// Reverse index, so removal never depends on a position that may have
    /// changed since insertion.
    locations: HashMap<T, CellKey>,
}

impl<T: Copy + Eq + Hash> Grid<T> {
    /// Create an empty grid. Non-positive cell size or row stride is a
    /// setup error.
    pub fn new(cell_size: f64, row_stride: i64) -> Result<Self, MeteorError> {
        ArenaConfig {
            cell_size,
            row_stride,
            ..Default::default()
        }
        .validate()?;
        Ok(Self {
            cell_size,
            row_stride,
            buckets: HashMap::new(),
            locations: HashMap::new(),
        })
    }

    pub fn from_config(config: &ArenaConfig) -> Result<Self, MeteorError> {
        Self::new(config.cell_size, config.row_stride)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// `(col, row)` of the cell containing `position`.
    #[inline]
    pub fn cell_coords(&self, position: Vec3) -> (i64, i64) {
        (
            (position.x / self.cell_size).floor() as i64,
            (position.z / self.cell_size).floor() as i64,
        )
    }

    #[inline]
    pub fn key_of_cell(&self, col: i64, row: i64) -> CellKey {
        CellKey(row.wrapping_mul(self.row_stride).wrapping_add(col))
    }

    /// Key for a position. Pure: the same position always yields the same key.
    #[inline]
    pub fn key(&self, position: Vec3) -> CellKey {
        let (col, row) = self.cell_coords(position);
        self.key_of_cell(col, row)
    }

    /// Place `item` in the bucket for `position`. An item already in the grid
    /// is moved rather than duplicated.
    pub fn insert(&mut self, item: T, position: Vec3) -> CellKey {
        let key = self.key(position);
        if let Some(old) = self.locations.get(&item).copied() {
            if old == key {
                return key;
            }
            self.detach(item, old);
        }
        self.attach(item, key);
        key
    }

    /// Remove `item` from its bucket. Returns false if it was not present.
    pub fn remove(&mut self, item: T) -> bool {
        match self.locations.get(&item).copied() {
            Some(key) => {
                self.detach(item, key);
                true
            }
            None => false,
        }
    }

    /// Move `item` from `old_key` to the bucket for `new_position` when the
    /// key changed. Does nothing if `item` is not registered under `old_key`.
    pub fn rekey(&mut self, item: T, old_key: CellKey, new_position: Vec3) -> bool {
        let new_key = self.key(new_position);
        if old_key == new_key || self.locations.get(&item) != Some(&old_key) {
            return false;
        }
        self.detach(item, old_key);
        self.attach(item, new_key);
        trace!("rekey {:?} -> {:?}", old_key, new_key);
        true
    }

    /// Append every item whose box overlaps `region`.
    ///
    /// Visits cells one beyond the region on each side in X and Z, so an item
    /// sitting just across a cell boundary from the region is still found.
    /// Items for which `bounds` returns `None` are skipped.
    pub fn query<F>(&self, region: &Aabb, bounds: F, out: &mut Vec<T>)
    where
        F: Fn(T) -> Option<Aabb>,
    {
        if !region.is_finite() || self.buckets.is_empty() {
            return;
        }
        let (min_col, min_row) = self.cell_coords(region.min);
        let (max_col, max_row) = self.cell_coords(region.max);
        let (min_col, min_row) = (min_col.saturating_sub(1), min_row.saturating_sub(1));
        let (max_col, max_row) = (max_col.saturating_add(1), max_row.saturating_add(1));

        let mut push_matches = |bucket: &Vec<T>| {
            for &item in bucket {
                if bounds(item).is_some_and(|b| b.intersects(region)) {
                    out.push(item);
                }
            }
        };

        let cols = max_col.abs_diff(min_col) as u128 + 1;
        let rows = max_row.abs_diff(min_row) as u128 + 1;
        let span = cols * rows;
        if span > self.buckets.len() as u128 {
            // Wide region: scanning occupied buckets is cheaper than probing cells.
            self.buckets.values().for_each(&mut push_matches);
        } else {
            for row in min_row..=max_row {
                for col in min_col..=max_col {
                    if let Some(bucket) = self.buckets.get(&self.key_of_cell(col, row)) {
                        push_matches(bucket);
                    }
                }
            }
        }
    }

    pub fn contains(&self, item: T) -> bool {
        self.locations.contains_key(&item)
    }

    /// Key of the bucket currently holding `item`.
    pub fn key_of(&self, item: T) -> Option<CellKey> {
        self.locations.get(&item).copied()
    }

    /// Items in the bucket for `key` (empty if there is none).
    pub fn bucket(&self, key: CellKey) -> &[T] {
        self.buckets
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of items in the grid.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.locations.clear();
    }

    fn attach(&mut self, item: T, key: CellKey) {
        self.buckets.entry(key).or_default().push(item);
        self.locations.insert(item, key);
    }

    fn detach(&mut self, item: T, key: CellKey) {
        if let Some(bucket) = self.buckets.get_mut(&key) {
            if let Some(pos) = bucket.iter().position(|&i| i == item) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.buckets.remove(&key);
            }
        }
        self.locations.remove(&item);
    }
}
