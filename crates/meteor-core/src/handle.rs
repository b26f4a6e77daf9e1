//! Generational body handles.
//!
//! A `BodyId` stays valid until its body is removed. Slots are recycled, but
//! the generation is bumped on every release, so a stale handle never
//! refers to the body that later reuses its slot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId {
    pub index: u32,
    pub generation: u32,
}

impl BodyId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn slot(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "B{}g{}", self.index, self.generation)
    }
}

#[derive(Debug, Default)]
pub struct BodyAllocator {
    generations: Vec<u32>,
    live: Vec<bool>,
    free_indices: Vec<u32>,
}

impl BodyAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> BodyId {
        if let Some(index) = self.free_indices.pop() {
            self.live[index as usize] = true;
            BodyId::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.live.push(true);
            BodyId::new(index, 0)
        }
    }

    /// Release a handle. Returns false (and does nothing) for stale or
    /// unknown handles.
    pub fn deallocate(&mut self, id: BodyId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let slot = id.slot();
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.live[slot] = false;
        self.free_indices.push(id.index);
        true
    }

    pub fn is_alive(&self, id: BodyId) -> bool {
        let slot = id.slot();
        slot < self.generations.len() && self.live[slot] && self.generations[slot] == id.generation
    }

    /// Current generation of a live slot (used to rebuild handles from slot
    /// indices).
    pub fn generation_of(&self, index: u32) -> Option<u32> {
        let slot = index as usize;
        if slot < self.live.len() && self.live[slot] {
            Some(self.generations[slot])
        } else {
            None
        }
    }

    /// Number of slots ever handed out (live or free).
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }

    /// Forget every handle. Generations survive so handles issued before the
    /// reset stay stale afterwards.
    pub fn reset(&mut self) {
        self.free_indices.clear();
        for (index, live) in self.live.iter_mut().enumerate().rev() {
            if *live {
                self.generations[index] = self.generations[index].wrapping_add(1);
                *live = false;
            }
            self.free_indices.push(index as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_and_deallocate() {
        let mut alloc = BodyAllocator::new();
        let b0 = alloc.allocate();
        assert_eq!(b0.index, 0);
        assert_eq!(b0.generation, 0);
        assert!(alloc.is_alive(b0));

        assert!(alloc.deallocate(b0));
        assert!(!alloc.is_alive(b0));

        let b0_reuse = alloc.allocate();
        assert_eq!(b0_reuse.index, 0);
        assert_eq!(b0_reuse.generation, 1);
        assert!(alloc.is_alive(b0_reuse));
        assert!(!alloc.is_alive(b0));
    }

    #[test]
    fn double_deallocate_is_ignored() {
        let mut alloc = BodyAllocator::new();
        let b0 = alloc.allocate();
        assert!(alloc.deallocate(b0));
        assert!(!alloc.deallocate(b0));
        let b1 = alloc.allocate();
        // The stale handle must not release the reused slot.
        assert!(!alloc.deallocate(b0));
        assert!(alloc.is_alive(b1));
    }

    #[test]
    fn sequential_allocation() {
        let mut alloc = BodyAllocator::new();
        let ids: Vec<_> = (0..3).map(|_| alloc.allocate()).collect();
        assert_eq!(ids.iter().map(|b| b.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn reset_invalidates_live_handles() {
        let mut alloc = BodyAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        alloc.reset();
        assert!(!alloc.is_alive(a));
        assert!(!alloc.is_alive(b));

        let c = alloc.allocate();
        assert_eq!(c.index, 0);
        assert_ne!(c, a);
        assert_eq!(alloc.capacity(), 2);
    }
}
