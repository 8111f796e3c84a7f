//! Edit revisions: which chunks an edit touches and which meshes are stale.
#![forbid(unsafe_code)]

use isle_world::{CHUNK_D, CHUNK_W, ChunkCoord};
use std::collections::HashMap;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTrackerStats {
    pub stamps: u64,
    pub rev_entries: usize,
    pub built_entries: usize,
    pub dirty: usize,
}

/// Per-chunk change stamps over a `chunks_x` × `chunks_z` grid. A chunk is
/// dirty while its latest edit stamp is newer than the stamp its current mesh
/// was built from.
#[derive(Debug, Clone)]
pub struct EditTracker {
    chunks_x: i32,
    chunks_z: i32,
    rev: HashMap<ChunkCoord, u64>,
    built: HashMap<ChunkCoord, u64>,
    counter: u64,
}

impl EditTracker {
    pub fn new(chunks_x: i32, chunks_z: i32) -> Self {
        Self {
            chunks_x,
            chunks_z,
            rev: HashMap::new(),
            built: HashMap::new(),
            counter: 0,
        }
    }

    pub fn stats(&self) -> EditTrackerStats {
        EditTrackerStats {
            stamps: self.counter,
            rev_entries: self.rev.len(),
            built_entries: self.built.len(),
            dirty: self.dirty_chunks().len(),
        }
    }

    #[inline]
    pub fn contains(&self, c: ChunkCoord) -> bool {
        (0..self.chunks_x).contains(&c.cx) && (0..self.chunks_z).contains(&c.cz)
    }

    /// Chunks whose mesh can change after an edit at world column `(wx, wz)`:
    /// the owning chunk first, then the face neighbor across each boundary the
    /// column touches (west, east, front, back). Chunks outside the grid are
    /// left out; an owner outside the grid yields nothing.
    pub fn affected_chunks(&self, wx: i32, wz: i32) -> Vec<ChunkCoord> {
        let (c, lx, lz) = ChunkCoord::from_world(wx, wz);
        if !self.contains(c) {
            return Vec::new();
        }
        let mut affected = vec![c];
        if lx == 0 {
            affected.push(c.offset(-1, 0));
        }
        if lx == CHUNK_W - 1 {
            affected.push(c.offset(1, 0));
        }
        if lz == 0 {
            affected.push(c.offset(0, -1));
        }
        if lz == CHUNK_D - 1 {
            affected.push(c.offset(0, 1));
        }
        affected.retain(|n| self.contains(*n));
        affected
    }

    /// Stamps every chunk from [`EditTracker::affected_chunks`] with one shared
    /// revision. Returns the stamp and the chunks it was applied to.
    pub fn bump_region_around(&mut self, wx: i32, wz: i32) -> (u64, Vec<ChunkCoord>) {
        self.counter = self.counter.wrapping_add(1).max(1);
        let stamp = self.counter;
        let affected = self.affected_chunks(wx, wz);
        for c in &affected {
            self.rev.insert(*c, stamp);
        }
        (stamp, affected)
    }

    pub fn get_rev(&self, coord: ChunkCoord) -> u64 {
        self.rev.get(&coord).copied().unwrap_or(0)
    }

    pub fn get_built_rev(&self, coord: ChunkCoord) -> u64 {
        self.built.get(&coord).copied().unwrap_or(0)
    }

    pub fn mark_built(&mut self, coord: ChunkCoord, rev: u64) {
        // Only update if this is a newer revision
        let e = self.built.entry(coord).or_insert(0);
        if rev > *e {
            *e = rev;
        }
    }

    pub fn needs_rebuild(&self, coord: ChunkCoord) -> bool {
        self.get_rev(coord) > self.get_built_rev(coord)
    }

    /// Stale chunks in coordinate order.
    pub fn dirty_chunks(&self) -> Vec<ChunkCoord> {
        let mut out: Vec<ChunkCoord> = self
            .rev
            .keys()
            .copied()
            .filter(|c| self.needs_rebuild(*c))
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid() -> EditTracker {
        EditTracker::new(8, 8)
    }

    #[test]
    fn interior_edit_touches_one_chunk() {
        assert_eq!(
            grid().affected_chunks(16 * 2 + 7, 16 * 3 + 8),
            vec![ChunkCoord::new(2, 3)]
        );
    }

    #[test]
    fn corner_edit_touches_face_neighbors_only() {
        let c = ChunkCoord::new(1, 1);
        assert_eq!(
            grid().affected_chunks(16, 16),
            vec![c, c.offset(-1, 0), c.offset(0, -1)]
        );
        assert_eq!(
            grid().affected_chunks(31, 31),
            vec![c, c.offset(1, 0), c.offset(0, 1)]
        );
    }

    #[test]
    fn grid_edges_drop_missing_neighbors() {
        let t = grid();
        assert_eq!(t.affected_chunks(0, 5), vec![ChunkCoord::new(0, 0)]);
        assert_eq!(t.affected_chunks(127, 127), vec![ChunkCoord::new(7, 7)]);
        // Floor division puts x = -1 in chunk -1, which is off the grid
        assert!(t.affected_chunks(-1, 5).is_empty());
        assert!(t.affected_chunks(128, 5).is_empty());
    }

    #[test]
    fn seam_bump_marks_neighbor_and_build_clears() {
        let mut t = grid();
        let c = ChunkCoord::new(4, 2);
        let (ox, oz) = c.origin();
        let (stamp, touched) = t.bump_region_around(ox, oz + 5);
        assert_eq!(touched, vec![c, c.offset(-1, 0)]);
        assert_eq!(t.get_rev(c), stamp);
        assert_eq!(t.get_rev(c.offset(-1, 0)), stamp);
        assert_eq!(t.get_rev(c.offset(1, 0)), 0);
        assert_eq!(t.dirty_chunks(), vec![c.offset(-1, 0), c]);

        t.mark_built(c, stamp);
        assert!(!t.needs_rebuild(c));
        assert!(t.needs_rebuild(c.offset(-1, 0)));

        // An interior edit re-dirties only the owning chunk
        let (s2, touched) = t.bump_region_around(ox + 7, oz + 7);
        assert_eq!(touched, vec![c]);
        assert!(s2 > stamp);
        assert!(t.needs_rebuild(c));
        // Older build stamps never roll back a newer one
        t.mark_built(c, s2);
        t.mark_built(c, stamp);
        assert_eq!(t.get_built_rev(c), s2);
        assert_eq!(t.stats().dirty, 1);
    }

    proptest! {
        #[test]
        fn affected_set_is_owner_plus_adjacent(wx in -40i32..170, wz in -40i32..170) {
            let t = grid();
            let affected = t.affected_chunks(wx, wz);
            let (owner, _, _) = ChunkCoord::from_world(wx, wz);
            if !t.contains(owner) {
                prop_assert!(affected.is_empty());
                return Ok(());
            }
            prop_assert_eq!(affected[0], owner);
            prop_assert!(affected.len() <= 3);
            for c in &affected[1..] {
                prop_assert!(t.contains(*c));
                let d = (c.cx - owner.cx).abs() + (c.cz - owner.cz).abs();
                prop_assert_eq!(d, 1);
                // The neighbor must contain a column adjacent to the edit
                let near = [(wx - 1, wz), (wx + 1, wz), (wx, wz - 1), (wx, wz + 1)];
                prop_assert!(near.iter().any(|(x, z)| ChunkCoord::from_world(*x, *z).0 == *c));
            }
        }
    }
}
