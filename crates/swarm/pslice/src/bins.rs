//! Bin-partitioned peer arena.
//!
//! All peers live in one `Vec`, split into contiguous per-bin segments by a
//! cursor table: `cursors[b]` is the exclusive end of bin `b`, so bin `b` spans
//! `cursors[b - 1]..cursors[b]` (bin 0 starts at 0). An index maps every peer
//! to its current offset and is re-synced whenever a peer moves.
//!
//! Segments are kept contiguous by rotating one element per deeper bin on
//! insert and remove, so both cost O(bins) moves regardless of population.

use std::{collections::HashMap, hash::Hash, ops::Range};

#[derive(Debug, Clone)]
pub(crate) struct Bins<A> {
    peers: Vec<A>,
    cursors: Vec<usize>,
    index: HashMap<A, usize>,
}

// Offsets and bins used for indexing below are bounded by the cursor table:
// every cursor is `<= peers.len()` and bins are `< cursors.len()`.
#[allow(clippy::indexing_slicing)]
impl<A: Clone + Eq + Hash> Bins<A> {
    pub(crate) fn new(max_bins: u8) -> Self {
        Self {
            peers: Vec::new(),
            cursors: vec![0; max_bins as usize],
            index: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.peers.len()
    }

    pub(crate) fn contains(&self, peer: &A) -> bool {
        self.index.contains_key(peer)
    }

    /// Bin of a stored peer.
    pub(crate) fn bin_of_peer(&self, peer: &A) -> Option<usize> {
        self.index.get(peer).map(|&offset| self.bin_of(offset))
    }

    /// Offset range of `bin`, `None` when out of range.
    pub(crate) fn range(&self, bin: usize) -> Option<Range<usize>> {
        let end = *self.cursors.get(bin)?;
        let start = match bin.checked_sub(1) {
            Some(prev) => self.cursors[prev],
            None => 0,
        };
        Some(start..end)
    }

    /// Peers of `bin` in stored order. Empty when out of range.
    pub(crate) fn segment(&self, bin: usize) -> &[A] {
        self.range(bin)
            .and_then(|range| self.peers.get(range))
            .unwrap_or_default()
    }

    /// All peers, shallowest bin first.
    pub(crate) fn peers(&self) -> &[A] {
        &self.peers
    }

    pub(crate) fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        let mut start = 0;
        self.cursors.iter().map(move |&end| {
            let size = end - start;
            start = end;
            size
        })
    }

    /// Insert `peer` at the end of `bin`.
    ///
    /// Every deeper non-empty bin moves its first peer to its end, which opens
    /// a slot at the boundary of `bin`. Returns `false` if already present.
    pub(crate) fn insert(&mut self, peer: A, bin: usize) -> bool {
        debug_assert!(bin < self.cursors.len(), "bin {bin} out of range");
        if self.index.contains_key(&peer) {
            return false;
        }

        let mut hole = self.peers.len();
        self.peers.push(peer.clone());

        for c in (bin + 1..self.cursors.len()).rev() {
            let start = self.cursors[c - 1];
            if start < hole {
                self.peers.swap(start, hole);
                self.resync(hole);
                hole = start;
            }
            self.cursors[c] += 1;
        }

        debug_assert_eq!(hole, self.cursors[bin]);
        self.cursors[bin] += 1;
        self.index.insert(peer, hole);
        true
    }

    /// Remove `peer`, returning the bin it was stored in.
    ///
    /// The last peer of the bin fills the vacated slot, then every deeper
    /// non-empty bin moves its last peer into the slot in front of it, until
    /// the vacancy reaches the tail and is dropped.
    pub(crate) fn remove(&mut self, peer: &A) -> Option<usize> {
        let offset = self.index.remove(peer)?;
        let bin = self.bin_of(offset);

        let mut hole = offset;
        for c in bin..self.cursors.len() {
            let last = self.cursors[c] - 1;
            if last != hole {
                self.peers.swap(hole, last);
                self.resync(hole);
                hole = last;
            }
            self.cursors[c] -= 1;
        }

        debug_assert_eq!(hole + 1, self.peers.len());
        self.peers.pop();
        Some(bin)
    }

    /// First bin without peers.
    pub(crate) fn shallowest_empty(&self) -> Option<usize> {
        self.sizes().position(|size| size == 0)
    }

    fn bin_of(&self, offset: usize) -> usize {
        self.cursors.partition_point(|&end| end <= offset)
    }

    /// Point the index entry of the peer at `offset` back at `offset`.
    fn resync(&mut self, offset: usize) {
        if let Some(slot) = self.index.get_mut(&self.peers[offset]) {
            *slot = offset;
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.cursors.last().copied().unwrap_or(0), self.peers.len());
        assert!(self.cursors.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(self.index.len(), self.peers.len());
        for (offset, peer) in self.peers.iter().enumerate() {
            assert_eq!(self.index.get(peer), Some(&offset));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bins_with(layout: &[(u32, usize)], max_bins: u8) -> Bins<u32> {
        let mut bins = Bins::new(max_bins);
        for &(peer, bin) in layout {
            assert!(bins.insert(peer, bin));
            bins.assert_consistent();
        }
        bins
    }

    fn sorted(peers: &[u32]) -> Vec<u32> {
        let mut peers = peers.to_vec();
        peers.sort_unstable();
        peers
    }

    #[test]
    fn test_insert_keeps_segments() {
        let bins = bins_with(&[(30, 3), (10, 1), (31, 3), (0, 0), (11, 1), (32, 3)], 4);

        assert_eq!(bins.len(), 6);
        assert_eq!(sorted(bins.segment(0)), vec![0]);
        assert_eq!(sorted(bins.segment(1)), vec![10, 11]);
        assert!(bins.segment(2).is_empty());
        assert_eq!(sorted(bins.segment(3)), vec![30, 31, 32]);
        assert_eq!(bins.sizes().collect::<Vec<_>>(), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut bins = bins_with(&[(1, 0)], 2);
        assert!(!bins.insert(1, 0));
        assert!(!bins.insert(1, 1));
        assert_eq!(bins.len(), 1);
        bins.assert_consistent();
    }

    #[test]
    fn test_insert_deepest_is_append() {
        let mut bins = bins_with(&[(0, 0), (1, 1)], 3);
        let before = bins.peers().to_vec();

        assert!(bins.insert(2, 2));
        assert_eq!(&bins.peers()[..2], before.as_slice());
        assert_eq!(bins.peers()[2], 2);
    }

    #[test]
    fn test_insert_preserves_order_within_target_bin() {
        let bins = bins_with(&[(1, 1), (2, 1), (3, 1)], 2);
        assert_eq!(bins.segment(1), &[1, 2, 3]);
    }

    #[test]
    fn test_remove() {
        let mut bins = bins_with(&[(0, 0), (1, 0), (10, 1), (20, 2), (21, 2), (30, 3)], 4);

        assert_eq!(bins.remove(&1), Some(0));
        bins.assert_consistent();
        assert_eq!(bins.segment(0), &[0]);
        assert_eq!(sorted(bins.segment(2)), vec![20, 21]);

        assert_eq!(bins.remove(&0), Some(0));
        bins.assert_consistent();
        assert!(bins.segment(0).is_empty());

        assert_eq!(bins.remove(&30), Some(3));
        bins.assert_consistent();
        assert!(bins.segment(3).is_empty());

        assert_eq!(bins.remove(&30), None);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.sizes().collect::<Vec<_>>(), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_remove_across_empty_bins() {
        let mut bins = bins_with(&[(0, 0), (1, 0), (40, 4), (41, 4)], 6);

        assert_eq!(bins.remove(&0), Some(0));
        bins.assert_consistent();
        assert_eq!(bins.segment(0), &[1]);
        assert_eq!(sorted(bins.segment(4)), vec![40, 41]);
        assert_eq!(bins.range(4), Some(1..3));
    }

    #[test]
    fn test_bin_of_peer() {
        let bins = bins_with(&[(0, 0), (20, 2), (21, 2), (50, 5)], 6);
        assert_eq!(bins.bin_of_peer(&0), Some(0));
        assert_eq!(bins.bin_of_peer(&21), Some(2));
        assert_eq!(bins.bin_of_peer(&50), Some(5));
        assert_eq!(bins.bin_of_peer(&7), None);
    }

    #[test]
    fn test_out_of_range() {
        let bins = bins_with(&[(0, 0)], 2);
        assert_eq!(bins.range(2), None);
        assert!(bins.segment(2).is_empty());
        assert!(bins.segment(usize::MAX).is_empty());
    }

    #[test]
    fn test_shallowest_empty() {
        let mut bins = Bins::new(3);
        assert_eq!(bins.shallowest_empty(), Some(0));
        bins.insert(0u32, 0);
        assert_eq!(bins.shallowest_empty(), Some(1));
        bins.insert(2, 2);
        assert_eq!(bins.shallowest_empty(), Some(1));
        bins.insert(1, 1);
        assert_eq!(bins.shallowest_empty(), None);
        bins.remove(&2);
        assert_eq!(bins.shallowest_empty(), Some(2));
    }

    #[test]
    fn test_churn() {
        let mut bins = Bins::new(8);
        for peer in 0u32..200 {
            bins.insert(peer, (peer * 7 % 8) as usize);
        }
        bins.assert_consistent();

        for peer in (0u32..200).filter(|p| p % 3 == 0) {
            assert_eq!(bins.remove(&peer), Some((peer * 7 % 8) as usize));
        }
        bins.assert_consistent();

        for peer in 0u32..200 {
            let expected = (peer % 3 != 0).then_some((peer * 7 % 8) as usize);
            assert_eq!(bins.bin_of_peer(&peer), expected);
        }
    }
}
