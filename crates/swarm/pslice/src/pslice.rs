//! Proximity-ordered peer storage (PSlice).
//!
//! Peers are organized into bins based on their proximity order (PO) to the
//! base address. PO is calculated using [`Proximity::proximity`].
//!
//! # Implementation
//!
//! A single `RwLock` guards one bin-partitioned arena: a peer sequence split
//! into per-bin segments by a cursor table, plus a peer to offset index for
//! O(1) membership. Inserts and removes move at most one peer per bin.

use std::{fmt, hash::Hash};

use parking_lot::{RwLock, RwLockReadGuard};
use tracing::{debug, trace};
use vertex_swarm_primitives::{OverlayAddress, Proximity};

use crate::{OverflowPolicy, PSliceConfig, PSliceResult, bins::Bins};

/// Proximity-ordered peer storage.
///
/// Stores peers in bins based on their proximity order relative to the base
/// address. Bin 0 is the shallowest (least proximity), bin `max_bins - 1` the
/// deepest. Peers at or beyond the deepest bin are handled according to the
/// [`OverflowPolicy`].
///
/// All operations take `&self` and are safe to call concurrently: mutations
/// hold the write lock for the whole call, queries and traversals hold the
/// read lock.
pub struct PSlice<A = OverlayAddress> {
    base: A,
    max_bins: u8,
    overflow: OverflowPolicy,
    bins: RwLock<Bins<A>>,
}

impl<A> PSlice<A>
where
    A: Proximity + Clone + Eq + Hash + fmt::Debug,
{
    /// Create a new PSlice with `max_bins` bins around `base`.
    ///
    /// Peers beyond the deepest bin are clamped into it.
    ///
    /// # Panics
    ///
    /// If `max_bins` is zero.
    pub fn new(max_bins: u8, base: A) -> Self {
        assert!(max_bins > 0, "pslice requires at least one bin");
        Self::from_parts(base, max_bins, OverflowPolicy::Clamp)
    }

    /// Create a new PSlice from a configuration.
    pub fn with_config(base: A, config: PSliceConfig) -> PSliceResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(base, config.max_bins, config.overflow))
    }

    fn from_parts(base: A, max_bins: u8, overflow: OverflowPolicy) -> Self {
        Self {
            base,
            max_bins,
            overflow,
            bins: RwLock::new(Bins::new(max_bins)),
        }
    }

    /// Get the base address.
    pub fn base(&self) -> &A {
        &self.base
    }

    /// Get the number of bins.
    pub fn max_bins(&self) -> u8 {
        self.max_bins
    }

    /// Get the overflow policy.
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    /// The bin `peer` belongs in, whether or not it is stored.
    ///
    /// Returns `None` if the peer is too close to the base for the bin range
    /// and the overflow policy rejects it.
    pub fn bin_for(&self, peer: &A) -> Option<u8> {
        let po = self.base.proximity(peer);
        if po < self.max_bins {
            return Some(po);
        }
        match self.overflow {
            OverflowPolicy::Clamp => Some(self.max_bins - 1),
            OverflowPolicy::Reject => None,
        }
    }

    /// Add a peer to its bin.
    ///
    /// Returns `true` if the peer was added (not already present and not
    /// rejected by the overflow policy).
    pub fn add(&self, peer: A) -> bool {
        self.add_all([peer]) == 1
    }

    /// Add a batch of peers under a single write lock.
    ///
    /// Peers already present are skipped. Returns the number of peers added.
    pub fn add_all<I>(&self, peers: I) -> usize
    where
        I: IntoIterator<Item = A>,
    {
        let mut bins = self.bins.write();
        let mut added = 0;

        for peer in peers {
            if bins.contains(&peer) {
                continue;
            }
            let Some(bin) = self.bin_for(&peer) else {
                debug!(?peer, max_bins = self.max_bins, "peer beyond deepest bin rejected");
                continue;
            };
            trace!(?peer, bin, "peer added");
            bins.insert(peer, bin as usize);
            added += 1;
        }

        added
    }

    /// Remove a peer.
    ///
    /// Returns `true` if the peer was present and removed. Removing an
    /// unknown peer is a no-op.
    pub fn remove(&self, peer: &A) -> bool {
        let removed = self.bins.write().remove(peer);
        if let Some(bin) = removed {
            trace!(?peer, bin, "peer removed");
        }
        removed.is_some()
    }

    /// Check if a peer exists in the PSlice.
    pub fn exists(&self, peer: &A) -> bool {
        self.bins.read().contains(peer)
    }

    /// Get the bin of a stored peer.
    pub fn po(&self, peer: &A) -> Option<u8> {
        self.bins.read().bin_of_peer(peer).map(|bin| bin as u8)
    }

    /// Get the total number of peers.
    pub fn len(&self) -> usize {
        self.bins.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of peers in a bin, 0 if the bin is out of range.
    pub fn bin_size(&self, bin: u8) -> usize {
        self.bins
            .read()
            .range(bin as usize)
            .map_or(0, |range| range.len())
    }

    /// Get a copy of the peers in a bin, in no particular order.
    ///
    /// Returns an empty vector if the bin is out of range.
    pub fn bin_peers(&self, bin: u8) -> Vec<A> {
        self.bins.read().segment(bin as usize).to_vec()
    }

    /// Get bin sizes, indexed by bin.
    pub fn bin_sizes(&self) -> Vec<usize> {
        self.bins.read().sizes().collect()
    }

    /// Get all peers as a flat vector, shallowest bin first.
    pub fn peers(&self) -> Vec<A> {
        self.bins.read().peers().to_vec()
    }

    /// The shallowest bin with no peers, `None` if every bin has a peer.
    ///
    /// Discovery uses this to target the least populated proximity region.
    pub fn shallowest_empty(&self) -> Option<u8> {
        self.bins.read().shallowest_empty().map(|bin| bin as u8)
    }

    /// Shared access to the arena, held for as long as the guard lives.
    pub(crate) fn read_bins(&self) -> RwLockReadGuard<'_, Bins<A>> {
        self.bins.read()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.bins.read().assert_consistent();
    }
}

impl<A> fmt::Debug for PSlice<A>
where
    A: Proximity + Clone + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PSlice")
            .field("base", &self.base)
            .field("max_bins", &self.max_bins)
            .field("overflow", &self.overflow)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
