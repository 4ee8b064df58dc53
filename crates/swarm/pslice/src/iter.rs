//! Ordered traversal over bins.
//!
//! [`PSlice::each_bin`] walks bins from shallowest to deepest and
//! [`PSlice::each_bin_rev`] from deepest to shallowest. The visitor decides
//! after every peer whether to go on, skip the rest of the bin, or stop; an
//! error from the visitor ends the walk and is returned as is.

use std::{fmt, hash::Hash};

use tracing::debug;
use vertex_swarm_primitives::Proximity;

use crate::PSlice;

/// Decision returned by a traversal visitor after each peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visit {
    /// Go on to the next peer, or the next bin when this one is done.
    #[default]
    Continue,

    /// Skip the remaining peers of the current bin.
    SkipBin,

    /// End the traversal.
    Stop,
}

impl Visit {
    /// Build from a `(stop, skip_bin)` flag pair. `stop` wins.
    pub fn from_flags(stop: bool, skip_bin: bool) -> Self {
        match (stop, skip_bin) {
            (true, _) => Self::Stop,
            (false, true) => Self::SkipBin,
            (false, false) => Self::Continue,
        }
    }
}

impl<A> PSlice<A>
where
    A: Proximity + Clone + Eq + Hash + fmt::Debug,
{
    /// Visit every peer with its bin, shallowest bin first.
    ///
    /// The read lock is held for the whole traversal, so writers wait until it
    /// returns. The visitor must not call back into this PSlice.
    pub fn each_bin<E, F>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(&A, u8) -> Result<Visit, E>,
    {
        self.walk(0..self.max_bins(), visit)
    }

    /// Visit every peer with its bin, deepest bin first.
    ///
    /// Same locking rules as [`each_bin`](Self::each_bin).
    pub fn each_bin_rev<E, F>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(&A, u8) -> Result<Visit, E>,
    {
        self.walk((0..self.max_bins()).rev(), visit)
    }

    fn walk<E, F>(&self, order: impl Iterator<Item = u8>, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&A, u8) -> Result<Visit, E>,
    {
        let bins = self.read_bins();

        for bin in order {
            for peer in bins.segment(bin as usize) {
                match visit(peer, bin) {
                    Ok(Visit::Continue) => {}
                    Ok(Visit::SkipBin) => break,
                    Ok(Visit::Stop) => return Ok(()),
                    Err(err) => {
                        debug!(bin, "traversal aborted by visitor");
                        return Err(err);
                    }
                }
            }
        }

        Ok(())
    }
}
