//! PSlice configuration.
//!
//! # Bins and Overflow
//!
//! A PSlice has a fixed number of bins, `max_bins`, numbered from 0
//! (shallowest, least proximity to the base) to `max_bins - 1` (deepest).
//! Peers whose proximity order to the base is `>= max_bins` cannot be given
//! their own bin. The [`OverflowPolicy`] decides what happens to them:
//!
//! - **Clamp** (default): the deepest bin absorbs them, so it holds every peer
//!   at least as close as `max_bins - 1`.
//! - **Reject**: they are not stored.

use vertex_swarm_primitives::NUM_BINS;

use crate::{PSliceError, PSliceResult};

/// Default number of bins, one per routing proximity order.
pub const DEFAULT_MAX_BINS: u8 = NUM_BINS as u8;

/// What to do with peers whose proximity order does not fit in the bin range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum OverflowPolicy {
    /// Store the peer in the deepest bin.
    #[default]
    Clamp,

    /// Do not store the peer.
    Reject,
}

/// Configuration for a [`PSlice`](crate::PSlice).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PSliceConfig {
    /// Number of bins. Must be at least 1.
    pub max_bins: u8,

    /// Handling of peers closer than the deepest bin.
    pub overflow: OverflowPolicy,
}

impl Default for PSliceConfig {
    fn default() -> Self {
        Self {
            max_bins: DEFAULT_MAX_BINS,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl PSliceConfig {
    /// Set the number of bins.
    pub fn with_max_bins(mut self, max_bins: u8) -> Self {
        self.max_bins = max_bins;
        self
    }

    /// Set the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Check that the configuration can build a PSlice.
    pub fn validate(&self) -> PSliceResult<()> {
        if self.max_bins == 0 {
            return Err(PSliceError::ZeroBins);
        }
        Ok(())
    }
}
