//! Proximity-indexed peer registry for Swarm Kademlia routing.
//!
//! A [`PSlice`] organizes peers by their proximity order (PO) to a base
//! address, usually the local node's overlay address. It answers the
//! routing-table questions the topology layer asks:
//!
//! - which peers are in a bin ([`PSlice::bin_peers`], [`PSlice::bin_size`])
//! - which bin is the shallowest empty one ([`PSlice::shallowest_empty`]),
//!   the next target for peer discovery
//! - all peers ordered by proximity, shallowest or deepest first, with early
//!   termination and per-bin skipping ([`PSlice::each_bin`],
//!   [`PSlice::each_bin_rev`])
//!
//! # Bins
//!
//! Bin N contains peers with PO = N to the base. Bin 0 is the shallowest
//! (first bit differs), bin `max_bins - 1` the deepest. Peers closer than the
//! deepest bin can represent are clamped into it or rejected, see
//! [`OverflowPolicy`].
//!
//! # Concurrency
//!
//! Every operation takes `&self`. One readers-writer lock covers the whole
//! structure: `add`, `add_all` and `remove` hold it exclusively for the whole
//! call, everything else holds it shared. Traversals keep the shared lock until
//! they return, so a visitor must never call back into the same PSlice.
//!
//! # Usage
//!
//! ```
//! use std::convert::Infallible;
//!
//! use vertex_swarm_primitives::OverlayAddress;
//! use vertex_swarm_pslice::{PSlice, Visit};
//!
//! let pslice = PSlice::new(4, OverlayAddress::ZERO);
//!
//! let mut far = [0u8; 32];
//! far[0] = 0x80; // PO 0
//! let mut near = [0u8; 32];
//! near[0] = 0x20; // PO 2
//! pslice.add_all([OverlayAddress::from(far), OverlayAddress::from(near)]);
//!
//! assert_eq!(pslice.bin_size(2), 1);
//! assert_eq!(pslice.shallowest_empty(), Some(1));
//!
//! let mut bins = Vec::new();
//! pslice
//!     .each_bin_rev(|_, bin| {
//!         bins.push(bin);
//!         Ok::<_, Infallible>(Visit::Continue)
//!     })
//!     .unwrap();
//! assert_eq!(bins, vec![2, 0]);
//! ```

mod bins;
mod config;
mod error;
mod iter;
mod pslice;

pub use config::{DEFAULT_MAX_BINS, OverflowPolicy, PSliceConfig};
pub use error::{PSliceError, PSliceResult};
pub use iter::Visit;
pub use pslice::PSlice;
