//! Core primitive types for Swarm peer routing.
//!
//! This crate provides the overlay address type and the proximity order (PO)
//! measure that every routing structure in the stack is keyed on. It is kept
//! separate so that topology crates and test helpers agree on one definition.
//!
//! # Types
//!
//! - [`OverlayAddress`] - Swarm overlay address (32 bytes, Kademlia routing)
//! - [`Proximity`] - Proximity order between two addresses

#![cfg_attr(not(feature = "std"), no_std)]

mod proximity;

pub use proximity::{Proximity, proximity};

use alloy_primitives::B256;

/// Size of an overlay address in bytes.
pub const HASH_SIZE: usize = 32;

/// Maximum proximity order used for routing.
///
/// Addresses sharing more than `MAX_PO` leading bits are reported at `MAX_PO`.
pub const MAX_PO: u8 = 31;

/// Maximum proximity order used for bin balancing.
pub const EXTENDED_PO: u8 = u8::MAX;

/// Number of routing bins (one for each PO value `0..=MAX_PO`).
pub const NUM_BINS: usize = MAX_PO as usize + 1;

/// Overlay address for Swarm routing and peer identification.
///
/// A 32-byte address derived from the node's identity. All proximity and
/// bin calculations in the topology layer are made on overlay addresses.
pub type OverlayAddress = B256;
