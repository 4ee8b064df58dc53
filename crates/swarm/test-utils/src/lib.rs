//! Test utilities for vertex-swarm crates.
//!
//! Random overlay addresses, including addresses placed at an exact proximity
//! order from a base address so tests can fill specific routing bins.

use vertex_swarm_primitives::{HASH_SIZE, OverlayAddress};

/// A uniformly random overlay address.
pub fn random_address() -> OverlayAddress {
    OverlayAddress::from(rand::random::<[u8; HASH_SIZE]>())
}

/// A random overlay address with proximity order exactly `po` to `base`.
///
/// The first `po` bits are copied from `base`, bit `po` is flipped and the
/// remaining bits are random.
pub fn random_address_at(base: &OverlayAddress, po: u8) -> OverlayAddress {
    let mut bytes = rand::random::<[u8; HASH_SIZE]>();
    let po = po as usize;

    for (i, (byte, base_byte)) in bytes.iter_mut().zip(base.iter()).enumerate() {
        let start = i * 8;
        if start + 8 <= po {
            *byte = *base_byte;
        } else if start <= po {
            let bit = po - start;
            // keep the leading `bit` bits of base, flip the next one
            let keep = !(0xffu8 >> bit);
            let flip = 0x80u8 >> bit;
            *byte = (base_byte & keep) | (!base_byte & flip) | (*byte & !keep & !flip);
        }
    }

    OverlayAddress::from(bytes)
}

/// `count` distinct random addresses at proximity order `po` to `base`.
///
/// Loops until enough distinct addresses are found, so `po` must leave at
/// least `log2(count)` free bits in the address.
pub fn random_addresses_at(base: &OverlayAddress, po: u8, count: usize) -> Vec<OverlayAddress> {
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let addr = random_address_at(base, po);
        if !out.contains(&addr) {
            out.push(addr);
        }
    }
    out
}
