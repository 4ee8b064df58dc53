use crate::{EXTENDED_PO, MAX_PO, OverlayAddress};

/// Proximity order between two addresses of the same kind.
///
/// Implemented by every address type that can be stored in a proximity
/// indexed structure. The order is symmetric and an address has maximal
/// proximity to itself.
pub trait Proximity {
    /// Proximity order, capped at [`MAX_PO`].
    fn proximity(&self, other: &Self) -> u8;

    /// Proximity order, capped at [`EXTENDED_PO`].
    fn extended_proximity(&self, other: &Self) -> u8;
}

impl Proximity for OverlayAddress {
    fn proximity(&self, other: &Self) -> u8 {
        proximity(self.as_slice(), other.as_slice(), MAX_PO)
    }

    fn extended_proximity(&self, other: &Self) -> u8 {
        proximity(self.as_slice(), other.as_slice(), EXTENDED_PO)
    }
}

/// Number of matching leading bits of `one` and `other`, capped at `max_po`.
///
/// This is the proximity order of the MSB distance between the two inputs:
/// the count of leading zeros of `one ^ other` read big endian (most
/// significant bit first). Only bytes covered by both slices are compared, so
/// a zero-length input has maximal proximity to anything.
///
/// (0 farthest, `max_po` closest or self)
pub fn proximity(one: &[u8], other: &[u8], max_po: u8) -> u8 {
    let limit = (max_po as usize / 8 + 1).min(one.len()).min(other.len());
    for (i, (a, b)) in one.iter().zip(other).take(limit).enumerate() {
        let oxo = a ^ b;
        if oxo != 0 {
            let po = i * 8 + oxo.leading_zeros() as usize;
            return po.min(max_po as usize) as u8;
        }
    }
    max_po
}
