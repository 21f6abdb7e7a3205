use bytemuck::{Pod, Zeroable};

use crate::consts::{QOI_OP_DIFF, QOI_OP_LUMA};

/// A single RGBA pixel, always stored as four components regardless of the
/// image's declared channel count — 3-channel images just keep `a` pinned.
///
/// Equality is plain field-by-field comparison, never a union/bit-cast
/// aliasing trick: `Pod`/`Zeroable` here only buy a well-defined `to_bits`
/// helper, not the comparison itself.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// The pixel invariants I1/I2 start both the encoder's and the
    /// decoder's predictor state at this value: fully transparent black.
    pub const ZERO: Pixel = Pixel { r: 0, g: 0, b: 0, a: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed big-endian-in-memory 32-bit representation, as permitted by
    /// the format for equality/table-slot purposes. Never relied upon for
    /// the actual equality check (that's `derive(PartialEq)` above).
    #[inline]
    pub fn to_bits(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// `(r*3 + g*5 + b*7 + a*11) mod 64`, folded into the low 6 bits via
    /// wrapping 8-bit arithmetic.
    #[inline]
    pub fn hash_index(self) -> u8 {
        self.r
            .wrapping_mul(3)
            .wrapping_add(self.g.wrapping_mul(5))
            .wrapping_add(self.b.wrapping_mul(7))
            .wrapping_add(self.a.wrapping_mul(11))
            & 0x3f
    }

    /// Tries to express `self - prev` as a `QOI_OP_DIFF` byte. Caller must
    /// have already confirmed `self.a == prev.a`.
    #[inline]
    pub fn diff_op(self, prev: Pixel) -> Option<u8> {
        let dr = self.r.wrapping_sub(prev.r) as i8;
        let dg = self.g.wrapping_sub(prev.g) as i8;
        let db = self.b.wrapping_sub(prev.b) as i8;

        if (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db) {
            Some(QOI_OP_DIFF | (((dr + 2) as u8) << 4) | (((dg + 2) as u8) << 2) | ((db + 2) as u8))
        } else {
            None
        }
    }

    /// Tries to express `self - prev` as a `QOI_OP_LUMA` two-byte chunk.
    /// Caller must have already confirmed `self.a == prev.a` and that
    /// [`Pixel::diff_op`] failed.
    #[inline]
    pub fn luma_op(self, prev: Pixel) -> Option<[u8; 2]> {
        let dr = self.r.wrapping_sub(prev.r) as i8;
        let dg = self.g.wrapping_sub(prev.g) as i8;
        let db = self.b.wrapping_sub(prev.b) as i8;

        let dr_dg = dr.wrapping_sub(dg);
        let db_dg = db.wrapping_sub(dg);

        if (-32..=31).contains(&dg) && (-8..=7).contains(&dr_dg) && (-8..=7).contains(&db_dg) {
            Some([
                QOI_OP_LUMA | ((dg + 32) as u8),
                (((dr_dg + 8) as u8) << 4) | ((db_dg + 8) as u8),
            ])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_of_zero_pixel_is_zero() {
        assert_eq!(Pixel::ZERO.hash_index(), 0);
    }

    #[test]
    fn diff_op_accepts_bias_2_edges() {
        let prev = Pixel::new(10, 20, 30, 255);
        // B1: dr=dg=db=-2
        let low = Pixel::new(8, 18, 28, 255);
        assert_eq!(low.diff_op(prev), Some(0x40 | (0 << 4) | (0 << 2) | 0));
        // B2: dr=dg=db=1
        let high = Pixel::new(11, 21, 31, 255);
        assert_eq!(high.diff_op(prev), Some(0x40 | (3 << 4) | (3 << 2) | 3));
    }

    #[test]
    fn diff_op_rejects_out_of_range() {
        let prev = Pixel::new(10, 20, 30, 255);
        let px = Pixel::new(15, 20, 30, 255);
        assert_eq!(px.diff_op(prev), None);
    }

    #[test]
    fn luma_op_accepts_edge_values() {
        // B3: dg=-32, dr-dg=-8, db-dg=-8 => dr=-40 wrapped, db=-40 wrapped
        let prev = Pixel::new(100, 100, 100, 255);
        let dg: i32 = -32;
        let dr_dg: i32 = -8;
        let db_dg: i32 = -8;
        let dr = dg + dr_dg;
        let db = dg + db_dg;
        let px = Pixel::new(
            (100i32 + dr).rem_euclid(256) as u8,
            (100i32 + dg).rem_euclid(256) as u8,
            (100i32 + db).rem_euclid(256) as u8,
            255,
        );
        assert_eq!(px.diff_op(prev), None);
        let luma = px.luma_op(prev);
        assert_eq!(luma, Some([0x80 | 0u8, (0u8 << 4) | 0u8]));
    }

    #[test]
    fn to_bits_matches_field_order() {
        let px = Pixel::new(1, 2, 3, 4);
        assert_eq!(px.to_bits(), 0x01020304);
    }
}
