use crate::pixel::Pixel;

/// The reconstructed-pixel context shared, identically, by the encoder and
/// the decoder: the previous pixel, the 64-slot recently-seen table, and the
/// active run length. Lives for the duration of a single `encode`/`decode`
/// call and is never aliased across calls.
pub(crate) struct Predictor {
    pub prev: Pixel,
    pub index: [Pixel; 64],
    pub run: u8,
}

impl Predictor {
    /// I1/I2: `prev` and every `index` slot start at the fully-transparent
    /// black pixel, not at some "uninitialized" sentinel.
    #[inline]
    pub fn new() -> Self {
        Self { prev: Pixel::ZERO, index: [Pixel::ZERO; 64], run: 0 }
    }

    /// I4: record `px` at its hash slot. Callers are responsible for
    /// skipping this during an active run, per the invariant's exception.
    #[inline]
    pub fn remember(&mut self, px: Pixel) {
        self.index[px.hash_index() as usize] = px;
    }
}
