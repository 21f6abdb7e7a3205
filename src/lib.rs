//! A lossless codec for the "Quite OK Image" family of raster formats.
//!
//! This crate encodes and decodes 8-bit RGB(A) raster images into a compact
//! byte-aligned container: a 14-byte header, a stream of variable-length
//! chunks, and an 8-byte zero trailer. It trades a little compression ratio
//! against a general-purpose lossless format for an order of magnitude more
//! encode/decode speed, by keeping the whole transform to a handful of
//! cheap per-pixel cases driven by a tiny shared predictor state.
//!
//! # Data format
//!
//! ```text
//! .- header (14 bytes) ---------------------------------------------.
//! | magic "qoif" | width (BE u32) | height (BE u32) | ch | colorspc |
//! `--------------------------------------------------------------- -`
//! ```
//! `ch` is `3` (RGB) or `4` (RGBA). `colorspc` is `0` (sRGB, linear alpha)
//! or `1` (all linear) and is purely informative — it never affects
//! encoding or decoding.
//!
//! The header is followed by any number of chunks and an 8-byte `0x00`
//! trailer. A 64-entry table of recently-seen pixels (zero-initialized,
//! keyed by a fixed hash) is maintained identically by the encoder and the
//! decoder; pixels are encoded, in priority order, as:
//!  * a run of the previous pixel (`QOI_OP_RUN`)
//!  * a hit against the recently-seen table (`QOI_OP_INDEX`)
//!  * a small difference from the previous pixel (`QOI_OP_DIFF`, `QOI_OP_LUMA`)
//!  * a full RGB or RGBA literal (`QOI_OP_RGB`, `QOI_OP_RGBA`)
//!
//! See [`encode_to_buf`] and [`decode_to_buf`] for the exact chunk grammar
//! referenced from their doc comments.
//!
//! # Example
//!
//! ```
//! use qoi_codec::{Channels, ColorSpace, Descriptor};
//!
//! let desc = Descriptor::new(2, 1, Channels::Rgba, ColorSpace::Srgb).unwrap();
//! let pixels = [10, 20, 30, 255, 10, 20, 30, 255];
//! let encoded = qoi_codec::encode(&pixels, &desc).unwrap();
//! let (decoded, desc2) = qoi_codec::decode(&encoded, 4).unwrap();
//! assert_eq!(decoded, pixels);
//! assert_eq!(desc2, desc);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod consts;
mod decode;
mod encode;
mod error;
mod header;
mod pixel;
mod predictor;

pub use decode::{decode_descriptor, decode_to_buf, decoded_len};
pub use encode::{encode_to_buf, max_encoded_len};
pub use error::{Error, Result};
pub use header::{Channels, ColorSpace, Descriptor};

#[cfg(feature = "alloc")]
pub use decode::{decode, decode_to_vec};
#[cfg(feature = "alloc")]
pub use encode::{encode, encode_to_vec};

pub use pixel::Pixel;
