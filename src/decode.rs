#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

use crate::consts::{QOI_HEADER_SIZE, QOI_MASK_2, QOI_OP_DIFF, QOI_OP_INDEX, QOI_OP_LUMA, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN, QOI_TRAILER_SIZE};
use crate::error::{Error, Result};
use crate::header::{decode_header, Descriptor};
use crate::pixel::Pixel;
use crate::predictor::Predictor;

/// Advances the predictor by exactly one output pixel: consumes a chunk
/// from `bytes` (or decrements an active run) and leaves the reconstructed
/// pixel in `predictor.prev`. Shared by both the 4-channel and 3-channel
/// write paths of [`decode_to_buf`] so the chunk grammar is parsed in one
/// place regardless of how the pixel ends up written.
#[inline]
fn advance(bytes: &[u8], cursor: &mut usize, chunks_end: usize, predictor: &mut Predictor) {
    if predictor.run > 0 {
        predictor.run -= 1;
        return;
    }
    if *cursor >= chunks_end {
        // Chunk stream exhausted before all pixels were produced. Q3:
        // tolerated as a fast-path choice — keep reusing the last
        // reconstructed pixel rather than erroring.
        return;
    }

    let b1 = bytes[*cursor];
    *cursor += 1;

    if b1 == QOI_OP_RGBA {
        let px = Pixel::new(bytes[*cursor], bytes[*cursor + 1], bytes[*cursor + 2], bytes[*cursor + 3]);
        *cursor += 4;
        predictor.prev = px;
        predictor.remember(px);
    } else if b1 == QOI_OP_RGB {
        let px = Pixel::new(bytes[*cursor], bytes[*cursor + 1], bytes[*cursor + 2], predictor.prev.a);
        *cursor += 3;
        predictor.prev = px;
        predictor.remember(px);
    } else {
        match b1 & QOI_MASK_2 {
            QOI_OP_INDEX => {
                // Top two bits are zero, so `b1` is directly the slot index
                // (Q4: slot 0 legitimately starts as the zero pixel, not
                // "uninitialized").
                let px = predictor.index[b1 as usize];
                predictor.prev = px;
                predictor.remember(px);
            }
            QOI_OP_DIFF => {
                let dr = (((b1 >> 4) & 0x03) as i8) - 2;
                let dg = (((b1 >> 2) & 0x03) as i8) - 2;
                let db = ((b1 & 0x03) as i8) - 2;
                let prev = predictor.prev;
                let px = Pixel::new(
                    prev.r.wrapping_add_signed(dr),
                    prev.g.wrapping_add_signed(dg),
                    prev.b.wrapping_add_signed(db),
                    prev.a,
                );
                predictor.prev = px;
                predictor.remember(px);
            }
            QOI_OP_LUMA => {
                let b2 = bytes[*cursor];
                *cursor += 1;
                let dg = ((b1 & 0x3f) as i8).wrapping_sub(32);
                let dr = dg.wrapping_sub(8).wrapping_add(((b2 >> 4) & 0x0f) as i8);
                let db = dg.wrapping_sub(8).wrapping_add((b2 & 0x0f) as i8);
                let prev = predictor.prev;
                let px = Pixel::new(
                    prev.r.wrapping_add_signed(dr),
                    prev.g.wrapping_add_signed(dg),
                    prev.b.wrapping_add_signed(db),
                    prev.a,
                );
                predictor.prev = px;
                predictor.remember(px);
            }
            _ /* QOI_OP_RUN */ => {
                debug_assert_eq!(b1 & QOI_MASK_2, QOI_OP_RUN);
                predictor.run = b1 & 0x3f;
                // I5/no-store: a run never touches `index`, and this
                // pixel's write below reuses the still-current `prev`.
            }
        }
    }
}

/// Resolves the decoder's `out_channels` parameter (`0` meaning "use the
/// header's channel count") against a parsed header, validating it's one
/// of `{0, 3, 4}`.
#[inline]
fn resolve_out_channels(header_channels: usize, out_channels: u8) -> Result<usize> {
    match out_channels {
        0 => Ok(header_channels),
        3 => Ok(3),
        4 => Ok(4),
        _ => Err(Error::InvalidChannels),
    }
}

/// Size, in bytes, of the pixel buffer [`decode_to_buf`] will produce for
/// `desc` and a given `out_channels` request. Use this to size a buffer
/// without first calling [`decode_header`](crate::header::Descriptor) by
/// hand.
#[inline]
pub fn decoded_len(desc: &Descriptor, out_channels: u8) -> Result<usize> {
    let channels = resolve_out_channels(desc.channels.count(), out_channels)?;
    Ok(desc.n_pixels() * channels)
}

/// Decodes the image header out of `bytes` without decoding any pixels,
/// e.g. to pre-size an output buffer via [`decoded_len`].
#[inline]
pub fn decode_descriptor(bytes: &[u8]) -> Result<Descriptor> {
    decode_header(bytes)
}

/// Decodes `bytes` into `output`, a flat `width * height * channels` byte
/// buffer in RGB or RGBA order, where `channels` is `out_channels` unless
/// that's `0`, in which case it's the header's channel count.
///
/// Returns the descriptor read from the header. `out_channels` must be `0`,
/// `3`, or `4`, or this returns [`Error::InvalidChannels`].
pub fn decode_to_buf(bytes: &[u8], out_channels: u8, output: &mut [u8]) -> Result<Descriptor> {
    let desc = decode_header(bytes)?;
    let channels = resolve_out_channels(desc.channels.count(), out_channels)?;

    let n_pixels = desc.n_pixels();
    let required = n_pixels * channels;
    if output.len() < required {
        return Err(Error::AllocationFailed);
    }

    // The trailer is never parsed as a chunk.
    let chunks_end = bytes.len() - QOI_TRAILER_SIZE;

    let mut predictor = Predictor::new();
    let mut cursor = QOI_HEADER_SIZE;

    if channels == 4 {
        // Whole pixels are written in one shot by casting the output buffer
        // to `&mut [Pixel]`: `Pixel` is `repr(C)` with four same-sized,
        // padding-free `u8` fields in wire order, so this cast is exactly
        // the RGBA byte layout bytes-for-byte.
        let out_pixels: &mut [Pixel] = bytemuck::cast_slice_mut(&mut output[..required]);
        for out in out_pixels.iter_mut() {
            advance(bytes, &mut cursor, chunks_end, &mut predictor);
            *out = predictor.prev;
        }
    } else {
        let mut out_pos = 0;
        for _ in 0..n_pixels {
            advance(bytes, &mut cursor, chunks_end, &mut predictor);
            let px = predictor.prev;
            output[out_pos] = px.r;
            output[out_pos + 1] = px.g;
            output[out_pos + 2] = px.b;
            out_pos += 3;
        }
    }

    Ok(desc)
}

/// Decodes `bytes` into a freshly allocated, exactly-sized `Vec<u8>`.
#[cfg(feature = "alloc")]
#[inline]
pub fn decode_to_vec(bytes: &[u8], out_channels: u8) -> Result<(Vec<u8>, Descriptor)> {
    let desc = decode_header(bytes)?;
    let len = decoded_len(&desc, out_channels)?;
    let mut out = vec![0u8; len];
    let desc = decode_to_buf(bytes, out_channels, &mut out)?;
    Ok((out, desc))
}

/// Decodes `bytes` into a newly allocated pixel buffer plus the descriptor
/// read from the header.
///
/// This is the allocating convenience form of the `decode` operation named
/// in the format's external interface; see [`decode_to_buf`] for the
/// buffer-in/buffer-out form that works without an allocator.
#[cfg(feature = "alloc")]
#[inline]
pub fn decode(bytes: &[u8], out_channels: u8) -> Result<(Vec<u8>, Descriptor)> {
    decode_to_vec(bytes, out_channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scenario_s1() {
        let bytes = [
            b'q', b'o', b'i', b'f', 0, 0, 0, 1, 0, 0, 0, 1, 4, 0, 0xc0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        let (pixels, desc) = decode_to_vec(&bytes, 4).unwrap();
        assert_eq!(pixels, vec![0, 0, 0, 0]);
        assert_eq!(desc.width, 1);
        assert_eq!(desc.height, 1);
    }

    #[test]
    fn rejects_bad_out_channels() {
        let bytes = [
            b'q', b'o', b'i', b'f', 0, 0, 0, 1, 0, 0, 0, 1, 4, 0, 0xc0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert_eq!(decode_to_vec(&bytes, 5), Err(Error::InvalidChannels));
    }

    #[test]
    fn truncated_stream_repeats_last_pixel_instead_of_erroring() {
        // Header declares 3 pixels, but only one RGBA chunk is present
        // before the trailer: pixels 2 and 3 must repeat pixel 1 rather
        // than erroring (Q3).
        let mut bytes = vec![b'q', b'o', b'i', b'f'];
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&3u32.to_be_bytes());
        bytes.push(4);
        bytes.push(0);
        bytes.extend_from_slice(&[0xff, 9, 8, 7, 255]);
        bytes.extend_from_slice(&[0u8; 8]);

        let (out, desc) = decode_to_vec(&bytes, 4).unwrap();
        assert_eq!(desc.height, 3);
        assert_eq!(out, vec![9, 8, 7, 255, 9, 8, 7, 255, 9, 8, 7, 255]);
    }
}
