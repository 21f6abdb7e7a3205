#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

use crate::consts::{
    QOI_HEADER_SIZE, QOI_OP_INDEX, QOI_OP_RGB, QOI_OP_RGBA, QOI_OP_RUN, QOI_TRAILER, QOI_TRAILER_SIZE,
};
use crate::error::{Error, Result};
use crate::header::{encode_header, Descriptor};
use crate::pixel::Pixel;
use crate::predictor::Predictor;

/// Upper bound on the encoded size of an image matching `desc`: the worst
/// case where every pixel becomes a 4- or 5-byte literal chunk. Use this to
/// size a buffer for [`encode_to_buf`] without going through [`encode`].
///
/// 3-channel images still reserve a 5-byte slot for their first pixel: `prev`
/// starts at alpha 0 (I1) while every 3-channel input pixel carries alpha 255
/// (I3), so the first pixel always takes the RGBA branch regardless of its
/// RGB value (S5), one byte more than the per-pixel bound below would budget.
#[inline]
pub fn max_encoded_len(desc: &Descriptor) -> usize {
    let n_pixels = desc.n_pixels();
    let in_channels = desc.channels.count();
    let first_pixel_rgba_surcharge = usize::from(in_channels == 3);
    QOI_HEADER_SIZE
        + n_pixels.saturating_mul(in_channels + 1)
        + first_pixel_rgba_surcharge
        + QOI_TRAILER_SIZE
}

/// Encodes `pixels` (a flat `width * height * channels` byte buffer, in
/// RGB or RGBA order per `desc.channels`) into `output`.
///
/// Returns the number of bytes written, which is always `<=
/// max_encoded_len(desc)` and `<= output.len()`.
///
/// `output` must be at least [`max_encoded_len`] bytes or this returns
/// [`Error::AllocationFailed`]; `desc` is assumed already validated (it was
/// constructed via [`Descriptor::new`]).
pub fn encode_to_buf(pixels: &[u8], desc: &Descriptor, output: &mut [u8]) -> Result<usize> {
    let required = max_encoded_len(desc);
    if output.len() < required {
        return Err(Error::AllocationFailed);
    }

    let in_channels = desc.channels.count();
    let n_pixels = desc.n_pixels();
    debug_assert_eq!(pixels.len(), n_pixels * in_channels, "pixel buffer length must match width*height*channels");

    output[..QOI_HEADER_SIZE].copy_from_slice(&encode_header(desc));

    let mut predictor = Predictor::new();
    let mut p = QOI_HEADER_SIZE;
    let last = n_pixels.saturating_sub(1);

    for (i, chunk) in pixels.chunks_exact(in_channels).take(n_pixels).enumerate() {
        let px = match in_channels {
            4 => Pixel::new(chunk[0], chunk[1], chunk[2], chunk[3]),
            // I3: 3-channel input always carries alpha = 255, never a stale
            // leftover value.
            _ => Pixel::new(chunk[0], chunk[1], chunk[2], 0xff),
        };

        if px == predictor.prev {
            predictor.run += 1;
            if predictor.run == 62 || i == last {
                output[p] = QOI_OP_RUN | (predictor.run - 1);
                p += 1;
                predictor.run = 0;
            }
            // I4 exception: a repeated pixel never touches `index`.
            continue;
        }

        if predictor.run > 0 {
            output[p] = QOI_OP_RUN | (predictor.run - 1);
            p += 1;
            predictor.run = 0;
        }

        let h = px.hash_index();
        if predictor.index[h as usize] == px {
            output[p] = QOI_OP_INDEX | h;
            p += 1;
        } else {
            predictor.index[h as usize] = px;

            if px.a == predictor.prev.a {
                if let Some(byte) = px.diff_op(predictor.prev) {
                    output[p] = byte;
                    p += 1;
                } else if let Some([b1, b2]) = px.luma_op(predictor.prev) {
                    output[p] = b1;
                    output[p + 1] = b2;
                    p += 2;
                } else {
                    output[p] = QOI_OP_RGB;
                    output[p + 1] = px.r;
                    output[p + 2] = px.g;
                    output[p + 3] = px.b;
                    p += 4;
                }
            } else {
                output[p] = QOI_OP_RGBA;
                output[p + 1] = px.r;
                output[p + 2] = px.g;
                output[p + 3] = px.b;
                output[p + 4] = px.a;
                p += 5;
            }
        }

        predictor.prev = px;
    }

    output[p..p + QOI_TRAILER_SIZE].copy_from_slice(&QOI_TRAILER);
    p += QOI_TRAILER_SIZE;

    Ok(p)
}

/// Encodes `pixels` into a freshly allocated, exactly-sized `Vec<u8>`.
#[cfg(feature = "alloc")]
#[inline]
pub fn encode_to_vec(pixels: &[u8], desc: &Descriptor) -> Result<Vec<u8>> {
    let mut out = vec![0u8; max_encoded_len(desc)];
    let n = encode_to_buf(pixels, desc, &mut out)?;
    out.truncate(n);
    Ok(out)
}

/// Encodes `pixels` described by `desc` into a newly allocated byte buffer.
///
/// This is the allocating convenience form of the `encode` operation named
/// in the format's external interface; see [`encode_to_buf`] for the
/// buffer-in/buffer-out form that works without an allocator.
#[cfg(feature = "alloc")]
#[inline]
pub fn encode(pixels: &[u8], desc: &Descriptor) -> Result<Vec<u8>> {
    encode_to_vec(pixels, desc)
}
