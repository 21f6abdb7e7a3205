use core::fmt::{self, Display};

/// Errors that may occur while encoding or decoding an image.
///
/// A single enum backs both directions: callers match on one type regardless
/// of whether they called [`crate::encode`] or [`crate::decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The image descriptor supplied to the encoder is invalid: width or
    /// height is zero, channels is outside `{3, 4}`, or colorspace is
    /// outside `{0, 1}`.
    InvalidDescriptor,

    /// The encoded header is invalid: the input is too short, the magic
    /// bytes don't match, or a header field is out of range.
    BadHeader,

    /// The requested decoder output channel count is not `0`, `3`, or `4`.
    InvalidChannels,

    /// The output buffer could not be provisioned (too small, in the
    /// `_to_buf` entry points, or the `_to_vec` wrappers couldn't allocate).
    AllocationFailed,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDescriptor => f.write_str(
                "invalid image descriptor: width/height must be non-zero, channels must be 3 or 4, colorspace must be 0 or 1",
            ),
            Error::BadHeader => {
                f.write_str("invalid qoi header: too short, bad magic, or a field out of range")
            }
            Error::InvalidChannels => f.write_str("requested output channels must be 0, 3, or 4"),
            Error::AllocationFailed => f.write_str("output buffer could not be provisioned"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Convenience alias used throughout the public API.
pub type Result<T> = core::result::Result<T, Error>;
