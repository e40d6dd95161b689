//! # plainppm
//!
//! Decoder and encoder for the plain (ASCII) portable pixmap format, P3.
//!
//! A P3 stream is the label `P3`, a `width height maxval` header and then
//! `width * height` decimal `r g b` triples, separated by any run of spaces,
//! tabs, CR or LF. `#` starts a comment that runs to the end of the line.
//!
//! Decoded images are [`PixelMatrix`] values of [`Color`]s with components
//! normalized to `0.0..=1.0`. Encoding quantizes them back to bytes and writes
//! a fixed, human-friendly layout (see [`TextLayout`]).
//!
//! ## Restrictions
//!
//! - The max color value must be exactly 255. Streams declaring any other
//!   value, including ones the wider netpbm family allows, are rejected.
//! - One image per stream; trailing bytes after the last pixel are ignored.
//! - No binary variants (P6 and friends).
//!
//! ## Usage
//!
//! ```
//! use plainppm::{DecodeRequest, EncodeRequest, Unstoppable};
//!
//! let image = DecodeRequest::new(b"P3 1 2 255 0 128 255 128 255 0").decode(Unstoppable)?;
//! assert_eq!((image.width(), image.height()), (1, 2));
//!
//! let text = EncodeRequest::new().encode(&image, Unstoppable)?;
//! assert_eq!(
//!     text,
//!     b"P3  # Plain portable pixmap\n\
//!       1 2 255  # Width, Height, Max color component value\n\
//!       \n  0 128 255\n\n128 255   0\n\n"
//! );
//! # Ok::<(), plainppm::PixmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod matrix;
mod pixel;

pub mod ppm;
pub mod stream;

mod decode;
mod encode;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::PixmapError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use matrix::PixelMatrix;
pub use pixel::{Channel, Color, MAX_COLOR_VALUE, denormalize, normalize};
pub use ppm::TextLayout;
pub use stream::{ByteSink, ByteSource, SliceSource};

/// Decode a P3 image from memory.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<PixelMatrix, PixmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode with the default layout.
pub fn encode(matrix: &PixelMatrix, stop: impl Stop) -> Result<alloc::vec::Vec<u8>, PixmapError> {
    EncodeRequest::new().encode(matrix, stop)
}
