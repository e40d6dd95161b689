//! Plain PPM (P3): magic label, three header integers, then one decimal
//! triple per pixel, all whitespace separated with `#` line comments.
//!
//! Decoding groups tokens into per-pixel triples and interprets each triple
//! as soon as it is complete, so memory stays at one pixel of tokens plus
//! the [`PixelMatrix`] itself. Encoding first renders the whole image to an
//! intermediate token form (validating every color) and only then writes
//! text. Failure at any point discards everything built so far.

mod decode;
mod encode;
pub(crate) mod token;

pub use encode::TextLayout;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::PixmapError;
use crate::info::ImageInfo;
use crate::limits::Limits;
use crate::matrix::PixelMatrix;
use crate::stream::{ByteSink, ByteSource};
use token::{Token, Tokenizer};

/// Magic label every plain pixmap starts with.
pub const FORMAT_LABEL: &str = "P3";

/// Interpreted header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PpmHeader {
    pub width: u32,
    pub height: u32,
}

/// Textual image: header and pixel tokens ready to be laid out.
///
/// Pixel triples are stored row-major, `width * height` of them.
#[derive(Debug)]
pub(crate) struct Intermediate {
    pub header: [Token; 3],
    pub pixels: Vec<[Token; 3]>,
    pub width: usize,
    pub height: usize,
}

/// Probe the label and header without reading pixels.
pub(crate) fn probe_header<S: ByteSource>(source: S) -> Result<ImageInfo, PixmapError> {
    let mut tokens = Tokenizer::new(source);
    let header = decode::read_header(&mut tokens)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
    })
}

/// Decode one image from `source` (called from DecodeRequest).
pub(crate) fn decode<S: ByteSource>(
    source: S,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelMatrix, PixmapError> {
    let mut tokens = Tokenizer::new(source);
    decode::read_pixels(&mut tokens, limits, stop)
}

/// Encode `matrix` into `sink` (called from EncodeRequest).
pub(crate) fn encode<W: ByteSink>(
    matrix: &PixelMatrix,
    layout: &TextLayout,
    sink: &mut W,
    stop: &dyn Stop,
) -> Result<(), PixmapError> {
    layout.validate()?;
    let image = encode::to_intermediate(matrix, stop)?;
    encode::write_text(&image, layout, sink, stop)
}
