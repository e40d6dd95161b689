use alloc::string::String;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::PixmapError;
use crate::matrix::PixelMatrix;
use crate::ppm::TextLayout;
use crate::stream::ByteSink;

/// Encode request with layout options.
///
/// ```
/// use plainppm::{Color, EncodeRequest, PixelMatrix, Unstoppable};
///
/// let image = PixelMatrix::filled(2, 1, Color::WHITE)?;
/// let text = EncodeRequest::new().with_columns(1).encode(&image, Unstoppable)?;
/// assert!(text.ends_with(b"255 255 255\n255 255 255\n\n"));
/// # Ok::<(), plainppm::PixmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest {
    layout: TextLayout,
}

impl EncodeRequest {
    /// Default layout: four pixels per line, two-space separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixels per output line. Must be at least 1.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.layout.columns = columns;
        self
    }

    /// Text between pixels on one line. Must be spaces or tabs.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.layout.separator = separator.into();
        self
    }

    /// Layout this request encodes with, after any builder overrides.
    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Encode to an in-memory buffer.
    pub fn encode(&self, matrix: &PixelMatrix, stop: impl Stop) -> Result<Vec<u8>, PixmapError> {
        let mut out = Vec::new();
        crate::ppm::encode(matrix, &self.layout, &mut out, &stop)?;
        Ok(out)
    }

    /// Encode into a byte sink.
    ///
    /// Pixel values are validated before the first byte is written; a failing
    /// sink can still leave a partial image behind.
    pub fn encode_to<W: ByteSink>(
        &self,
        matrix: &PixelMatrix,
        sink: &mut W,
        stop: impl Stop,
    ) -> Result<(), PixmapError> {
        crate::ppm::encode(matrix, &self.layout, sink, &stop)
    }
}
