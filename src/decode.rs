use enough::Stop;

use crate::error::PixmapError;
use crate::limits::Limits;
use crate::matrix::PixelMatrix;
use crate::stream::{ByteSource, SliceSource};

/// Decode request: a source plus optional limits.
///
/// ```
/// use plainppm::{DecodeRequest, Unstoppable};
///
/// let image = DecodeRequest::new(b"P3 1 1 255 255 0 0").decode(Unstoppable)?;
/// assert_eq!(image.width(), 1);
/// assert_eq!(image.pixels()[0].red, 1.0);
/// # Ok::<(), plainppm::PixmapError>(())
/// ```
pub struct DecodeRequest<'l, S> {
    source: S,
    limits: Option<&'l Limits>,
}

impl<'a> DecodeRequest<'static, SliceSource<'a>> {
    /// Decode from an in-memory buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_source(SliceSource::new(data))
    }
}

impl<S: ByteSource> DecodeRequest<'static, S> {
    /// Decode from any byte source.
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            limits: None,
        }
    }
}

impl<'l, S: ByteSource> DecodeRequest<'l, S> {
    /// Reject images whose header exceeds `limits`, before reading pixels.
    pub fn with_limits<'m>(self, limits: &'m Limits) -> DecodeRequest<'m, S> {
        DecodeRequest {
            source: self.source,
            limits: Some(limits),
        }
    }

    /// Decode exactly one image. Bytes after the last pixel are not read.
    pub fn decode(self, stop: impl Stop) -> Result<PixelMatrix, PixmapError> {
        crate::ppm::decode(self.source, self.limits, &stop)
    }
}
