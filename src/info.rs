use crate::error::PixmapError;
use crate::stream::{ByteSource, SliceSource};

/// Image dimensions read from the header alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Probe the label and header without touching pixel data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PixmapError> {
        Self::from_source(SliceSource::new(data))
    }

    /// Probe a byte source; only the label and header tokens are consumed.
    pub fn from_source<S: ByteSource>(source: S) -> Result<Self, PixmapError> {
        crate::ppm::probe_header(source)
    }
}
