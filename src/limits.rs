use crate::PixmapError;

/// Resource limits for decode operations.
///
/// Every limit is checked against the dimensions declared in the P3 header,
/// before the first pixel token is read. A stream that passes never
/// allocates more than the matrix those dimensions imply, plus one pixel of
/// token scratch.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes the decoder may hold for the pixel matrix. When set,
    /// the matrix is reserved exactly once at its final size.
    pub max_memory_bytes: Option<u64>,
}

fn over(what: &str, value: u64, limit: Option<u64>) -> Result<(), PixmapError> {
    match limit {
        Some(max) if value > max => Err(PixmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check header width and height, and their product, against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PixmapError> {
        let (width, height) = (u64::from(width), u64::from(height));
        over("width", width, self.max_width)?;
        over("height", height, self.max_height)?;
        over("pixel count", width * height, self.max_pixels)
    }

    /// Check that a matrix of `pixels` colors fits the memory limit.
    pub(crate) fn check_memory(&self, pixels: u64) -> Result<(), PixmapError> {
        let bytes = pixels.saturating_mul(core::mem::size_of::<crate::Color>() as u64);
        over("matrix bytes", bytes, self.max_memory_bytes)
    }
}
