use alloc::string::String;
use enough::StopReason;

/// Errors from plain PPM decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PixmapError {
    #[error("malformed label: expected \"P3\", got {0:?}")]
    MalformedLabel(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("unexpected end of input")]
    TruncatedStream,

    #[error("component {token:?} at row {row}, column {column} is not an integer in 0..=255")]
    OutOfRangeComponent {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("row {row} has {found} pixels, expected {expected}")]
    NonRectangularMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("component {value} at row {row}, column {column} does not fit in 0..=255")]
    EncodingOverflow { row: usize, column: usize, value: f64 },

    #[error("image has no pixels")]
    EmptyImage,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("sink accepted {written} of {expected} bytes")]
    ShortWrite { expected: usize, written: usize },

    #[error("i/o error: {0}")]
    Io(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PixmapError {
    fn from(r: StopReason) -> Self {
        PixmapError::Cancelled(r)
    }
}
