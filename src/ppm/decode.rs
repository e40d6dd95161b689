//! P3 decoding: label and header checks, token grouping, component parsing.

use alloc::format;
use alloc::vec::Vec;

use enough::Stop;

use super::token::{Token, Tokenizer};
use super::{FORMAT_LABEL, PpmHeader};
use crate::error::PixmapError;
use crate::limits::Limits;
use crate::matrix::PixelMatrix;
use crate::pixel::{Color, MAX_COLOR_VALUE, normalize};
use crate::stream::ByteSource;

/// Upper bound on up-front reservation; headers are untrusted.
const MAX_PREALLOC_PIXELS: usize = 1 << 16;

/// Read and check the label, then read and interpret the header.
pub(crate) fn read_header<S: ByteSource>(
    tokens: &mut Tokenizer<S>,
) -> Result<PpmHeader, PixmapError> {
    let header = read_header_tokens(tokens)?;
    interpret_header(&header)
}

fn read_header_tokens<S: ByteSource>(
    tokens: &mut Tokenizer<S>,
) -> Result<[Token; 3], PixmapError> {
    let label = tokens.next_token()?.ok_or(PixmapError::TruncatedStream)?;
    if label.as_str() != FORMAT_LABEL {
        return Err(PixmapError::MalformedLabel(label.into_string()));
    }
    tokens.next_triple()
}

/// Turn the three header tokens into validated dimensions.
///
/// Width and height must be positive integers. The max value must be exactly
/// 255; other values the wider format allows (up to 65535) are rejected.
pub(crate) fn interpret_header(tokens: &[Token; 3]) -> Result<PpmHeader, PixmapError> {
    let width = parse_dimension(&tokens[0], "width")?;
    let height = parse_dimension(&tokens[1], "height")?;

    let max = tokens[2].as_str();
    match max.parse::<i64>() {
        Ok(v) if v == i64::from(MAX_COLOR_VALUE) => {}
        Ok(v) => {
            return Err(PixmapError::MalformedHeader(format!(
                "max color value {v} is not {MAX_COLOR_VALUE}"
            )));
        }
        Err(_) => {
            return Err(PixmapError::MalformedHeader(format!(
                "max color value {max:?} is not an integer"
            )));
        }
    }

    log::debug!("P3 header: {width}x{height}, max value {MAX_COLOR_VALUE}");
    Ok(PpmHeader { width, height })
}

fn parse_dimension(token: &Token, what: &str) -> Result<u32, PixmapError> {
    let s = token.as_str();
    let value = s
        .parse::<i64>()
        .map_err(|_| PixmapError::MalformedHeader(format!("{what} {s:?} is not an integer")))?;
    if value < 1 {
        return Err(PixmapError::MalformedHeader(format!(
            "{what} {value} is not positive"
        )));
    }
    u32::try_from(value)
        .map_err(|_| PixmapError::MalformedHeader(format!("{what} {value} is too large")))
}

/// Decode label, header and `height` rows of `width` pixels.
///
/// Each pixel's three tokens are grouped by the structural reader and then
/// interpreted before the next group is read, so token scratch never grows
/// past one pixel. Any failure drops the partial matrix.
pub(crate) fn read_pixels<S: ByteSource>(
    tokens: &mut Tokenizer<S>,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelMatrix, PixmapError> {
    let header = read_header(tokens)?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
        limits.check_memory(u64::from(header.width) * u64::from(header.height))?;
    }

    let w = header.width as usize;
    let h = header.height as usize;
    let count = w.checked_mul(h).ok_or(PixmapError::DimensionsTooLarge {
        width: u64::from(header.width),
        height: u64::from(header.height),
    })?;

    // A memory limit already admitted the full matrix, so reserve it exactly
    // rather than letting growth overshoot the budget.
    let bounded = limits.is_some_and(|l| l.max_memory_bytes.is_some());
    let reserve = if bounded {
        count
    } else {
        count.min(MAX_PREALLOC_PIXELS)
    };

    let mut pixels = Vec::with_capacity(reserve);
    for row in 0..h {
        stop.check()?;
        for column in 0..w {
            let triple = tokens.next_triple()?;
            pixels.push(interpret_pixel(&triple, row, column)?);
        }
    }
    Ok(PixelMatrix::from_parts(pixels, w))
}

/// Parse and normalize one pixel's component tokens.
pub(crate) fn interpret_pixel(
    [r, g, b]: &[Token; 3],
    row: usize,
    column: usize,
) -> Result<Color, PixmapError> {
    Ok(Color::new(
        parse_component(r, row, column)?,
        parse_component(g, row, column)?,
        parse_component(b, row, column)?,
    ))
}

fn parse_component(token: &Token, row: usize, column: usize) -> Result<f64, PixmapError> {
    match token.as_str().parse::<i64>() {
        Ok(v) if (0..=i64::from(MAX_COLOR_VALUE)).contains(&v) => Ok(normalize(v as u8)),
        _ => Err(PixmapError::OutOfRangeComponent {
            row,
            column,
            token: token.as_str().into(),
        }),
    }
}
