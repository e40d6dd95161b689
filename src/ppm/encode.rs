//! P3 encoding: quantize colors to decimal tokens, then lay them out as text.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Write;
use alloc::vec::Vec;

use enough::Stop;

use super::token::Token;
use super::{FORMAT_LABEL, Intermediate};
use crate::error::PixmapError;
use crate::matrix::{PixelMatrix, quantize};
use crate::pixel::MAX_COLOR_VALUE;
use crate::stream::ByteSink;

/// Cosmetic layout of the pixel section.
///
/// Each image row is split into lines of at most `columns` pixels, pixels on
/// a line joined by `separator`, and a blank line follows every row. The
/// decoder ignores all of this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayout {
    pub columns: usize,
    pub separator: String,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            separator: "  ".into(),
        }
    }
}

impl TextLayout {
    pub(crate) fn validate(&self) -> Result<(), PixmapError> {
        if self.columns == 0 {
            return Err(PixmapError::InvalidOptions("columns must be at least 1".into()));
        }
        // Anything else would merge or corrupt tokens on the way back in.
        let blank = self.separator.bytes().all(|b| matches!(b, b' ' | b'\t'));
        if self.separator.is_empty() || !blank {
            return Err(PixmapError::InvalidOptions(format!(
                "separator {:?} must be one or more spaces or tabs",
                self.separator
            )));
        }
        Ok(())
    }
}

/// Semantic encode: header and pixel tokens for `matrix`.
///
/// Every color is checked before anything is written; one component that
/// leaves `0..=255` after denormalization fails the whole image.
pub(crate) fn to_intermediate(
    matrix: &PixelMatrix,
    stop: &dyn Stop,
) -> Result<Intermediate, PixmapError> {
    let width = matrix.width();
    let height = matrix.height();

    let header = [
        Token::from(width.to_string()),
        Token::from(height.to_string()),
        Token::from(format!("{MAX_COLOR_VALUE:03}")),
    ];

    let mut pixels = Vec::with_capacity(matrix.pixels().len());
    for (y, row) in matrix.rows().enumerate() {
        stop.check()?;
        for (x, color) in row.iter().enumerate() {
            let [r, g, b] = quantize(color, y, x)?;
            pixels.push([
                Token::from(r.to_string()),
                Token::from(g.to_string()),
                Token::from(b.to_string()),
            ]);
        }
    }

    log::debug!("encoding {width}x{height} P3 image");
    Ok(Intermediate {
        header,
        pixels,
        width,
        height,
    })
}

/// Structural encode: write the label line, header line and pixel rows.
pub(crate) fn write_text<W: ByteSink>(
    image: &Intermediate,
    layout: &TextLayout,
    sink: &mut W,
    stop: &dyn Stop,
) -> Result<(), PixmapError> {
    write_line(sink, &format!("{FORMAT_LABEL}  # Plain portable pixmap"))?;

    let [w, h, max] = &image.header;
    write_line(
        sink,
        &format!(
            "{} {} {}  # Width, Height, Max color component value",
            w.as_str(),
            h.as_str(),
            max.as_str()
        ),
    )?;
    write_line(sink, "")?;

    let mut line = String::new();
    for row in image.pixels.chunks_exact(image.width) {
        stop.check()?;
        for chunk in row.chunks(layout.columns) {
            line.clear();
            for (i, [r, g, b]) in chunk.iter().enumerate() {
                if i > 0 {
                    line.push_str(&layout.separator);
                }
                // formatting into a String cannot fail
                let _ = write!(line, "{:>3} {:>3} {:>3}", r.as_str(), g.as_str(), b.as_str());
            }
            write_line(sink, &line)?;
        }
        write_line(sink, "")?;
    }
    Ok(())
}

fn write_line<W: ByteSink>(sink: &mut W, line: &str) -> Result<(), PixmapError> {
    write_all(sink, line.as_bytes())?;
    write_all(sink, b"\n")
}

fn write_all<W: ByteSink>(sink: &mut W, data: &[u8]) -> Result<(), PixmapError> {
    if data.is_empty() {
        return Ok(());
    }
    let written = sink.write(data)?;
    if written < data.len() {
        return Err(PixmapError::ShortWrite {
            expected: data.len(),
            written,
        });
    }
    Ok(())
}
