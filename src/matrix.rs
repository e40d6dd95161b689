use alloc::vec::Vec;

use crate::error::PixmapError;
use crate::pixel::Color;

/// Decoded image: `height` rows of `width` colors, stored row-major.
///
/// Every row has the same length; constructors enforce this and never hand
/// out a ragged matrix. Both dimensions are at least 1.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelMatrix {
    pixels: Vec<Color>,
    width: usize,
}

impl PixelMatrix {
    /// Build a matrix from rows, rejecting ragged or empty input.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, PixmapError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(PixmapError::EmptyImage);
        }
        let mut pixels = Vec::with_capacity(width.saturating_mul(rows.len()));
        for (row, colors) in rows.into_iter().enumerate() {
            if colors.len() != width {
                return Err(PixmapError::NonRectangularMatrix {
                    row,
                    expected: width,
                    found: colors.len(),
                });
            }
            pixels.extend(colors);
        }
        Ok(Self { pixels, width })
    }

    /// Build a `width` x `height` matrix by calling `f(x, y)` for each pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, PixmapError>
    where
        F: FnMut(usize, usize) -> Color,
    {
        let len = checked_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self { pixels, width })
    }

    /// A `width` x `height` matrix of one color.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self, PixmapError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            pixels: alloc::vec![color; len],
            width,
        })
    }

    /// Wrap a row-major buffer whose length is already known to be
    /// `width * height`, both non-zero.
    pub(crate) fn from_parts(pixels: Vec<Color>, width: usize) -> Self {
        debug_assert!(width > 0 && !pixels.is_empty() && pixels.len() % width == 0);
        Self { pixels, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.pixels.len() / self.width
    }

    /// Row `y`, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[Color]> {
        let start = y.checked_mul(self.width)?;
        self.pixels.get(start..start.checked_add(self.width)?)
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Color> {
        self.pixels.chunks_exact(self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Color> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(y.checked_mul(self.width)?.checked_add(x)?)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Color> {
        if x >= self.width {
            return None;
        }
        self.pixels.get_mut(y.checked_mul(self.width)?.checked_add(x)?)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Quantize every pixel to 8-bit RGB.
    #[cfg(feature = "rgb")]
    pub fn to_rgb8(&self) -> Result<Vec<rgb::RGB8>, PixmapError> {
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, color)| {
                let [r, g, b] = quantize(color, i / self.width, i % self.width)?;
                Ok(rgb::RGB8::new(r, g, b))
            })
            .collect()
    }

    /// Copy into an [`imgref::ImgVec`] of 8-bit pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> Result<imgref::ImgVec<rgb::RGB8>, PixmapError> {
        Ok(imgref::ImgVec::new(
            self.to_rgb8()?,
            self.width,
            self.height(),
        ))
    }

    /// Build a matrix from an [`imgref::ImgRef`] of 8-bit pixels.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB8>) -> Result<Self, PixmapError> {
        let len = checked_len(img.width(), img.height())?;
        let mut pixels = Vec::with_capacity(len);
        for row in img.rows() {
            pixels.extend(row.iter().map(|&px| Color::from(px)));
        }
        Ok(Self::from_parts(pixels, img.width()))
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, PixmapError> {
    if width == 0 || height == 0 {
        return Err(PixmapError::EmptyImage);
    }
    width
        .checked_mul(height)
        .ok_or(PixmapError::DimensionsTooLarge {
            width: width as u64,
            height: height as u64,
        })
}

/// Quantize one color, naming the first component that overflows.
pub(crate) fn quantize(color: &Color, row: usize, column: usize) -> Result<[u8; 3], PixmapError> {
    let mut out = [0u8; 3];
    for (slot, value) in out.iter_mut().zip(color.to_array()) {
        *slot = crate::pixel::denormalize(value).ok_or(PixmapError::EncodingOverflow {
            row,
            column,
            value,
        })?;
    }
    Ok(out)
}
