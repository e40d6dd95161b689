use core::ops::{Index, IndexMut};

/// Largest color component value a P3 stream may declare or contain.
pub const MAX_COLOR_VALUE: u8 = 255;

/// Names for the three components of a [`Color`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in stream order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of this channel in stream order (0 for red).
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// One RGB pixel with components in the unit interval.
///
/// Components are reachable by name (`color.red`), by [`Channel`]
/// (`color[Channel::Red]`) or by position (`color[0]`). All three address the
/// same field.
///
/// Decoded colors always hold components in `0.0..=1.0`. Values outside that
/// range can be constructed freely; the encoder rejects them with
/// [`crate::PixmapError::EncodingOverflow`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Build a color from 8-bit components.
    pub fn from_bytes(red: u8, green: u8, blue: u8) -> Self {
        Self::new(normalize(red), normalize(green), normalize(blue))
    }

    /// Components in stream order.
    pub fn to_array(self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    /// Component at `index` (0 = red), or `None` past blue.
    pub fn get(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.red),
            1 => Some(self.green),
            2 => Some(self.blue),
            _ => None,
        }
    }

    /// Mutable component at `index` (0 = red), or `None` past blue.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut f64> {
        match index {
            0 => Some(&mut self.red),
            1 => Some(&mut self.green),
            2 => Some(&mut self.blue),
            _ => None,
        }
    }

    /// Quantize to 8-bit components, or `None` if any component falls
    /// outside the byte range after denormalization.
    pub fn to_bytes(self) -> Option<[u8; 3]> {
        Some([
            denormalize(self.red)?,
            denormalize(self.green)?,
            denormalize(self.blue)?,
        ])
    }
}

impl From<[f64; 3]> for Color {
    fn from([red, green, blue]: [f64; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl Index<usize> for Color {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.red,
            1 => &self.green,
            2 => &self.blue,
            _ => panic!("color component index {index} out of range (0..3)"),
        }
    }
}

impl IndexMut<usize> for Color {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        match index {
            0 => &mut self.red,
            1 => &mut self.green,
            2 => &mut self.blue,
            _ => panic!("color component index {index} out of range (0..3)"),
        }
    }
}

impl Index<Channel> for Color {
    type Output = f64;

    fn index(&self, channel: Channel) -> &f64 {
        &self[channel.index()]
    }
}

impl IndexMut<Channel> for Color {
    fn index_mut(&mut self, channel: Channel) -> &mut f64 {
        &mut self[channel.index()]
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Color {
    fn from(px: rgb::RGB8) -> Self {
        Self::from_bytes(px.r, px.g, px.b)
    }
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`,
/// clamping the input to its range first.
pub(crate) fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let clamped = value.clamp(in_min, in_max);
    out_min + (clamped - in_min) / (in_max - in_min) * (out_max - out_min)
}

/// Map a byte component onto `0.0..=1.0`.
pub fn normalize(value: u8) -> f64 {
    map_range(f64::from(value), 0.0, f64::from(MAX_COLOR_VALUE), 0.0, 1.0)
}

/// Map a unit-interval component back onto `0..=255`, truncating toward
/// negative infinity. Returns `None` when the result leaves the byte range
/// (including NaN input).
///
/// `denormalize(normalize(v)) == Some(v)` for every byte `v`.
pub fn denormalize(value: f64) -> Option<u8> {
    let scaled = value * f64::from(MAX_COLOR_VALUE);
    // `floor` is not in core; for non-negative values truncation is floor,
    // and any negative value floors below zero.
    if scaled.is_nan() || scaled < 0.0 || scaled >= f64::from(MAX_COLOR_VALUE) + 1.0 {
        return None;
    }
    Some(scaled as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_roundtrips_every_byte() {
        for v in 0..=255u8 {
            assert_eq!(denormalize(normalize(v)), Some(v), "byte {v}");
        }
    }

    #[test]
    fn normalize_endpoints() {
        assert_eq!(normalize(0), 0.0);
        assert_eq!(normalize(255), 1.0);
        assert!((normalize(128) - 0.502).abs() < 5e-4);
    }

    #[test]
    fn denormalize_rejects_out_of_range() {
        assert_eq!(denormalize(-0.001), None);
        assert_eq!(denormalize(1.004), None);
        assert_eq!(denormalize(f64::NAN), None);
        assert_eq!(denormalize(f64::INFINITY), None);
        assert_eq!(denormalize(-0.0), Some(0));
        // floor, not round
        assert_eq!(denormalize(1.003), Some(255));
        assert_eq!(denormalize(0.9999), Some(254));
    }

    #[test]
    fn index_and_name_share_storage() {
        let mut c = Color::new(0.1, 0.2, 0.3);
        c[0] = 0.5;
        assert_eq!(c.red, 0.5);
        c.green = 0.75;
        assert_eq!(c[Channel::Green], 0.75);
        c[Channel::Blue] = 1.0;
        assert_eq!(c[2], 1.0);
        *c.get_mut(0).unwrap() = 0.0;
        assert_eq!(c.get(0), Some(0.0));
        assert_eq!(c.get(3), None);
    }

    #[test]
    #[should_panic]
    fn index_past_blue_panics() {
        let c = Color::BLACK;
        let _ = c[3];
    }
}
