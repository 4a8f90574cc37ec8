//! Drawing value objects.
//!
//! A [`Segment`] is the atomic unit of incremental drawing: one straight
//! line between two canvas-local points, in a single color and width.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Canvas-local pixel coordinate. Both components are finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Unchecked wire form of [`Point`]; serde maps out-of-range floats to infinity.
#[derive(Deserialize)]
struct RawPoint {
    x: f32,
    y: f32,
}

impl TryFrom<RawPoint> for Point {
    type Error = ValueObjectError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::new(raw.x, raw.y)
    }
}

impl Point {
    pub fn new(x: f32, y: f32) -> Result<Self, ValueObjectError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValueObjectError::PointNotFinite);
        }
        Ok(Self { x, y })
    }
}

/// Stroke color in `#rrggbb` form, stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(ValueObjectError::ColorInvalidFormat(value));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Black, the default brush color.
    pub fn black() -> Self {
        Self("#000000".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl TryFrom<String> for Color {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stroke width in pixels, 1 to 50 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StrokeWidth(u8);

impl StrokeWidth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 50;
    /// Default brush width
    pub const DEFAULT: StrokeWidth = StrokeWidth(3);

    pub fn new(value: u32) -> Result<Self, ValueObjectError> {
        if value < u32::from(Self::MIN) || value > u32::from(Self::MAX) {
            return Err(ValueObjectError::StrokeWidthOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for StrokeWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for StrokeWidth {
    type Error = ValueObjectError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StrokeWidth> for u32 {
    fn from(value: StrokeWidth) -> Self {
        u32::from(value.0)
    }
}

impl fmt::Display for StrokeWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One straight-line drawing increment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub width: StrokeWidth,
}

impl Segment {
    pub fn new(from: Point, to: Point, color: Color, width: StrokeWidth) -> Self {
        Self {
            from,
            to,
            color,
            width,
        }
    }
}
