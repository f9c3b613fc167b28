//! Small value types shared by the layout code and the scene tree.
//!
//! Pixel geometry itself is plain `f64` / `glam::DVec2`; the types here
//! cover the things that need validation or a fixed textual form.

use std::fmt;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
    /// Value is above the accepted maximum
    TooLarge,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
            NumericError::TooLarge => write!(f, "value is too large"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
pub fn finite(value: f64) -> Result<f64, NumericError> {
    if value.is_nan() {
        Err(NumericError::NaN)
    } else if value.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(value)
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub fn positive(value: f64) -> Result<f64, NumericError> {
    let value = finite(value)?;
    if value == 0.0 {
        Err(NumericError::Zero)
    } else if value < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(value)
    }
}

/// An sRGB color, written out as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        match hex.len() {
            6 => Some(Color {
                r: u8::from_str_radix(&hex[0..2], 16).ok()?,
                g: u8::from_str_radix(&hex[2..4], 16).ok()?,
                b: u8::from_str_radix(&hex[4..6], 16).ok()?,
            }),
            3 => {
                // Expand 3-digit hex: #abc -> #aabbcc
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color {
                    r: r * 17,
                    g: g * 17,
                    b: b * 17,
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A width or height: absolute pixels, or a percentage of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dimension {
    Px(f64),
    Percent(f64),
}

impl Dimension {
    pub const FULL: Dimension = Dimension::Percent(100.0);
}
