//! Colors, with the palette names notebooks use.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

/// Straight (non-premultiplied) RGBA, channels in `0..=1`.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// `#FC6255`
    pub const RED: Self = Self::rgb(0.988, 0.384, 0.333);
    /// `#83C167`
    pub const GREEN: Self = Self::rgb(0.514, 0.757, 0.404);
    /// `#699C52`
    pub const GREEN_E: Self = Self::rgb(0.412, 0.612, 0.322);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Palette lookup, case-insensitive.
    pub fn named(name: &str) -> Option<Self> {
        const PALETTE: [(&str, Rgba); 5] = [
            ("white", Rgba::WHITE),
            ("black", Rgba::BLACK),
            ("red", Rgba::RED),
            ("green", Rgba::GREEN),
            ("green_e", Rgba::GREEN_E),
        ];
        PALETTE
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, c)| c)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Palette names or `#RRGGBB` / `#RRGGBBAA`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(c) = Self::named(s) {
            return Ok(c);
        }

        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut channels = hex
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|p| u8::from_str_radix(p, 16).ok())
                    .map(|v| f32::from(v) / 255.0)
                    .ok_or_else(invalid)
            });
        let mut next = || channels.next().unwrap_or(Ok(1.0));

        Ok(Self {
            r: next()?,
            g: next()?,
            b: next()?,
            a: next()?,
        })
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))?;
        if self.a < 1.0 {
            write!(f, "{:02X}", byte(self.a))?;
        }
        Ok(())
    }
}
