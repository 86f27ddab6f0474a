use std::fmt;

use crate::foundation::error::{HemicycleError, HemicycleResult};

/// Alpha applied to a coalition color when it tints a member of another current.
pub const COALITION_TINT_ALPHA: u8 = 0xCC;

/// Straight-alpha RGBA8 color, read from and written as a CSS hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 for opaque).
    pub a: u8,
}

impl Rgb8 {
    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> HemicycleResult<Self> {
        let raw = s.trim();
        let hex = raw.strip_prefix('#').unwrap_or(raw);

        fn hex_byte(pair: &str, raw: &str) -> HemicycleResult<u8> {
            u8::from_str_radix(pair, 16).map_err(|_| {
                HemicycleError::validation(format!("invalid hex byte \"{pair}\" in color \"{raw}\""))
            })
        }

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HemicycleError::validation(format!(
                "color \"{raw}\" must contain hex digits only"
            )));
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, c) in channels.iter_mut().zip(hex.chars()) {
                    let doubled: String = [c, c].iter().collect();
                    *slot = hex_byte(&doubled, raw)?;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => Ok(Self::rgb(
                hex_byte(&hex[0..2], raw)?,
                hex_byte(&hex[2..4], raw)?,
                hex_byte(&hex[4..6], raw)?,
            )),
            8 => Ok(Self {
                r: hex_byte(&hex[0..2], raw)?,
                g: hex_byte(&hex[2..4], raw)?,
                b: hex_byte(&hex[4..6], raw)?,
                a: hex_byte(&hex[6..8], raw)?,
            }),
            _ => Err(HemicycleError::validation(format!(
                "color \"{raw}\" must be #RGB, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

    /// Same color with a replaced alpha channel.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Whether two colors share their RGB channels, ignoring alpha.
    pub fn same_rgb(self, other: Rgb8) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgb8::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}
