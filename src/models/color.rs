use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tracker colour, persisted as `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Colours offered by the creation flow, in picker order.
    pub const PALETTE: [Rgba; 18] = [
        Rgba::rgb(255, 101, 91),
        Rgba::rgb(255, 155, 38),
        Rgba::rgb(0, 146, 251),
        Rgba::rgb(130, 99, 255),
        Rgba::rgb(55, 212, 124),
        Rgba::rgb(237, 136, 220),
        Rgba::rgb(251, 221, 220),
        Rgba::rgb(62, 183, 254),
        Rgba::rgb(79, 231, 173),
        Rgba::rgb(69, 72, 143),
        Rgba::rgb(255, 126, 95),
        Rgba::rgb(255, 173, 214),
        Rgba::rgb(249, 206, 156),
        Rgba::rgb(139, 168, 247),
        Rgba::rgb(151, 78, 244),
        Rgba::rgb(189, 114, 225),
        Rgba::rgb(159, 139, 235),
        Rgba::rgb(49, 213, 107),
    ];

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: u8::MAX,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = AppError;

    /// Accepts `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| AppError::InvalidInput {
            field: "color",
            reason: reason.into(),
        };

        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(err("must be #RRGGBB or #RRGGBBAA"));
        }

        let channel = |range: std::ops::Range<usize>| -> Result<u8, AppError> {
            let part = hex.get(range).ok_or_else(|| err("truncated hex value"))?;
            u8::from_str_radix(part, 16).map_err(|_| err("invalid hex digit"))
        };

        let a = if hex.len() == 8 { channel(6..8)? } else { u8::MAX };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a,
        })
    }
}

impl TryFrom<String> for Rgba {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgba::rgb(255, 101, 91).to_hex(), "#FF655BFF");
        let color = Rgba {
            r: 0,
            g: 1,
            b: 2,
            a: 3,
        };
        assert_eq!(color.to_string(), "#00010203");
    }

    #[test]
    fn test_parse_rgb_defaults_to_opaque() {
        let color: Rgba = "#00ff80".parse().unwrap();
        assert_eq!(color, Rgba::rgb(0, 255, 128));
    }

    #[test]
    fn test_parse_rgba() {
        let color: Rgba = "11223344".parse().unwrap();
        assert_eq!(
            color,
            Rgba {
                r: 0x11,
                g: 0x22,
                b: 0x33,
                a: 0x44,
            }
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!("#fff".parse::<Rgba>().is_err());
        assert!("#gg0000".parse::<Rgba>().is_err());
        assert!("#ff00ff0".parse::<Rgba>().is_err());
        assert!("#ÿÿÿ".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_palette_is_opaque_and_distinct() {
        let unique: std::collections::HashSet<_> = Rgba::PALETTE.iter().collect();
        assert_eq!(unique.len(), Rgba::PALETTE.len());
        assert!(Rgba::PALETTE.iter().all(|c| c.a == u8::MAX));
    }
}
