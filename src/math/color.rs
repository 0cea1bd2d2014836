use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Linear RGB color in the 0..1 range, written as `#rrggbb` at the edges
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub rgb: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { rgb: [r, g, b] }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        self.rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let color: Color = "#c7b299".parse().unwrap();
        assert_eq!(color.to_rgb8(), [0xc7, 0xb2, 0x99]);
    }

    #[test]
    fn test_parse_uppercase() {
        let color: Color = "#FF0080".parse().unwrap();
        assert_eq!(color.to_rgb8(), [255, 0, 128]);
        assert!((color.rgb[0] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("c7b299".parse::<Color>().is_err());
        assert!("#c7b29".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn test_hex_display() {
        let color = Color::from_rgb8(0x96, 0x96, 0x96);
        assert_eq!(color.to_string(), "#969696");
    }

    #[test]
    fn test_serde_as_string() {
        let color: Color = serde_json::from_str("\"#102030\"").unwrap();
        assert_eq!(color.to_rgb8(), [0x10, 0x20, 0x30]);
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#102030\"");
    }
}
