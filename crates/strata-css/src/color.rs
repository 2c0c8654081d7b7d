//! CSS Color values
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The basic sixteen HTML colors plus `transparent`.
const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("white", [255, 255, 255, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("red", [255, 0, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("olive", [128, 128, 0, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("blue", [0, 0, 255, 255]),
    ("teal", [0, 128, 128, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("transparent", [0, 0, 0, 0]),
];

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    ///
    /// The leading `#` is required.
    #[must_use]
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#')?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        // "The three-digit RGB notation (#RGB) is converted into six-digit form
        // (#RRGGBB) by replicating digits, not by adding zeros."
        let short = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self {
                a: short(3)?,
                ..Self::rgb(short(0)?, short(1)?, short(2)?)
            }),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self {
                a: long(6)?,
                ..Self::rgb(long(0)?, long(2)?, long(4)?)
            }),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, [r, g, b, a])| Self { r, g, b, a })
    }

    /// Parse a single color keyword or hex color.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.starts_with('#') {
            Self::from_hex(text)
        } else {
            Self::from_named(text)
        }
    }

    /// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
    ///
    /// Opaque color from a hue in degrees and saturation/lightness percentages.
    #[must_use]
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
        Self::rgb(r, g, b)
    }

    /// Convert to hex string notation (#rrggbb or #rrggbbaa if alpha != 255)
    ///
    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb)
///
/// - hue: angle in degrees (wraps into [0, 360))
/// - saturation: percentage, 0-100
/// - lightness: percentage, 0-100
///
/// Each channel is rounded to the nearest integer in [0, 255].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let hue = hue.rem_euclid(360.0);
    let sat = saturation.clamp(0.0, 100.0) / 100.0;
    let light = lightness.clamp(0.0, 100.0) / 100.0;

    // Chroma, the intermediate value for the second-largest component, and
    // the lightness match added to every channel.
    let chroma = (1.0 - (2.0 * light - 1.0).abs()) * sat;
    let second = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let offset = light - chroma / 2.0;

    let (red, green, blue) = match (hue / 60.0) as u32 {
        0 => (chroma, second, 0.0),
        1 => (second, chroma, 0.0),
        2 => (0.0, chroma, second),
        3 => (0.0, second, chroma),
        4 => (second, 0.0, chroma),
        _ => (chroma, 0.0, second),
    };

    let to_u8 = |channel: f64| ((channel + offset) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(red), to_u8(green), to_u8(blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 100.0, 50.0), (255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 100.0, 50.0), (0, 255, 0));
        assert_eq!(hsl_to_rgb(240.0, 100.0, 50.0), (0, 0, 255));
    }

    #[test]
    fn test_hsl_hue_wraps() {
        assert_eq!(hsl_to_rgb(360.0, 100.0, 50.0), hsl_to_rgb(0.0, 100.0, 50.0));
        assert_eq!(hsl_to_rgb(-120.0, 100.0, 50.0), hsl_to_rgb(240.0, 100.0, 50.0));
    }

    #[test]
    fn test_hsl_vivid_palette_entry() {
        assert_eq!(ColorValue::from_hsl(0.0, 90.0, 55.0).to_hex_string(), "#f42525");
        assert_eq!(ColorValue::from_hsl(75.0, 90.0, 55.0).to_hex_string(), "#c0f425");
    }

    #[test]
    fn test_hsl_grayscale_when_unsaturated() {
        assert_eq!(hsl_to_rgb(200.0, 0.0, 50.0), (128, 128, 128));
    }
}
