//! Color literals
//!
//! Decodes hex and `rgb()`/`rgba()` literals into [`Color`] and formats them
//! back in the notation they were written in. Colors with transparency are
//! always written as `rgba()`; 8-digit hex is never produced.

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::Serialize;
use smallvec::SmallVec;
use thiserror::Error;

/// How a color literal was written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notation {
    /// `#rgb`
    Hex3,
    /// `#rrggbb`
    #[default]
    Hex6,
    /// `#rrggbbaa`
    Hex8,
    /// `rgb(r, g, b)`
    Rgb,
    /// `rgba(r, g, b, a)`
    Rgba,
}

/// An RGBA color together with the notation it was parsed from
///
/// Equality compares the channels only; the notation is a formatting hint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub notation: Notation,
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.channels() == other.channels()
    }
}

impl Eq for Color {}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque color, formatted as `#RRGGBB`
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue, alpha: 255, notation: Notation::Hex6 }
    }

    /// Color with alpha, formatted as `rgba()`
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha, notation: Notation::Rgba }
    }

    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// `[red, green, blue, alpha]`
    pub fn channels(&self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 255
    }

    /// The same color with full opacity
    pub fn opaque(&self) -> Color {
        Color { alpha: 255, ..*self }
    }

    /// Uppercase `#RRGGBB`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Format using the notation this color was parsed from
    pub fn format(&self) -> String {
        format(self, self.notation)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Errors from decoding a color literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color literal")]
    Empty,

    #[error("invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("malformed color function '{0}'")]
    MalformedFunction(String),

    #[error("unrecognized color '{0}'")]
    Unrecognized(String),
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse_color(s)
    }
}

/// Decode a hex, `rgb()` or `rgba()` literal
pub fn parse_color(text: &str) -> Option<Color> {
    try_parse_color(text).ok()
}

/// Decode a hex, `rgb()` or `rgba()` literal, reporting why it failed
pub fn try_parse_color(text: &str) -> Result<Color, ColorError> {
    let result = decode(text.trim());
    if let Err(err) = &result {
        trace!("Rejected color literal: {}", err);
    }
    result
}

fn decode(text: &str) -> Result<Color, ColorError> {
    if text.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(text.to_string()));
    }

    if let Some((name, args)) = split_function(text) {
        let notation = match name.to_ascii_lowercase().as_str() {
            "rgb" => Notation::Rgb,
            "rgba" => Notation::Rgba,
            _ => return Err(ColorError::Unrecognized(text.to_string())),
        };
        return parse_rgb_args(args, notation).ok_or_else(|| ColorError::MalformedFunction(text.to_string()));
    }

    Err(ColorError::Unrecognized(text.to_string()))
}

/// Format `color` preferring `hint` as notation
///
/// Opaque colors keep hex or `rgb()` notation (`#rgb` only when every channel
/// fits a single nibble). Any transparency, or an `rgba` hint, yields
/// `rgba(r, g, b, a)` with alpha as a fraction to two decimals, or three when
/// two would not decode back to the same alpha byte.
pub fn format(color: &Color, hint: Notation) -> String {
    let Color { red, green, blue, alpha, .. } = *color;
    match hint {
        _ if alpha < 255 => format!("rgba({}, {}, {}, {})", red, green, blue, format_alpha(alpha)),
        Notation::Rgba => format!("rgba({}, {}, {}, {})", red, green, blue, format_alpha(alpha)),
        Notation::Rgb => format!("rgb({}, {}, {})", red, green, blue),
        Notation::Hex3 if [red, green, blue].iter().all(|c| c % 17 == 0) => {
            format!("#{:X}{:X}{:X}", red / 17, green / 17, blue / 17)
        }
        Notation::Hex3 | Notation::Hex6 | Notation::Hex8 => color.to_hex(),
    }
}

fn format_alpha(alpha: u8) -> String {
    let fraction = f64::from(alpha) / 255.0;
    let short = format!("{:.2}", fraction);
    match short.parse::<f64>() {
        Ok(value) if alpha_byte(value) == alpha => short,
        _ => format!("{:.3}", fraction),
    }
}

/// Alpha fraction to byte, clamped to `[0, 1]` first
fn alpha_byte(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn split_function(text: &str) -> Option<(&str, &str)> {
    let open = text.find('(')?;
    let args = text[open + 1..].strip_suffix(')')?;
    Some((text[..open].trim_end(), args))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);

    let color = match hex.len() {
        3 => Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?).with_notation(Notation::Hex3),
        6 => Color::rgb(byte(0)?, byte(2)?, byte(4)?),
        8 => Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?).with_notation(Notation::Hex8),
        _ => return None,
    };
    Some(color)
}

fn parse_rgb_args(args: &str, notation: Notation) -> Option<Color> {
    let parts: SmallVec<[&str; 4]> = args.split(',').map(str::trim).collect();
    let expected = if notation == Notation::Rgba { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let red = parse_channel(parts[0])?;
    let green = parse_channel(parts[1])?;
    let blue = parse_channel(parts[2])?;
    let alpha = match parts.get(3) {
        Some(part) => parse_alpha(part)?,
        None => 255,
    };

    Some(Color { red, green, blue, alpha, notation })
}

/// Channel as integer, decimal or percentage, clamped to `[0, 255]`
fn parse_channel(text: &str) -> Option<u8> {
    let value = match text.strip_suffix('%') {
        Some(percent) => parse_number(percent)? * 255.0 / 100.0,
        None => parse_number(text)?,
    };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

/// Alpha as a fraction or percentage
fn parse_alpha(text: &str) -> Option<u8> {
    let fraction = match text.strip_suffix('%') {
        Some(percent) => parse_number(percent)? / 100.0,
        None => parse_number(text)?,
    };
    Some(alpha_byte(fraction))
}

/// Plain decimal numeral; no exponents, no `inf`/`nan`
fn parse_number(text: &str) -> Option<f64> {
    let digits = text.strip_prefix(|c| c == '-' || c == '+').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    digits.parse::<f64>().ok().map(|v| if text.starts_with('-') { -v } else { v })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_notations() {
        let short = parse_color("#f0a").unwrap();
        assert_eq!(short.channels(), [0xff, 0x00, 0xaa, 255]);
        assert_eq!(short.notation, Notation::Hex3);

        let long = parse_color("#FF8000").unwrap();
        assert_eq!(long.channels(), [255, 128, 0, 255]);
        assert_eq!(long.notation, Notation::Hex6);

        let alpha = parse_color("#FF000080").unwrap();
        assert_eq!(alpha.channels(), [255, 0, 0, 128]);
        assert_eq!(alpha.notation, Notation::Hex8);
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color("#"), None);
        assert_eq!(try_parse_color("#xyz"), Err(ColorError::InvalidHex("#xyz".into())));
    }

    #[test]
    fn test_rgb_clamps_channels() {
        let color = parse_color("rgb(300, -5, 128)").unwrap();
        assert_eq!(color.channels(), [255, 0, 128, 255]);
        assert_eq!(color.notation, Notation::Rgb);
    }

    #[test]
    fn test_rgb_channel_forms() {
        let color = parse_color("RGB( 100% , 50% , 12.6 )").unwrap();
        assert_eq!(color.channels(), [255, 128, 13, 255]);
    }

    #[test]
    fn test_rgba_alpha() {
        let color = parse_color("rgba(0, 0, 255, 0.5)").unwrap();
        assert_eq!(color.channels(), [0, 0, 255, 128]);
        assert_eq!(color.notation, Notation::Rgba);

        assert_eq!(parse_color("rgba(0,0,0,2)").unwrap().alpha, 255);
        assert_eq!(parse_color("rgba(0,0,0,-1)").unwrap().alpha, 0);
        assert_eq!(parse_color("rgba(0,0,0,25%)").unwrap().alpha, 64);
    }

    #[test]
    fn test_malformed_functions() {
        for input in ["rgb(1, 2)", "rgb(1, 2, 3, 4)", "rgba(1, 2, 3)", "rgb(1,,3)", "rgb(a, b, c)", "rgb(1, 2, 3", "rgb(1e3, 0, 0)"] {
            assert!(
                matches!(try_parse_color(input), Err(ColorError::MalformedFunction(_)) | Err(ColorError::Unrecognized(_))),
                "{} should not parse",
                input
            );
        }
        assert_eq!(try_parse_color("hsv(1, 2, 3)"), Err(ColorError::Unrecognized("hsv(1, 2, 3)".into())));
        assert_eq!(try_parse_color("  "), Err(ColorError::Empty));
    }

    #[test]
    fn test_format_preserves_notation() {
        assert_eq!(parse_color("#FF0000").unwrap().format(), "#FF0000");
        assert_eq!(parse_color("#ff0000").unwrap().format(), "#FF0000");
        assert_eq!(parse_color("#f00").unwrap().format(), "#F00");
        assert_eq!(parse_color("rgb(1,2,3)").unwrap().format(), "rgb(1, 2, 3)");
        assert_eq!(parse_color("rgba(1,2,3,1)").unwrap().format(), "rgba(1, 2, 3, 1.00)");
        // Opaque 8-digit hex drops its alpha byte
        assert_eq!(parse_color("#102030FF").unwrap().format(), "#102030");
    }

    #[test]
    fn test_format_transparency_forces_rgba() {
        assert_eq!(parse_color("#FF000080").unwrap().format(), "rgba(255, 0, 0, 0.50)");
        assert_eq!(format(&Color::rgb(1, 2, 3).with_notation(Notation::Rgb), Notation::Rgb), "rgb(1, 2, 3)");
        let faded = Color { alpha: 51, ..Color::rgb(10, 20, 30) };
        assert_eq!(format(&faded, Notation::Hex3), "rgba(10, 20, 30, 0.20)");
        assert_eq!(format(&faded, Notation::Rgb), "rgba(10, 20, 30, 0.20)");
    }

    #[test]
    fn test_format_hex3_hint_with_wide_channels() {
        assert_eq!(format(&Color::rgb(0x12, 0x34, 0x56), Notation::Hex3), "#123456");
        assert_eq!(format(&Color::rgb(0x11, 0x22, 0x33), Notation::Hex3), "#123");
    }

    #[test]
    fn test_format_alpha_precision() {
        // 1/255 rounds to 0.00 at two decimals
        assert_eq!(format(&Color::rgba(0, 0, 0, 1), Notation::Rgba), "rgba(0, 0, 0, 0.004)");
        assert_eq!(format(&Color::rgba(0, 0, 0, 0), Notation::Rgba), "rgba(0, 0, 0, 0.00)");
    }

    #[test]
    fn test_format_is_idempotent() {
        let mut inputs: Vec<String> = [
            "#fff", "#000", "#abc", "#ABCDEF", "#12345678", "#00000000", "#ffffffff",
            "rgb(0, 0, 0)", "rgb(255,255,255)", "rgb(12.5, 50%, 300)",
            "rgba(1, 2, 3, 0)", "rgba(1, 2, 3, 0.333)", "rgba(1, 2, 3, 1)", "rgba(9, 9, 9, 50%)",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        for alpha in 0..=255u32 {
            inputs.push(format!("#336699{:02x}", alpha));
            inputs.push(format!("rgba(10, 20, 30, {})", alpha as f64 / 255.0));
        }

        for input in &inputs {
            let first = parse_color(input).unwrap();
            let formatted = first.format();
            let second = parse_color(&formatted).unwrap();
            assert_eq!(first, second, "{} -> {}", input, formatted);
            assert_eq!(second.format(), formatted, "format of {} is not stable", input);
        }
    }

    #[test]
    fn test_equality_ignores_notation() {
        assert_eq!(parse_color("#ff0000").unwrap(), parse_color("rgb(255, 0, 0)").unwrap());
        assert_ne!(parse_color("#ff0000").unwrap(), parse_color("#ff000080").unwrap());
    }

    #[test]
    fn test_from_str_and_display() {
        let color: Color = "rgb(1, 2, 3)".parse().unwrap();
        assert_eq!(color.to_string(), "rgb(1, 2, 3)");
        assert_eq!(color.to_hex(), "#010203");
        assert!("nope".parse::<Color>().is_err());
    }

    #[test]
    fn test_opaque() {
        let color = Color::rgba(1, 2, 3, 4);
        assert!(!color.is_opaque());
        assert!(color.opaque().is_opaque());
        assert_eq!(color.opaque().red, 1);
    }
}
