//! The color value the picker reads and writes.
//!
//! Stores RGBA as bytes alongside the HSL triple it was derived from, so a
//! hue survives being desaturated to gray. Values are immutable; every
//! `with_*` setter returns a new color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use crate::math;

/// Errors produced when parsing a free-form color string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    #[error("empty color string")]
    Empty,
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
    #[error("{format} expects {expected} components, found {found}")]
    ComponentCount {
        format: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("{component} out of range: {value}")]
    OutOfRange { component: &'static str, value: f64 },
    #[error("unrecognized color format: {0}")]
    UnknownFormat(String),
}

/// Output formats for [`PickerColor::to_string_as`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOutputFormat {
    /// `#rrggbb`
    Hex,
    /// `#rrggbbaa`
    HexA,
    /// `rgb(r,g,b)`
    Rgb,
    /// `rgba(r,g,b,a)` with alpha as a fraction
    Rgba,
    /// `hsl(h,s%,l%)`
    Hsl,
    /// `hsla(h,s%,l%,a)`
    Hsla,
    /// `r,g,b`
    ColorElements,
}

/// An alpha value in one of the three ranges the picker accepts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alpha {
    /// 0.0 (transparent) to 1.0 (opaque).
    Fraction(f64),
    /// 0 (transparent) to 100 (opaque).
    Percent(i32),
    /// 0 (transparent) to 255 (opaque).
    Byte(u8),
}

impl Alpha {
    /// The alpha as a byte, saturating out-of-range input.
    pub fn to_byte(self) -> u8 {
        match self {
            Alpha::Fraction(v) => (math::ensure_range(v, 1.0) * 255.0).round() as u8,
            Alpha::Percent(v) => (v.clamp(0, 100) as f64 / 100.0 * 255.0).round() as u8,
            Alpha::Byte(v) => v,
        }
    }
}

/// RGBA color plus its HSL representation.
///
/// Equality compares RGBA only: two colors that differ only in a hue that
/// has no visible effect (grays) are equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PickerColor {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    h: f64,
    s: f64,
    l: f64,
}

impl PartialEq for PickerColor {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b && self.a == other.a
    }
}

impl Eq for PickerColor {}

impl PickerColor {
    /// Red (0–255).
    pub fn r(&self) -> u8 {
        self.r
    }
    /// Green (0–255).
    pub fn g(&self) -> u8 {
        self.g
    }
    /// Blue (0–255).
    pub fn b(&self) -> u8 {
        self.b
    }
    /// Alpha (0–255).
    pub fn a(&self) -> u8 {
        self.a
    }
    /// Alpha as a fraction (0.0–1.0).
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }
    /// Hue in degrees (0.0–360.0, exclusive).
    pub fn h(&self) -> f64 {
        self.h
    }
    /// Saturation (0.0–1.0).
    pub fn s(&self) -> f64 {
        self.s
    }
    /// Lightness (0.0–1.0).
    pub fn l(&self) -> f64 {
        self.l
    }
}

impl Default for PickerColor {
    fn default() -> Self {
        let (r, g, b) = constants::DEFAULT_COLOR;
        Self::from_rgb(r, g, b)
    }
}

impl PickerColor {
    /// Create from 0–255 RGBA values.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let (h, s, l) = math::rgb_to_hsl(r, g, b);
        Self { r, g, b, a, h, s, l }
    }

    /// Create from 0–255 RGB values with full opacity.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    /// Create from HSL (hue in degrees, saturation and lightness 0.0–1.0).
    ///
    /// The given hue is kept even where it has no effect on the RGB value.
    pub fn from_hsla(h: f64, s: f64, l: f64, a: u8) -> Self {
        let h = h.rem_euclid(360.0);
        let s = math::ensure_range(s, 1.0);
        let l = math::ensure_range(l, 1.0);
        let (r, g, b) = math::hsl_to_rgb(h, s, l);
        Self { r, g, b, a, h, s, l }
    }

    pub fn with_r(self, r: u8) -> Self {
        Self::from_rgba(r, self.g, self.b, self.a)
    }

    pub fn with_g(self, g: u8) -> Self {
        Self::from_rgba(self.r, g, self.b, self.a)
    }

    pub fn with_b(self, b: u8) -> Self {
        Self::from_rgba(self.r, self.g, b, self.a)
    }

    /// Replace the hue, keeping saturation and lightness.
    pub fn with_h(self, h: f64) -> Self {
        Self::from_hsla(h, self.s, self.l, self.a)
    }

    /// Replace the saturation, keeping hue and lightness.
    pub fn with_s(self, s: f64) -> Self {
        Self::from_hsla(self.h, s, self.l, self.a)
    }

    /// Replace the lightness, keeping hue and saturation.
    pub fn with_l(self, l: f64) -> Self {
        Self::from_hsla(self.h, self.s, l, self.a)
    }

    /// Replace the alpha. HSL is carried over untouched.
    pub fn with_alpha(self, alpha: Alpha) -> Self {
        Self {
            a: alpha.to_byte(),
            ..self
        }
    }

    /// Format in the given output format. Hex output is lowercase.
    pub fn to_string_as(&self, format: ColorOutputFormat) -> String {
        let (r, g, b) = (self.r, self.g, self.b);
        match format {
            ColorOutputFormat::Hex => format!("#{:02x}{:02x}{:02x}", r, g, b),
            ColorOutputFormat::HexA => {
                format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, self.a)
            }
            ColorOutputFormat::Rgb => format!("rgb({},{},{})", r, g, b),
            ColorOutputFormat::Rgba => {
                format!("rgba({},{},{},{})", r, g, b, self.alpha_text())
            }
            ColorOutputFormat::Hsl => {
                let (h, s, l) = self.hsl_display();
                format!("hsl({},{}%,{}%)", h, s, l)
            }
            ColorOutputFormat::Hsla => {
                let (h, s, l) = self.hsl_display();
                format!("hsla({},{}%,{}%,{})", h, s, l, self.alpha_text())
            }
            ColorOutputFormat::ColorElements => format!("{},{},{}", r, g, b),
        }
    }

    fn alpha_text(&self) -> f64 {
        math::round_to(self.alpha(), 2)
    }

    fn hsl_display(&self) -> (i64, i64, i64) {
        (
            (self.h.round() as i64) % 360,
            (self.s * 100.0).round() as i64,
            (self.l * 100.0).round() as i64,
        )
    }

    /// Parse a free-form color string.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (the `#` is optional),
    /// `rgb(r,g,b)`, `rgba(r,g,b,a)`, `hsl(h,s%,l%)` and `hsla(h,s%,l%,a)`,
    /// where `a` is a fraction in 0–1.
    pub fn parse(input: &str) -> Result<Self, ParseColorError> {
        let trimmed = input.trim().to_ascii_lowercase();
        if trimmed.is_empty() {
            return Err(ParseColorError::Empty);
        }

        if let Some(args) = function_args(&trimmed, "rgba") {
            let parts = split_components(args, "rgba", 4)?;
            let [r, g, b] = parse_channels(&parts[..3])?;
            let a = parse_bounded(parts[3], "alpha", 1.0)?;
            return Ok(Self::from_rgba(r, g, b, Alpha::Fraction(a).to_byte()));
        }
        if let Some(args) = function_args(&trimmed, "rgb") {
            let parts = split_components(args, "rgb", 3)?;
            let [r, g, b] = parse_channels(&parts)?;
            return Ok(Self::from_rgb(r, g, b));
        }
        if let Some(args) = function_args(&trimmed, "hsla") {
            let parts = split_components(args, "hsla", 4)?;
            let (h, s, l) = parse_hsl(&parts[..3])?;
            let a = parse_bounded(parts[3], "alpha", 1.0)?;
            return Ok(Self::from_hsla(h, s, l, Alpha::Fraction(a).to_byte()));
        }
        if let Some(args) = function_args(&trimmed, "hsl") {
            let parts = split_components(args, "hsl", 3)?;
            let (h, s, l) = parse_hsl(&parts)?;
            return Ok(Self::from_hsla(h, s, l, 255));
        }

        let stripped = trimmed.strip_prefix('#').unwrap_or(&trimmed);
        if stripped.chars().all(|c| c.is_ascii_hexdigit()) {
            return parse_hex(stripped);
        }
        if trimmed.starts_with('#') {
            return Err(ParseColorError::InvalidHex(input.trim().to_string()));
        }
        Err(ParseColorError::UnknownFormat(input.trim().to_string()))
    }
}

/// `name(args)` → `args`
fn function_args<'a>(input: &'a str, name: &str) -> Option<&'a str> {
    input
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn split_components<'a>(
    args: &'a str,
    format: &'static str,
    expected: usize,
) -> Result<Vec<&'a str>, ParseColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(ParseColorError::ComponentCount {
            format,
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

fn parse_number(text: &str) -> Result<f64, ParseColorError> {
    let value = text
        .parse::<f64>()
        .map_err(|_| ParseColorError::InvalidNumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(ParseColorError::InvalidNumber(text.to_string()));
    }
    Ok(value)
}

fn parse_bounded(text: &str, component: &'static str, max: f64) -> Result<f64, ParseColorError> {
    let value = parse_number(text)?;
    if !(0.0..=max).contains(&value) {
        return Err(ParseColorError::OutOfRange { component, value });
    }
    Ok(value)
}

fn parse_channels(parts: &[&str]) -> Result<[u8; 3], ParseColorError> {
    const NAMES: [&str; 3] = ["red", "green", "blue"];
    let mut out = [0u8; 3];
    for (i, part) in parts.iter().enumerate() {
        out[i] = parse_bounded(part, NAMES[i], 255.0)?.round() as u8;
    }
    Ok(out)
}

fn parse_hsl(parts: &[&str]) -> Result<(f64, f64, f64), ParseColorError> {
    let h = parse_bounded(parts[0].trim_end_matches("deg"), "hue", 360.0)?;
    let s = parse_bounded(parts[1].trim_end_matches('%'), "saturation", 100.0)?;
    let l = parse_bounded(parts[2].trim_end_matches('%'), "lightness", 100.0)?;
    Ok((h, s / 100.0, l / 100.0))
}

fn parse_hex(hex: &str) -> Result<PickerColor, ParseColorError> {
    let invalid = || ParseColorError::InvalidHex(hex.to_string());
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    match hex.len() {
        3 => Ok(PickerColor::from_rgb(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
        )),
        4 => Ok(PickerColor::from_rgba(
            digit(0)? * 17,
            digit(1)? * 17,
            digit(2)? * 17,
            digit(3)? * 17,
        )),
        6 => Ok(PickerColor::from_rgb(pair(0)?, pair(2)?, pair(4)?)),
        8 => Ok(PickerColor::from_rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
        _ => Err(invalid()),
    }
}

impl FromStr for PickerColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PickerColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PickerColor> for String {
    fn from(color: PickerColor) -> Self {
        color.to_string_as(ColorOutputFormat::HexA)
    }
}

impl fmt::Display for PickerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_as(ColorOutputFormat::Rgba))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_brand_blue() {
        let c = PickerColor::default();
        assert_eq!(c.to_string_as(ColorOutputFormat::Hex), "#594ae2");
        assert_eq!(c.a(), 255);
    }

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(
            PickerColor::parse("#594ae2").unwrap(),
            PickerColor::from_rgb(89, 74, 226)
        );
        assert_eq!(
            PickerColor::parse("594AE2").unwrap(),
            PickerColor::from_rgb(89, 74, 226)
        );
        assert_eq!(
            PickerColor::parse("#ff408180").unwrap(),
            PickerColor::from_rgba(255, 64, 129, 128)
        );
        assert_eq!(
            PickerColor::parse("#fff").unwrap(),
            PickerColor::from_rgb(255, 255, 255)
        );
        assert_eq!(
            PickerColor::parse("#f008").unwrap(),
            PickerColor::from_rgba(255, 0, 0, 136)
        );
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(
            PickerColor::parse("rgb(10, 20, 30)").unwrap(),
            PickerColor::from_rgb(10, 20, 30)
        );
        assert_eq!(
            PickerColor::parse("RGBA(10,20,30,0.5)").unwrap(),
            PickerColor::from_rgba(10, 20, 30, 128)
        );
        assert_eq!(
            PickerColor::parse("hsl(120, 100%, 50%)").unwrap(),
            PickerColor::from_rgb(0, 255, 0)
        );
        let c = PickerColor::parse("hsla(240,100%,50%,0)").unwrap();
        assert_eq!(c, PickerColor::from_rgba(0, 0, 255, 0));
        assert_eq!(c.h(), 240.0);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(PickerColor::parse("   "), Err(ParseColorError::Empty));
        assert!(matches!(
            PickerColor::parse("#12345"),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            PickerColor::parse("#zzzzzz"),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert_eq!(
            PickerColor::parse("rgb(1,2)"),
            Err(ParseColorError::ComponentCount {
                format: "rgb",
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            PickerColor::parse("rgb(1,2,300)"),
            Err(ParseColorError::OutOfRange {
                component: "blue",
                ..
            })
        ));
        assert!(matches!(
            PickerColor::parse("rgb(a,2,3)"),
            Err(ParseColorError::InvalidNumber(_))
        ));
        assert!(matches!(
            PickerColor::parse("not a color"),
            Err(ParseColorError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_output_formats() {
        let c = PickerColor::from_rgba(89, 74, 226, 255);
        assert_eq!(c.to_string_as(ColorOutputFormat::Hex), "#594ae2");
        assert_eq!(c.to_string_as(ColorOutputFormat::HexA), "#594ae2ff");
        assert_eq!(c.to_string_as(ColorOutputFormat::Rgb), "rgb(89,74,226)");
        assert_eq!(c.to_string_as(ColorOutputFormat::Rgba), "rgba(89,74,226,1)");
        assert_eq!(c.to_string_as(ColorOutputFormat::Hsl), "hsl(246,72%,59%)");
        assert_eq!(
            c.to_string_as(ColorOutputFormat::ColorElements),
            "89,74,226"
        );
        let half = c.with_alpha(Alpha::Byte(128));
        assert_eq!(half.to_string(), "rgba(89,74,226,0.5)");
        assert_eq!(
            half.to_string_as(ColorOutputFormat::Hsla),
            "hsla(246,72%,59%,0.5)"
        );
    }

    #[test]
    fn test_setters_return_new_values() {
        let c = PickerColor::from_rgb(10, 20, 30);
        let red = c.with_r(200);
        assert_eq!((c.r(), red.r()), (10, 200));
        assert_eq!(c.with_g(0).g(), 0);
        assert_eq!(c.with_b(255).b(), 255);
    }

    #[test]
    fn test_hue_survives_desaturation() {
        let c = PickerColor::from_rgb(89, 74, 226);
        let gray = c.with_s(0.0);
        assert_eq!(gray.r(), gray.g());
        assert_eq!(gray.g(), gray.b());
        assert!((gray.h() - c.h()).abs() < 1e-9);
        assert_eq!(gray.with_s(c.s()), c);
    }

    #[test]
    fn test_with_h_keeps_saturation_and_lightness() {
        let c = PickerColor::from_rgb(89, 74, 226).with_h(120.0);
        assert_eq!(c, PickerColor::from_rgb(74, 226, 74));
        assert_eq!(c.h(), 120.0);
        assert_eq!(PickerColor::from_rgb(255, 0, 0).with_h(360.0).h(), 0.0);
    }

    #[test]
    fn test_with_l_clamps() {
        assert_eq!(
            PickerColor::from_rgb(255, 0, 0).with_l(2.0),
            PickerColor::from_rgb(255, 255, 255)
        );
        assert_eq!(
            PickerColor::from_rgb(255, 0, 0).with_l(-1.0),
            PickerColor::from_rgb(0, 0, 0)
        );
    }

    #[test]
    fn test_alpha_ranges() {
        assert_eq!(Alpha::Fraction(1.0).to_byte(), 255);
        assert_eq!(Alpha::Fraction(0.5).to_byte(), 128);
        assert_eq!(Alpha::Fraction(7.0).to_byte(), 255);
        assert_eq!(Alpha::Percent(50).to_byte(), 128);
        assert_eq!(Alpha::Percent(-3).to_byte(), 0);
        assert_eq!(Alpha::Byte(17).to_byte(), 17);
    }

    #[test]
    fn test_equality_ignores_hidden_hue() {
        let a = PickerColor::from_hsla(10.0, 0.0, 0.5, 255);
        let b = PickerColor::from_hsla(200.0, 0.0, 0.5, 255);
        assert_eq!(a, b);
        assert_ne!(a.h(), b.h());
    }
}
