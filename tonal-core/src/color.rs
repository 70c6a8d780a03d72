use std::fmt;
use std::str::FromStr;

use palette::{FromColor, IntoColor, LinSrgb, Srgb};

use crate::{Error, Result};

/// An 8-bit sRGB color with straight alpha.
///
/// HSL and LAB are derived on demand from the channels, so they always
/// agree with the RGB value that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// CIE L*a*b* against the D65 white point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Rotates the hue, wrapping into `[0, 360)`.
    pub fn rotate(self, degrees: f32) -> Self {
        Self {
            h: normalize_hue(self.h + degrees),
            ..self
        }
    }
}

impl Lab {
    pub fn chroma(&self) -> f32 {
        self.a.hypot(self.b)
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let hsl: palette::Hsl = palette::Hsl::new(
            normalize_hue(hsl.h),
            hsl.s.clamp(0.0, 100.0) / 100.0,
            hsl.l.clamp(0.0, 100.0) / 100.0,
        );
        Self::from_srgb(Srgb::from_color(hsl), 255)
    }

    pub fn hsl(&self) -> Hsl {
        let hsl: palette::Hsl = palette::Hsl::from_color(self.to_srgb());
        Hsl {
            h: normalize_hue(hsl.hue.into_positive_degrees()),
            s: hsl.saturation * 100.0,
            l: hsl.lightness * 100.0,
        }
    }

    pub fn lab(&self) -> Lab {
        let lab: palette::Lab = self.to_srgb().into_color();
        Lab {
            l: lab.l,
            a: lab.a,
            b: lab.b,
        }
    }

    pub fn chroma(&self) -> f32 {
        self.lab().chroma()
    }

    /// Relative luminance in `[0, 1]` from linearized channels and the
    /// BT.709 weights.
    pub fn luminance(&self) -> f32 {
        let linear: LinSrgb = self.to_srgb().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }

    /// WCAG contrast ratio, always `>= 1` regardless of argument order.
    pub fn contrast(&self, other: &Color) -> f32 {
        let (a, b) = (self.luminance(), other.luminance());
        let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
        (lighter + 0.05) / (darker + 0.05)
    }

    /// Euclidean distance in LAB.
    pub fn distance(&self, other: &Color) -> f32 {
        let (a, b) = (self.lab(), other.lab());
        ((a.l - b.l).powi(2) + (a.a - b.a).powi(2) + (a.b - b.b).powi(2)).sqrt()
    }

    /// Per-channel linear interpolation towards `other`; `ratio` is clamped
    /// to `[0, 1]`.
    pub fn blend(&self, other: &Color, ratio: f32) -> Color {
        let t = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            let (a, b) = (f32::from(a), f32::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub fn darken(&self, amount: f32) -> Color {
        self.adjust(|hsl| hsl.l -= amount)
    }

    pub fn lighten(&self, amount: f32) -> Color {
        self.adjust(|hsl| hsl.l += amount)
    }

    pub fn saturate(&self, amount: f32) -> Color {
        self.adjust(|hsl| hsl.s += amount)
    }

    pub fn desaturate(&self, amount: f32) -> Color {
        self.adjust(|hsl| hsl.s -= amount)
    }

    /// Lowercase `#rrggbb`; alpha is not written.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn adjust(&self, f: impl FnOnce(&mut Hsl)) -> Color {
        let mut hsl = self.hsl();
        f(&mut hsl);
        hsl.s = hsl.s.clamp(0.0, 100.0);
        hsl.l = hsl.l.clamp(0.0, 100.0);
        Color::from_hsl(hsl).with_alpha(self.a)
    }

    fn to_srgb(self) -> Srgb {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    fn from_srgb(rgb: Srgb, a: u8) -> Self {
        Self {
            r: channel(rgb.red),
            g: channel(rgb.green),
            b: channel(rgb.blue),
            a,
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_owned()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_owned()))
        };
        Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn normalize_hue(degrees: f32) -> f32 {
    let h = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_close(a: Color, b: Color, tolerance: u8) {
        let diff = |x: u8, y: u8| x.abs_diff(y);
        assert!(
            diff(a.r, b.r) <= tolerance && diff(a.g, b.g) <= tolerance && diff(a.b, b.b) <= tolerance,
            "{a} and {b} differ by more than {tolerance} per channel"
        );
    }

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!("#6750A4".parse::<Color>().unwrap(), Color::rgb(0x67, 0x50, 0xa4));
        assert_eq!("6750a4".parse::<Color>().unwrap(), Color::rgb(0x67, 0x50, 0xa4));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#fff", "#12345", "#1234567", "zzzzzz", "#12 456", "+12345", "ééé"] {
            assert!(
                matches!(bad.parse::<Color>(), Err(Error::InvalidColor(ref s)) if s == bad),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_and_to_hex_are_lowercase() {
        let color = Color::rgb(0xAB, 0x01, 0xFF);
        assert_eq!(color.to_hex(), "#ab01ff");
        assert_eq!(color.to_string(), "#ab01ff");
    }

    #[test]
    fn hsl_of_primaries() {
        let red = Color::rgb(255, 0, 0).hsl();
        assert!(red.h.abs() < 0.01);
        assert!((red.s - 100.0).abs() < 0.01);
        assert!((red.l - 50.0).abs() < 0.01);

        let blue = Color::rgb(0, 0, 255).hsl();
        assert!((blue.h - 240.0).abs() < 0.01);

        let gray = Color::rgb(128, 128, 128).hsl();
        assert!(gray.s.abs() < 0.01);
    }

    #[test]
    fn hsl_round_trip_stays_within_one_step() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let color = Color::rgb(r, g, b);
                    assert_close(Color::from_hsl(color.hsl()), color, 1);
                }
            }
        }
    }

    #[test]
    fn hue_rotation_wraps() {
        let hsl = Hsl::new(300.0, 50.0, 50.0).rotate(120.0);
        assert!((hsl.h - 60.0).abs() < 1e-3);
        let hsl = Hsl::new(10.0, 50.0, 50.0).rotate(-20.0);
        assert!((hsl.h - 350.0).abs() < 1e-3);
    }

    #[test]
    fn lab_of_reference_colors() {
        let white = Color::WHITE.lab();
        assert!((white.l - 100.0).abs() < 0.1);
        assert!(white.a.abs() < 0.1 && white.b.abs() < 0.1);

        let black = Color::BLACK.lab();
        assert!(black.l.abs() < 0.1);

        // sRGB red is roughly L=53, a=80, b=67
        let red = Color::rgb(255, 0, 0).lab();
        assert!((red.l - 53.2).abs() < 0.5);
        assert!((red.a - 80.1).abs() < 1.0);
        assert!((red.b - 67.2).abs() < 1.0);
        assert!(Color::rgb(128, 128, 128).chroma() < 0.1);
    }

    #[test]
    fn luminance_is_monotonic_per_channel() {
        for fixed in [0u8, 90, 200] {
            let mut previous = [0.0f32; 3];
            for v in 0..=255u8 {
                let samples = [
                    Color::rgb(v, fixed, fixed).luminance(),
                    Color::rgb(fixed, v, fixed).luminance(),
                    Color::rgb(fixed, fixed, v).luminance(),
                ];
                for (now, before) in samples.iter().zip(previous.iter()) {
                    assert!(now >= before, "luminance decreased at {v}");
                }
                previous = samples;
            }
        }
    }

    #[test]
    fn dark_and_light() {
        assert!(Color::BLACK.is_dark());
        assert!(Color::rgb(0x67, 0x50, 0xa4).is_dark());
        assert!(!Color::WHITE.is_dark());
        assert!(!Color::rgb(0xff, 0xff, 0x00).is_dark());
    }

    #[test]
    fn black_white_contrast() {
        let ratio = Color::BLACK.contrast(&Color::WHITE);
        assert!(ratio >= 20.0, "got {ratio}");
        assert_eq!(ratio, Color::WHITE.contrast(&Color::BLACK));
        assert!((Color::WHITE.contrast(&Color::WHITE) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let a = Color::rgb(0x67, 0x50, 0xa4);
        let b = Color::rgb(0x20, 0xc0, 0x40);
        assert_eq!(a.distance(&a), 0.0);
        assert!((a.distance(&b) - b.distance(&a)).abs() < 1e-4);
        assert!(Color::BLACK.distance(&Color::WHITE) > 99.0);
    }

    #[test]
    fn blend_midpoint_of_red_and_blue() {
        let mixed = Color::rgb(255, 0, 0).blend(&Color::rgb(0, 0, 255), 0.5);
        assert_close(mixed, Color::rgb(0x80, 0x00, 0x80), 1);
    }

    #[test]
    fn blend_clamps_ratio() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(200, 100, 0);
        assert_eq!(a.blend(&b, -1.0), a);
        assert_eq!(a.blend(&b, 2.0), b);
    }

    #[test]
    fn lightness_and_saturation_adjustments_clamp() {
        let base = Color::rgb(0x67, 0x50, 0xa4);
        let hsl = base.hsl();

        let lighter = base.lighten(10.0).hsl();
        assert!((lighter.l - (hsl.l + 10.0)).abs() < 0.5);
        let darker = base.darken(10.0).hsl();
        assert!((darker.l - (hsl.l - 10.0)).abs() < 0.5);

        assert_eq!(base.lighten(200.0), Color::WHITE);
        assert_eq!(base.darken(200.0), Color::BLACK);

        assert!(base.desaturate(200.0).hsl().s < 0.5);
        assert!(base.saturate(10.0).hsl().s > hsl.s);
    }

    #[test]
    fn adjustments_keep_alpha() {
        let color = Color::rgba(0x67, 0x50, 0xa4, 0x40);
        assert_eq!(color.darken(5.0).a, 0x40);
        assert_eq!(color.saturate(5.0).a, 0x40);
    }
}
