use tonal_core::{Color, Hsl};

/// The canonical tone stops, darkest first.
pub const TONES: [u8; 13] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 95, 99, 100];

const SECONDARY_HUE_SHIFT: f32 = 60.0;
const SECONDARY_SATURATION: f32 = 0.7;
const TERTIARY_HUE_SHIFT: f32 = 120.0;
const TERTIARY_SATURATION: f32 = 0.5;
const NEUTRAL_SATURATION: f32 = 2.0;
const NEUTRAL_VARIANT_SATURATION: f32 = 8.0;
const ERROR_HUE: f32 = 0.0;
const ERROR_SATURATION: f32 = 84.0;

/// One hue sampled at every tone stop, lightness equal to the tone.
#[derive(Debug, Clone, PartialEq)]
pub struct TonalPalette {
    hue: f32,
    saturation: f32,
    colors: [Color; TONES.len()],
}

impl TonalPalette {
    /// Rotates `base` by `hue_shift` and keeps its saturation in the mid
    /// tones, fading it linearly to zero below tone 20 and above tone 80.
    pub fn from_hsl(base: Hsl, hue_shift: f32) -> Self {
        let base = base.rotate(hue_shift);
        Self::build(base.h, base.s, |tone| ramp(base.s, tone))
    }

    /// Same saturation at every tone.
    pub fn flat(hue: f32, saturation: f32) -> Self {
        let hue = Hsl::new(hue, saturation, 0.0).rotate(0.0).h;
        Self::build(hue, saturation, |_| saturation)
    }

    fn build(hue: f32, saturation: f32, saturation_at: impl Fn(f32) -> f32) -> Self {
        let colors = TONES.map(|tone| {
            let tone = f32::from(tone);
            Color::from_hsl(Hsl::new(hue, saturation_at(tone), tone))
        });
        Self {
            hue,
            saturation,
            colors,
        }
    }

    /// Color at the stop nearest to `tone`; a tone halfway between two
    /// stops resolves to the darker one.
    pub fn tone(&self, tone: f32) -> Color {
        let nearest = TONES
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (f32::from(**a) - tone).abs();
                let db = (f32::from(**b) - tone).abs();
                da.total_cmp(&db)
            })
            .map_or(0, |(i, _)| i);
        self.colors[nearest]
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation before tone shaping.
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Color)> + '_ {
        TONES.iter().copied().zip(self.colors.iter().copied())
    }
}

fn ramp(saturation: f32, tone: f32) -> f32 {
    if tone < 20.0 {
        saturation * tone / 20.0
    } else if tone > 80.0 {
        saturation * (100.0 - tone) / 20.0
    } else {
        saturation
    }
}

/// A seed color and the six tonal palettes derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub seed: Color,
    pub primary: TonalPalette,
    pub secondary: TonalPalette,
    pub tertiary: TonalPalette,
    pub neutral: TonalPalette,
    pub neutral_variant: TonalPalette,
    pub error: TonalPalette,
}

impl Palette {
    pub fn from_seed(seed: Color) -> Self {
        let base = seed.hsl();
        let scaled = |factor: f32| Hsl::new(base.h, base.s * factor, base.l);

        Self {
            seed,
            primary: TonalPalette::from_hsl(base, 0.0),
            secondary: TonalPalette::from_hsl(scaled(SECONDARY_SATURATION), SECONDARY_HUE_SHIFT),
            tertiary: TonalPalette::from_hsl(scaled(TERTIARY_SATURATION), TERTIARY_HUE_SHIFT),
            neutral: TonalPalette::flat(base.h, NEUTRAL_SATURATION),
            neutral_variant: TonalPalette::flat(base.h, NEUTRAL_VARIANT_SATURATION),
            error: TonalPalette::from_hsl(Hsl::new(ERROR_HUE, ERROR_SATURATION, 50.0), 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEED: Color = Color::rgb(0x67, 0x50, 0xa4);

    #[test]
    fn always_thirteen_stops() {
        for (h, s) in [(0.0, 0.0), (359.9, 100.0), (123.0, 42.0), (720.0, 250.0)] {
            let palette = TonalPalette::from_hsl(Hsl::new(h, s, 50.0), 33.0);
            let tones: Vec<u8> = palette.iter().map(|(t, _)| t).collect();
            assert_eq!(tones, TONES.to_vec());
        }
    }

    #[test]
    fn extremes_are_black_and_white() {
        let palette = TonalPalette::from_hsl(SEED.hsl(), 0.0);
        assert_eq!(palette.tone(0.0), Color::BLACK);
        assert_eq!(palette.tone(100.0), Color::WHITE);
    }

    #[test]
    fn lightness_follows_tone() {
        let palette = TonalPalette::from_hsl(SEED.hsl(), 0.0);
        for (tone, color) in palette.iter() {
            assert!((color.hsl().l - f32::from(tone)).abs() < 0.5, "tone {tone} is {color}");
        }
    }

    #[test]
    fn nearest_stop_prefers_lower_on_ties() {
        let palette = TonalPalette::from_hsl(SEED.hsl(), 0.0);
        assert_eq!(palette.tone(97.0), palette.tone(95.0));
        assert_eq!(palette.tone(45.0), palette.tone(40.0));
        assert_eq!(palette.tone(46.0), palette.tone(50.0));
        assert_eq!(palette.tone(99.6), palette.tone(100.0));
        assert_eq!(palette.tone(-20.0), Color::BLACK);
        assert_eq!(palette.tone(180.0), Color::WHITE);
    }

    #[test]
    fn saturation_ramps_at_the_ends() {
        assert_eq!(ramp(60.0, 0.0), 0.0);
        assert_eq!(ramp(60.0, 10.0), 30.0);
        assert_eq!(ramp(60.0, 20.0), 60.0);
        assert_eq!(ramp(60.0, 80.0), 60.0);
        assert_eq!(ramp(60.0, 90.0), 30.0);
        assert_eq!(ramp(60.0, 100.0), 0.0);
    }

    #[test]
    fn derived_palettes_rotate_and_scale() {
        let base = SEED.hsl();
        let palette = Palette::from_seed(SEED);

        assert_eq!(palette.seed, SEED);
        assert!((palette.primary.hue() - base.h).abs() < 1e-3);
        assert!((palette.secondary.hue() - (base.h + 60.0) % 360.0).abs() < 1e-3);
        assert!((palette.tertiary.hue() - (base.h + 120.0) % 360.0).abs() < 1e-3);
        assert!((palette.secondary.saturation() - base.s * 0.7).abs() < 1e-3);
        assert!((palette.tertiary.saturation() - base.s * 0.5).abs() < 1e-3);
    }

    #[test]
    fn neutrals_keep_a_faint_tint() {
        let palette = Palette::from_seed(SEED);
        assert_eq!(palette.neutral.saturation(), 2.0);
        assert_eq!(palette.neutral_variant.saturation(), 8.0);
        assert!((palette.neutral.hue() - SEED.hsl().h).abs() < 1e-3);

        let mid = palette.neutral_variant.tone(50.0);
        assert!(mid.b > mid.g, "neutral variant {mid} lost the violet tint");
    }

    #[test]
    fn error_palette_ignores_seed() {
        let a = Palette::from_seed(SEED).error;
        let b = Palette::from_seed(Color::rgb(0x20, 0xa0, 0x40)).error;
        assert_eq!(a, b);
        assert_eq!(a.hue(), 0.0);
        let error = a.tone(40.0);
        assert!(error.r > error.g && error.r > error.b);
    }
}
