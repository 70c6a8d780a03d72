use std::cmp::Ordering;

use log::debug;
use tonal_core::Color;

use crate::Histogram;

pub const TARGET_CHROMA: f32 = 48.0;
pub const CHROMA_WEIGHT: f32 = 0.7;
pub const POPULATION_WEIGHT: f32 = 0.3;

/// Seed used when a histogram has no colors at all (HSL ≈ 215°, 38%, 47%).
pub const DEFAULT_SEED: Color = Color::rgb(0x4a, 0x6f, 0xa5);

const MIN_LUMA: f32 = 25.5;
const MAX_LUMA: f32 = 229.5;
const MIN_SPREAD: u8 = 15;
const CHROMA_FALLOFF: f32 = 1000.0;

/// A candidate seed and its score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredColor {
    pub color: Color,
    pub score: f32,
    pub population: u64,
}

/// Whether `color` may seed a scheme: not too dark, not too light and not
/// close to gray.
pub fn is_suitable(color: &Color) -> bool {
    let (r, g, b) = (f32::from(color.r), f32::from(color.g), f32::from(color.b));
    let luma = 0.299 * r + 0.587 * g + 0.114 * b;
    if !(MIN_LUMA..=MAX_LUMA).contains(&luma) {
        return false;
    }
    let max = color.r.max(color.g).max(color.b);
    let min = color.r.min(color.g).min(color.b);
    max - min >= MIN_SPREAD
}

/// [`Scorer::seed`] with the default weights and fallback.
pub fn find_seed_color(histogram: &Histogram) -> Color {
    Scorer::default().seed(histogram)
}

/// Ranks colors by closeness to a target chroma and by population share.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    target_chroma: f32,
    chroma_weight: f32,
    population_weight: f32,
    fallback: Color,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            target_chroma: TARGET_CHROMA,
            chroma_weight: CHROMA_WEIGHT,
            population_weight: POPULATION_WEIGHT,
            fallback: DEFAULT_SEED,
        }
    }
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target_chroma(mut self, chroma: f32) -> Self {
        self.target_chroma = chroma;
        self
    }

    pub fn with_weights(mut self, chroma: f32, population: f32) -> Self {
        self.chroma_weight = chroma;
        self.population_weight = population;
        self
    }

    pub fn with_fallback(mut self, color: Color) -> Self {
        self.fallback = color;
        self
    }

    pub fn fallback(&self) -> Color {
        self.fallback
    }

    /// Scores every suitable color, best first. Equal scores are ordered by
    /// population, then by RGB value.
    pub fn score(&self, histogram: &Histogram) -> Vec<ScoredColor> {
        let total = histogram.total();
        if total == 0 {
            return Vec::new();
        }

        let mut scored: Vec<ScoredColor> = histogram
            .iter()
            .filter(|(color, _)| is_suitable(color))
            .map(|(color, count)| ScoredColor {
                color,
                score: self.score_one(&color, count, total),
                population: count,
            })
            .collect();
        scored.sort_by(rank);
        scored
    }

    /// The `n` best candidates.
    pub fn top(&self, histogram: &Histogram, n: usize) -> Vec<Color> {
        let mut scored = self.score(histogram);
        scored.truncate(n);
        scored.into_iter().map(|s| s.color).collect()
    }

    /// Picks a seed. Falls back to the most populous color when nothing is
    /// suitable, and to the configured default when the histogram is empty.
    pub fn seed(&self, histogram: &Histogram) -> Color {
        if let Some(best) = self.score(histogram).first() {
            debug!("seed {} scored {:.2}", best.color, best.score);
            return best.color;
        }
        if let Some(color) = histogram.most_populous() {
            debug!("no suitable colors, seeding from most populous {color}");
            return color;
        }
        debug!("empty histogram, seeding from default {}", self.fallback);
        self.fallback
    }

    fn score_one(&self, color: &Color, count: u64, total: u64) -> f32 {
        let population = 100.0 * count as f32 / total as f32;
        let chroma = color.chroma();
        let chroma_score = 100.0 * (-(chroma - self.target_chroma).powi(2) / CHROMA_FALLOFF).exp();
        self.chroma_weight * chroma_score + self.population_weight * population
    }
}

fn rank(a: &ScoredColor, b: &ScoredColor) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.population.cmp(&a.population))
        .then_with(|| a.color.cmp(&b.color))
}
