//! Variance-guided box splitting over a 5-bit-per-channel moment cube.
//!
//! Every pixel lands in one of 32×32×32 cells. Each cell keeps its weight
//! and the first and second color moments, so any box of cells can report
//! its variance and mean color by summing cells instead of revisiting
//! pixels. The box with the largest variance is cut in half along its
//! longest side until the box budget is spent.

use log::{debug, trace};
use tonal_core::Color;

use crate::{Histogram, Raster};

pub const DEFAULT_MAX_COLORS: usize = 128;

const SIGNAL_BITS: u32 = 5;
const SHIFT: u32 = 8 - SIGNAL_BITS;
const SIDE: usize = 1 << SIGNAL_BITS;

/// Reduces `raster` to at most `max_colors` colors.
pub fn quantize<R: Raster + ?Sized>(raster: &R, max_colors: usize) -> Histogram {
    Quantizer::new(max_colors).quantize(raster)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    max_colors: usize,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COLORS)
    }
}

impl Quantizer {
    /// `max_colors` below one is treated as one.
    pub fn new(max_colors: usize) -> Self {
        Self {
            max_colors: max_colors.max(1),
        }
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    pub fn quantize<R: Raster + ?Sized>(&self, raster: &R) -> Histogram {
        self.reduce(&Histogram::from_raster(raster))
    }

    /// Reduces an exact histogram. Counts are preserved: the output total
    /// always equals the input total.
    pub fn reduce(&self, histogram: &Histogram) -> Histogram {
        if histogram.len() <= self.max_colors {
            trace!("quantize: {} colors fit, skipping box splitting", histogram.len());
            return histogram.clone();
        }

        let cube = MomentCube::from_histogram(histogram);
        let mut boxes = vec![ColorBox::new([0; 3], [SIDE - 1; 3], &cube)];

        while boxes.len() < self.max_colors {
            let Some(index) = widest_box(&boxes) else {
                break;
            };
            let (lower, upper) = boxes[index].split(&cube);
            boxes[index] = lower;
            boxes.push(upper);
        }

        let reduced: Histogram = boxes
            .iter()
            .filter_map(|b| Some((b.moments.mean()?, b.moments.weight)))
            .collect();
        debug!(
            "quantize: {} colors reduced to {} across {} boxes",
            histogram.len(),
            reduced.len(),
            boxes.len()
        );
        reduced
    }
}

/// Index of the splittable box with the largest variance, first on ties.
/// Boxes with zero variance are left alone since halving them cannot change
/// any emitted color.
fn widest_box(boxes: &[ColorBox]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, b) in boxes.iter().enumerate() {
        if !b.is_splittable() || b.variance <= 0.0 {
            continue;
        }
        if best.map_or(true, |(_, v)| b.variance > v) {
            best = Some((i, b.variance));
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Moments {
    weight: u64,
    sum: [u64; 3],
    sum_sq: [u64; 3],
}

impl Moments {
    fn add_color(&mut self, color: Color, count: u64) {
        let channels = [color.r, color.g, color.b].map(u64::from);
        self.weight += count;
        for (c, v) in channels.into_iter().enumerate() {
            self.sum[c] += count * v;
            self.sum_sq[c] += count * v * v;
        }
    }

    fn merge(&mut self, other: &Moments) {
        self.weight += other.weight;
        for c in 0..3 {
            self.sum[c] += other.sum[c];
            self.sum_sq[c] += other.sum_sq[c];
        }
    }

    /// Σ over channels of Σw·x² − (Σw·x)² / Σw.
    fn variance(&self) -> f64 {
        if self.weight == 0 {
            return 0.0;
        }
        let w = self.weight as f64;
        (0..3)
            .map(|c| {
                let s = self.sum[c] as f64;
                self.sum_sq[c] as f64 - s * s / w
            })
            .sum()
    }

    /// Weighted mean color, rounded to nearest.
    fn mean(&self) -> Option<Color> {
        if self.weight == 0 {
            return None;
        }
        let w = self.weight;
        let channel = |c: usize| ((self.sum[c] + w / 2) / w).min(255) as u8;
        Some(Color::rgb(channel(0), channel(1), channel(2)))
    }
}

struct MomentCube {
    cells: Vec<Moments>,
}

impl MomentCube {
    fn from_histogram(histogram: &Histogram) -> Self {
        let mut cells = vec![Moments::default(); SIDE * SIDE * SIDE];
        for (color, count) in histogram.iter() {
            let cell = cell_index([color.r, color.g, color.b].map(|v| usize::from(v >> SHIFT)));
            cells[cell].add_color(color, count);
        }
        Self { cells }
    }

    /// Sums the cells inside the inclusive bounds.
    fn sum(&self, lo: [usize; 3], hi: [usize; 3]) -> Moments {
        let mut total = Moments::default();
        for r in lo[0]..=hi[0] {
            for g in lo[1]..=hi[1] {
                for b in lo[2]..=hi[2] {
                    total.merge(&self.cells[cell_index([r, g, b])]);
                }
            }
        }
        total
    }
}

fn cell_index([r, g, b]: [usize; 3]) -> usize {
    (r * SIDE + g) * SIDE + b
}

/// Inclusive cell bounds plus the moments of everything inside them.
#[derive(Debug, Clone)]
struct ColorBox {
    lo: [usize; 3],
    hi: [usize; 3],
    moments: Moments,
    variance: f64,
}

impl ColorBox {
    fn new(lo: [usize; 3], hi: [usize; 3], cube: &MomentCube) -> Self {
        let moments = cube.sum(lo, hi);
        Self {
            lo,
            hi,
            moments,
            variance: moments.variance(),
        }
    }

    fn side(&self, axis: usize) -> usize {
        self.hi[axis] - self.lo[axis] + 1
    }

    #[cfg(test)]
    fn volume(&self) -> usize {
        (0..3).map(|axis| self.side(axis)).product()
    }

    fn is_splittable(&self) -> bool {
        (0..3).any(|axis| self.side(axis) > 1)
    }

    /// Red wins ties over green, green over blue.
    fn longest_axis(&self) -> usize {
        let mut axis = 0;
        for candidate in 1..3 {
            if self.side(candidate) > self.side(axis) {
                axis = candidate;
            }
        }
        axis
    }

    /// Halves the box at the midpoint of its longest axis. The lower half
    /// keeps the midpoint cell.
    fn split(&self, cube: &MomentCube) -> (ColorBox, ColorBox) {
        let axis = self.longest_axis();
        let mid = (self.lo[axis] + self.hi[axis]) / 2;

        let mut lower_hi = self.hi;
        lower_hi[axis] = mid;
        let mut upper_lo = self.lo;
        upper_lo[axis] = mid + 1;

        (
            ColorBox::new(self.lo, lower_hi, cube),
            ColorBox::new(upper_lo, self.hi, cube),
        )
    }
}
