use std::collections::HashMap;

use log::debug;
use tonal_core::Color;

use crate::Raster;

/// Pixel counts per distinct opaque color.
///
/// Alpha is dropped from keys, so the counts of all keys always add up to
/// the number of pixels that went in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: HashMap<Color, u64>,
    total: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visits every pixel once.
    pub fn from_raster<R: Raster + ?Sized>(raster: &R) -> Self {
        let mut histogram = Self::new();
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                let [r, g, b, _] = raster.pixel(x, y);
                histogram.add(Color::rgb(r, g, b), 1);
            }
        }
        debug!(
            "histogram: {} distinct colors over {} pixels",
            histogram.len(),
            histogram.total
        );
        histogram
    }

    pub fn add(&mut self, color: Color, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(color.with_alpha(255)).or_insert(0) += count;
        self.total += count;
    }

    pub fn get(&self, color: &Color) -> u64 {
        self.counts.get(&color.with_alpha(255)).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, u64)> + '_ {
        self.counts.iter().map(|(color, count)| (*color, *count))
    }

    /// The most frequent color; ties go to the lowest RGB value.
    pub fn most_populous(&self) -> Option<Color> {
        self.iter()
            .max_by(|(a, a_count), (b, b_count)| a_count.cmp(b_count).then_with(|| b.cmp(a)))
            .map(|(color, _)| color)
    }
}

impl FromIterator<(Color, u64)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (Color, u64)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (color, count) in iter {
            histogram.add(color, count);
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelGrid;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_every_pixel() -> anyhow::Result<()> {
        let colors: Vec<Color> = (0..60u8).map(|i| Color::rgb(i % 7, i % 3, 0)).collect();
        let grid = PixelGrid::from_colors(10, 6, &colors)?;
        let histogram = Histogram::from_raster(&grid);

        assert_eq!(histogram.total(), 60);
        assert_eq!(histogram.iter().map(|(_, n)| n).sum::<u64>(), 60);
        assert_eq!(histogram.len(), 21);
        Ok(())
    }

    #[test]
    fn alpha_is_ignored_in_keys() {
        let histogram: Histogram = [
            (Color::rgba(1, 2, 3, 0), 2),
            (Color::rgba(1, 2, 3, 128), 3),
            (Color::rgb(9, 9, 9), 0),
        ]
        .into_iter()
        .collect();

        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram.get(&Color::rgb(1, 2, 3)), 5);
        assert_eq!(histogram.get(&Color::rgb(9, 9, 9)), 0);
    }

    #[test]
    fn empty_raster_gives_empty_histogram() -> anyhow::Result<()> {
        let grid = PixelGrid::new(0, 5, Vec::new())?;
        let histogram = Histogram::from_raster(&grid);
        assert!(histogram.is_empty());
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.most_populous(), None);
        Ok(())
    }

    #[test]
    fn most_populous_breaks_ties_by_value() {
        let histogram: Histogram = [
            (Color::rgb(200, 0, 0), 4),
            (Color::rgb(10, 0, 0), 4),
            (Color::rgb(0, 0, 1), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(histogram.most_populous(), Some(Color::rgb(10, 0, 0)));
    }
}
