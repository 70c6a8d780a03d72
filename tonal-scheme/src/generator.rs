use std::sync::Arc;

use log::debug;
use tonal_core::{Color, ColorCache, Error, Result};
use tonal_extract::{Histogram, Quantizer, Raster, Scorer};

use crate::scheme::Scheme;
use crate::tonal::Palette;

/// One seed rendered in both modes over a shared palette.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub seed: Color,
    pub palette: Arc<Palette>,
    pub light: Scheme,
    pub dark: Scheme,
}

impl Theme {
    pub fn from_seed(seed: Color) -> Self {
        let palette = Arc::new(Palette::from_seed(seed));
        Self {
            seed,
            light: Scheme::from_palette(Arc::clone(&palette), false),
            dark: Scheme::from_palette(Arc::clone(&palette), true),
            palette,
        }
    }

    pub fn scheme(&self, is_dark: bool) -> &Scheme {
        if is_dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

/// Runs raster → histogram → seed → palette → scheme.
///
/// ```
/// use tonal_scheme::{Color, PixelGrid, Role, SchemeGenerator};
///
/// let image = PixelGrid::filled(8, 8, Color::rgb(0x67, 0x50, 0xa4)).unwrap();
/// let generator = SchemeGenerator::new().max_colors(64);
///
/// let scheme = generator.scheme(Some(&image), true).unwrap();
/// assert_eq!(scheme[Role::Primary], scheme.palette().primary.tone(80.0));
/// ```
#[derive(Clone, Default)]
pub struct SchemeGenerator {
    quantizer: Quantizer,
    scorer: Scorer,
    cache: Option<Arc<ColorCache>>,
}

impl SchemeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.quantizer = Quantizer::new(max_colors);
        self
    }

    pub fn target_chroma(mut self, chroma: f32) -> Self {
        self.scorer = self.scorer.with_target_chroma(chroma);
        self
    }

    pub fn weights(mut self, chroma: f32, population: f32) -> Self {
        self.scorer = self.scorer.with_weights(chroma, population);
        self
    }

    pub fn fallback_seed(mut self, color: Color) -> Self {
        self.scorer = self.scorer.with_fallback(color);
        self
    }

    /// Shares a parse cache with other components.
    pub fn cache(mut self, cache: Arc<ColorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Reduced histogram of `image`. Empty images give an empty histogram.
    pub fn histogram<R: Raster + ?Sized>(&self, image: Option<&R>) -> Result<Histogram> {
        let image = image.ok_or_else(|| Error::InvalidImage("no image supplied".into()))?;
        Ok(self.quantizer.quantize(image))
    }

    pub fn seed_color<R: Raster + ?Sized>(&self, image: Option<&R>) -> Result<Color> {
        let histogram = self.histogram(image)?;
        let seed = self.scorer.seed(&histogram);
        debug!("seed color {seed} from {} quantized colors", histogram.len());
        Ok(seed)
    }

    /// Best `n` seed candidates, for showing alternatives to the chosen seed.
    pub fn candidates<R: Raster + ?Sized>(&self, image: Option<&R>, n: usize) -> Result<Vec<Color>> {
        Ok(self.scorer.top(&self.histogram(image)?, n))
    }

    pub fn palette<R: Raster + ?Sized>(&self, image: Option<&R>) -> Result<Palette> {
        Ok(Palette::from_seed(self.seed_color(image)?))
    }

    pub fn scheme<R: Raster + ?Sized>(&self, image: Option<&R>, is_dark: bool) -> Result<Scheme> {
        let palette = Arc::new(self.palette(image)?);
        Ok(Scheme::from_palette(palette, is_dark))
    }

    pub fn theme<R: Raster + ?Sized>(&self, image: Option<&R>) -> Result<Theme> {
        Ok(Theme::from_seed(self.seed_color(image)?))
    }

    /// Theme for a seed given as hex text, parsed through the shared cache
    /// when one is configured.
    pub fn theme_from_hex(&self, hex: &str) -> Result<Theme> {
        let seed = match &self.cache {
            Some(cache) => cache.parse(hex)?,
            None => hex.parse()?,
        };
        Ok(Theme::from_seed(seed))
    }
}
