//! Seed color → tonal palettes → light and dark schemes, plus the
//! [`SchemeGenerator`] pipeline that starts from a raster.

mod generator;
mod scheme;
mod tonal;

pub use generator::{SchemeGenerator, Theme};
pub use scheme::{generate_scheme, Role, Scheme};
pub use tonal::{Palette, TonalPalette, TONES};
pub use tonal_core::{Color, ColorCache, Error, Hsl, Lab, Result};
pub use tonal_extract::{Histogram, PixelGrid, Raster};
