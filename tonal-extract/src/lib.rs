//! Turns a decoded raster into a color histogram, reduces it by box
//! splitting, and scores the survivors to pick a seed color.

mod histogram;
mod quantize;
mod raster;
mod score;

pub use histogram::Histogram;
pub use quantize::{quantize, Quantizer, DEFAULT_MAX_COLORS};
pub use raster::{PixelGrid, Raster};
pub use score::{
    find_seed_color, is_suitable, ScoredColor, Scorer, CHROMA_WEIGHT, DEFAULT_SEED,
    POPULATION_WEIGHT, TARGET_CHROMA,
};
pub use tonal_core::{Color, Error, Result};
