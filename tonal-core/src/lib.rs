//! Color values and the color-space math shared by the extraction and
//! scheme crates.

mod cache;
mod color;
mod error;

pub use cache::{ColorCache, DEFAULT_WORKERS};
pub use color::{Color, Hsl, Lab};
pub use error::{Error, Result};
