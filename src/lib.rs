pub mod adapters;
pub mod astrometry;
pub mod catalog;
pub mod error;
pub mod models;
pub mod text;

pub use crate::astrometry::{dec_degrees, derive_position, distance_from_parallax, ra_degrees};
pub use crate::catalog::{convert_file, convert_stream};
pub use crate::error::AppError;
pub use crate::models::{
    ConversionSummary, ConvertOptions, Declination, DerivedPosition, Distance, RightAscension,
    StarRecord,
};
pub use crate::text::split;
