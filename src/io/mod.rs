//! I/O layer: GDAL-backed reading of class rasters, output path derivation,
//! and `writers` for GeoTIFF/Imagine outputs plus metadata embedding/sidecars.
pub mod gdal;
pub use self::gdal::{ClassRaster, GeoReference, RasterError};

pub mod paths;
pub use self::paths::derive_output_path;

pub mod writers;
