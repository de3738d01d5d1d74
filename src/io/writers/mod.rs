//! Raster writers and metadata helpers used by the save stage.
pub mod metadata;
pub mod tiff;
