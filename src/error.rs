//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, JSON, and GDAL errors, and provides semantic variants
//! for grid validation, reclassification, and persistence failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Raster error: {0}")]
    Raster(#[from] crate::io::RasterError),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Grid dimensions differ: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("Status code {value} at row {row}, col {col} has no remap entry")]
    UnmappedValue { value: i32, row: usize, col: usize },

    #[error("Integer overflow multiplying cells at row {row}, col {col}")]
    Overflow { row: usize, col: usize },

    #[error("Cell value {value} does not fit output type {data_type}")]
    ValueOutOfRange { value: i64, data_type: String },

    #[error("Output nodata value {nodata} collides with a valid cell at row {row}, col {col}")]
    NodataCollision { nodata: i64, row: usize, col: usize },

    #[error("Output already exists and overwrite is disabled: {0}")]
    OutputExists(PathBuf),

    #[error("Remap table is empty")]
    EmptyRemapTable,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },
}

impl Error {
    pub fn dimension_mismatch(left: (usize, usize), right: (usize, usize)) -> Self {
        Error::DimensionMismatch {
            left_rows: left.0,
            left_cols: left.1,
            right_rows: right.0,
            right_cols: right.1,
        }
    }
}
