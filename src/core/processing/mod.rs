//! Pipeline stages over in-memory class grids: reclassify, cell algebra,
//! gap filling, and the save step that hands the result to the writers.
use ndarray::Array2;

pub mod ops;
pub mod pipeline;
pub mod reclassify;
pub mod save;

/// Row-major class grid; `None` is nodata.
pub type Grid = Array2<Option<i32>>;
