use ndarray::Array2;
use tracing::debug;

use crate::core::params::RemapTable;
use crate::core::processing::Grid;
use crate::error::{Error, Result};
use crate::types::UnmappedPolicy;

/// Map every defined cell of `status` through `table`.
///
/// Nodata stays nodata. Codes without a table entry are handled per `policy`.
pub fn reclassify(status: &Grid, table: &RemapTable, policy: UnmappedPolicy) -> Result<Grid> {
    let mut cells = Vec::with_capacity(status.len());
    let mut unmapped = 0usize;

    for ((row, col), cell) in status.indexed_iter() {
        let mapped = match *cell {
            None => None,
            Some(code) => match table.get(code) {
                Some(multiplier) => Some(multiplier),
                None => {
                    unmapped += 1;
                    match policy {
                        UnmappedPolicy::Nodata => None,
                        UnmappedPolicy::Keep => Some(code),
                        UnmappedPolicy::Error => {
                            return Err(Error::UnmappedValue {
                                value: code,
                                row,
                                col,
                            });
                        }
                    }
                }
            },
        };
        cells.push(mapped);
    }

    if unmapped > 0 {
        debug!("reclassify: {} cells had no remap entry ({})", unmapped, policy);
    }

    Ok(Array2::from_shape_vec(status.dim(), cells)?)
}
