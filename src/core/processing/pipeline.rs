use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::params::RemapTable;
use crate::core::processing::Grid;
use crate::core::processing::ops::{fill_nodata, multiply};
use crate::core::processing::reclassify::reclassify;
use crate::error::Result;
use crate::types::UnmappedPolicy;

/// Per-run cell counts, logged and written into output metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionStats {
    pub rows: usize,
    pub cols: usize,
    /// Cells whose value came from land cover × multiplier
    pub combined: usize,
    /// Cells copied unchanged from land cover because no multiplier applied
    pub filled: usize,
    /// Cells that are nodata in the final raster
    pub nodata: usize,
    /// Combined-cell count per multiplier value
    pub by_multiplier: BTreeMap<i32, usize>,
}

/// Reclassify `status`, multiply it into `land_cover`, and fill the gaps from `land_cover`.
pub fn fuse_grids(
    land_cover: &Grid,
    status: &Grid,
    remap: &RemapTable,
    policy: UnmappedPolicy,
) -> Result<(Grid, FusionStats)> {
    let multipliers = reclassify(status, remap, policy)?;
    let combined = multiply(land_cover, &multipliers)?;
    let fused = fill_nodata(&combined, land_cover)?;

    let (rows, cols) = fused.dim();
    let mut stats = FusionStats {
        rows,
        cols,
        ..Default::default()
    };
    for ((c, m), f) in combined.iter().zip(multipliers.iter()).zip(fused.iter()) {
        match (c, f) {
            (Some(_), _) => {
                stats.combined += 1;
                if let Some(m) = m {
                    *stats.by_multiplier.entry(*m).or_insert(0) += 1;
                }
            }
            (None, Some(_)) => stats.filled += 1,
            (None, None) => stats.nodata += 1,
        }
    }

    info!(
        "fuse_grids: {}x{} cells, combined={}, filled={}, nodata={}",
        rows, cols, stats.combined, stats.filled, stats.nodata
    );

    Ok((fused, stats))
}
