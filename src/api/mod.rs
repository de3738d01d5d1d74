//! High-level, ergonomic library API: fuse rasters already in memory, fuse files
//! on disk into a new raster, and load configuration. Prefer these entrypoints
//! over the low-level processing modules when integrating nlcdpad.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::params::{FusionParams, RemapTable};
use crate::core::processing::Grid;
use crate::core::processing::pipeline::{FusionStats, fuse_grids};
use crate::core::processing::save::{resolve_nodata, save_fused_raster};
use crate::error::{Error, Result};
use crate::io::writers::metadata::{FusionMetadata, sidecar_path};
use crate::io::{ClassRaster, derive_output_path};
use crate::types::UnmappedPolicy;

/// Outcome of a file-to-file fusion run
#[derive(Debug, Clone)]
pub struct FusionReport {
    pub output: PathBuf,
    pub sidecar: Option<PathBuf>,
    pub nodata: i64,
    pub stats: FusionStats,
}

/// Load `FusionParams` from a JSON file; missing keys take their defaults
pub fn load_params(path: &Path) -> Result<FusionParams> {
    let text = std::fs::read_to_string(path)?;
    let params = serde_json::from_str(&text)?;
    info!("Loaded configuration from {:?}", path);
    Ok(params)
}

/// Output path for `params`: the explicit one if set, else derived from the land-cover path
pub fn resolve_output_path(params: &FusionParams) -> Result<PathBuf> {
    if let Some(output) = &params.output {
        return Ok(output.clone());
    }
    let land_cover = params
        .land_cover
        .as_deref()
        .ok_or_else(|| Error::MissingArgument {
            arg: "land_cover".to_string(),
        })?;
    Ok(derive_output_path(land_cover, &params.suffix, params.format))
}

/// Fuse two in-memory rasters after checking they share the same grid
pub fn fuse_rasters(
    land_cover: &ClassRaster,
    status: &ClassRaster,
    remap: &RemapTable,
    policy: UnmappedPolicy,
) -> Result<(Grid, FusionStats)> {
    land_cover.georef.check_aligned(&status.georef)?;
    fuse_grids(&land_cover.grid, &status.grid, remap, policy)
}

/// Read both inputs named in `params`, fuse them and write the output raster
pub fn fuse_files(params: &FusionParams) -> Result<FusionReport> {
    let status_path = params.status.as_deref().ok_or_else(|| Error::MissingArgument {
        arg: "status".to_string(),
    })?;
    let land_cover_path = params
        .land_cover
        .as_deref()
        .ok_or_else(|| Error::MissingArgument {
            arg: "land_cover".to_string(),
        })?;
    let output = resolve_output_path(params)?;

    if !params.overwrite {
        if output.exists() {
            return Err(Error::OutputExists(output));
        }
        let sidecar = sidecar_path(&output);
        if params.sidecar && sidecar.exists() {
            return Err(Error::OutputExists(sidecar));
        }
    }

    let status = match &params.status_field {
        Some(field) => ClassRaster::open_attribute(status_path, params.status_band, field)?,
        None => ClassRaster::open(status_path, params.status_band)?,
    };
    let land_cover = ClassRaster::open(land_cover_path, params.land_cover_band)?;

    info!(
        "Reclassifying status with remap {} (unmapped: {})",
        params.remap, params.unmapped
    );
    let (fused, stats) = fuse_rasters(&land_cover, &status, &params.remap, params.unmapped)?;
    drop(status);

    let nodata = resolve_nodata(params.data_type, params.nodata, land_cover.georef.nodata)?;
    let meta = FusionMetadata {
        tool: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        created: chrono::Utc::now().to_rfc3339(),
        land_cover: land_cover_path.to_path_buf(),
        status: status_path.to_path_buf(),
        remap: params.remap.to_string(),
        unmapped_policy: params.unmapped.to_string(),
        data_type: params.data_type.to_string(),
        nodata,
        stats: stats.clone(),
    };

    save_fused_raster(&fused, &output, &land_cover.georef, params, nodata, &meta)?;

    Ok(FusionReport {
        sidecar: params.sidecar.then(|| sidecar_path(&output)),
        output,
        nodata,
        stats,
    })
}

/// Fuse `status` into `land_cover` and write the result to `output`
pub fn fuse_to_path(
    status: &Path,
    land_cover: &Path,
    output: &Path,
    params: &FusionParams,
) -> Result<FusionReport> {
    let params = FusionParams {
        status: Some(status.to_path_buf()),
        land_cover: Some(land_cover.to_path_buf()),
        output: Some(output.to_path_buf()),
        ..params.clone()
    };
    fuse_files(&params)
}
