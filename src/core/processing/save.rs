use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::params::FusionParams;
use crate::core::processing::Grid;
use crate::error::{Error, Result};
use crate::io::GeoReference;
use crate::io::writers::metadata::{
    FusionMetadata, create_metadata_sidecar, embed_metadata, sidecar_path,
};
use crate::io::writers::tiff::{write_class_raster_i32, write_class_raster_u16};
use crate::types::{OutputDataType, OutputFormat};

/// Cells encoded for the output band type, nodata replaced by the sentinel
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBand {
    U16(Vec<u16>),
    I32(Vec<i32>),
}

/// Pick the output nodata sentinel.
///
/// An explicit value must fit the band type. Otherwise the land-cover sentinel is
/// reused when it is an integer in range, else the type default.
pub fn resolve_nodata(
    data_type: OutputDataType,
    explicit: Option<i64>,
    land_cover_nodata: Option<f64>,
) -> Result<i64> {
    if let Some(value) = explicit {
        if !data_type.contains(value) {
            return Err(Error::InvalidArgument {
                arg: "nodata",
                value: value.to_string(),
            });
        }
        return Ok(value);
    }
    if let Some(nd) = land_cover_nodata {
        if nd.is_finite() && nd.fract() == 0.0 && data_type.contains(nd as i64) {
            return Ok(nd as i64);
        }
        debug!(
            "Land-cover nodata {} does not fit {}, using type default",
            nd, data_type
        );
    }
    Ok(data_type.default_nodata())
}

/// Encode `grid` row-major for `data_type`, checking range and sentinel collisions
pub fn encode_grid(grid: &Grid, data_type: OutputDataType, nodata: i64) -> Result<EncodedBand> {
    let mut values = Vec::with_capacity(grid.len());
    for ((row, col), cell) in grid.indexed_iter() {
        let value = match cell {
            None => nodata,
            Some(v) => {
                let v = *v as i64;
                if v == nodata {
                    return Err(Error::NodataCollision { nodata, row, col });
                }
                if !data_type.contains(v) {
                    return Err(Error::ValueOutOfRange {
                        value: v,
                        data_type: data_type.to_string(),
                    });
                }
                v
            }
        };
        values.push(value);
    }

    // Every value was range checked above
    Ok(match data_type {
        OutputDataType::U16 => EncodedBand::U16(values.into_iter().map(|v| v as u16).collect()),
        OutputDataType::I32 => EncodedBand::I32(values.into_iter().map(|v| v as i32).collect()),
    })
}

fn aux_xml_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".aux.xml");
    PathBuf::from(name)
}

/// Files GDAL may have written next to `output` in an earlier run
fn companion_files(output: &Path, format: OutputFormat) -> Vec<PathBuf> {
    let mut files = vec![aux_xml_path(output)];
    if format == OutputFormat::Img {
        files.push(output.with_extension("ige"));
    }
    files
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed stale {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn write_band(
    path: &Path,
    encoded: &EncodedBand,
    georef: &GeoReference,
    params: &FusionParams,
    nodata: i64,
    meta: &FusionMetadata,
) -> Result<()> {
    let creation_options = params.effective_creation_options();
    let mut ds = match encoded {
        EncodedBand::U16(data) => write_class_raster_u16(
            path,
            params.format,
            georef,
            data,
            nodata as u16,
            &creation_options,
        )?,
        EncodedBand::I32(data) => write_class_raster_i32(
            path,
            params.format,
            georef,
            data,
            nodata as i32,
            &creation_options,
        )?,
    };
    embed_metadata(&mut ds, meta)?;
    // Dataset is flushed and closed on drop
    Ok(())
}

/// Write the fused grid to `output`.
///
/// GeoTIFF output is written to a temporary file in the destination directory and
/// renamed into place, so a failed run never leaves a truncated output behind.
/// Erdas Imagine output goes straight to `output`: the `.img` header names its
/// `.ige` spill file, which would dangle after a rename.
pub fn save_fused_raster(
    grid: &Grid,
    output: &Path,
    georef: &GeoReference,
    params: &FusionParams,
    nodata: i64,
    meta: &FusionMetadata,
) -> Result<()> {
    let (rows, cols) = grid.dim();
    if rows != georef.size_y || cols != georef.size_x {
        return Err(Error::dimension_mismatch(
            (rows, cols),
            (georef.size_y, georef.size_x),
        ));
    }

    let sidecar = params.sidecar.then(|| sidecar_path(output));
    if !params.overwrite {
        if output.exists() {
            return Err(Error::OutputExists(output.to_path_buf()));
        }
        if let Some(sidecar) = sidecar.as_deref().filter(|p| p.exists()) {
            return Err(Error::OutputExists(sidecar.to_path_buf()));
        }
    } else if output.exists() {
        info!("Overwriting existing output: {:?}", output);
    }

    let encoded = encode_grid(grid, params.data_type, nodata)?;

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    if params.overwrite {
        // GDAL would otherwise pick up the previous run's PAM or spill data
        for stale in companion_files(output, params.format) {
            remove_if_exists(&stale)?;
        }
    }

    match params.format {
        OutputFormat::Img => {
            if params.overwrite {
                remove_if_exists(output)?;
            }
            write_band(output, &encoded, georef, params, nodata, meta)?;
        }
        OutputFormat::Tiff => {
            let tmp = tempfile::Builder::new()
                .prefix(".nlcdpad-")
                .suffix(&format!(".{}", params.format.extension()))
                .tempfile_in(&dir)?
                .into_temp_path();
            write_band(&tmp, &encoded, georef, params, nodata, meta)?;

            let tmp_aux = aux_xml_path(&tmp);
            let persisted = if params.overwrite {
                tmp.persist(output).map_err(|e| Error::Io(e.error))
            } else {
                tmp.persist_noclobber(output).map_err(|e| {
                    if e.error.kind() == std::io::ErrorKind::AlreadyExists {
                        Error::OutputExists(output.to_path_buf())
                    } else {
                        Error::Io(e.error)
                    }
                })
            };
            if let Err(e) = persisted {
                let _ = fs::remove_file(&tmp_aux);
                return Err(e);
            }
            if tmp_aux.exists() {
                if let Err(e) = fs::rename(&tmp_aux, aux_xml_path(output)) {
                    warn!("Could not move auxiliary metadata {:?}: {}", tmp_aux, e);
                }
            }
        }
    }

    info!(
        "save_fused_raster: {} {} raster saved to {:?} (nodata={})",
        params.format, params.data_type, output, nodata
    );

    if params.sidecar {
        create_metadata_sidecar(output, meta, params.overwrite)?;
    }
    Ok(())
}
