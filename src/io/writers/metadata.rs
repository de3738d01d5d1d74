use gdal::Dataset;
use gdal::Metadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::processing::pipeline::FusionStats;
use crate::error::{Error, Result};

/// Provenance of a fused raster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionMetadata {
    pub tool: String,
    pub tool_version: String,
    pub created: String,
    pub land_cover: PathBuf,
    pub status: PathBuf,
    /// Remap table as `FROM:TO` pairs
    pub remap: String,
    pub unmapped_policy: String,
    pub data_type: String,
    pub nodata: i64,
    pub stats: FusionStats,
}

/// Flatten metadata into upper-case GDAL metadata items
pub fn extract_metadata_fields(meta: &FusionMetadata) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    fields.insert("TOOL".to_string(), meta.tool.clone());
    fields.insert("TOOL_VERSION".to_string(), meta.tool_version.clone());
    fields.insert("CREATED".to_string(), meta.created.clone());
    fields.insert(
        "SOURCE_LAND_COVER".to_string(),
        meta.land_cover.display().to_string(),
    );
    fields.insert("SOURCE_STATUS".to_string(), meta.status.display().to_string());
    fields.insert("REMAP".to_string(), meta.remap.clone());
    fields.insert("UNMAPPED_POLICY".to_string(), meta.unmapped_policy.clone());
    fields.insert("DATA_TYPE".to_string(), meta.data_type.clone());
    fields.insert("NODATA".to_string(), meta.nodata.to_string());
    fields.insert("CELLS_COMBINED".to_string(), meta.stats.combined.to_string());
    fields.insert("CELLS_FILLED".to_string(), meta.stats.filled.to_string());
    fields.insert("CELLS_NODATA".to_string(), meta.stats.nodata.to_string());
    fields
}

/// Embed provenance metadata into the default domain of a dataset
pub fn embed_metadata(ds: &mut Dataset, meta: &FusionMetadata) -> Result<()> {
    for (key, value) in extract_metadata_fields(meta) {
        ds.set_metadata_item(&key, &value, "")?;
    }
    Ok(())
}

/// Sidecar path for an output raster: same stem, `.json` extension
pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

/// Write `meta` as pretty JSON next to the output raster.
/// Without `overwrite`, an existing sidecar is left untouched and reported.
pub fn create_metadata_sidecar(
    output_path: &Path,
    meta: &FusionMetadata,
    overwrite: bool,
) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(meta)?;
    let mut file = if overwrite {
        File::create(&path)?
    } else {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => Error::OutputExists(path.clone()),
                _ => Error::Io(e),
            })?
    };
    file.write_all(json_string.as_bytes())?;
    info!("Created metadata sidecar: {:?}", path);
    Ok(path)
}
