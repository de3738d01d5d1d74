use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{OutputDataType, OutputFormat, UnmappedPolicy};

/// Status code → multiplier lookup used by the reclassify stage.
///
/// Serialized as a list of `[from, to]` pairs so config files read the same
/// way the remap is usually written down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(i32, i32)>", into = "Vec<(i32, i32)>")]
pub struct RemapTable {
    entries: BTreeMap<i32, i32>,
}

impl RemapTable {
    pub fn new<I: IntoIterator<Item = (i32, i32)>>(pairs: I) -> Result<Self> {
        let entries: BTreeMap<i32, i32> = pairs.into_iter().collect();
        if entries.is_empty() {
            return Err(Error::EmptyRemapTable);
        }
        Ok(Self { entries })
    }

    /// GAP status 1 and 2 scale the class by 10, status 3 and 4 leave it as is
    pub fn gap_status() -> Self {
        Self {
            entries: BTreeMap::from([(1, 10), (2, 10), (3, 1), (4, 1)]),
        }
    }

    pub fn get(&self, code: i32) -> Option<i32> {
        self.entries.get(&code).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a single `FROM:TO` pair as given on the command line
    pub fn parse_pair(s: &str) -> Result<(i32, i32)> {
        let invalid = || Error::InvalidArgument {
            arg: "remap",
            value: s.to_string(),
        };
        let (from, to) = s.split_once(':').ok_or_else(invalid)?;
        let from = from.trim().parse::<i32>().map_err(|_| invalid())?;
        let to = to.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok((from, to))
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::gap_status()
    }
}

impl TryFrom<Vec<(i32, i32)>> for RemapTable {
    type Error = Error;

    fn try_from(pairs: Vec<(i32, i32)>) -> Result<Self> {
        Self::new(pairs)
    }
}

impl From<RemapTable> for Vec<(i32, i32)> {
    fn from(table: RemapTable) -> Self {
        table.entries.into_iter().collect()
    }
}

impl std::fmt::Display for RemapTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Fusion parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionParams {
    /// PAD-US protection status raster
    pub status: Option<PathBuf>,
    /// NLCD land-cover raster
    pub land_cover: Option<PathBuf>,
    /// Explicit output path; derived from `land_cover` when absent
    pub output: Option<PathBuf>,
    /// 1-based band index in the status raster
    pub status_band: usize,
    /// Attribute table column holding the GAP status; when set, status cells are
    /// category ids looked up in the band's default raster attribute table
    pub status_field: Option<String>,
    /// 1-based band index in the land-cover raster
    pub land_cover_band: usize,
    pub remap: RemapTable,
    pub unmapped: UnmappedPolicy,
    /// Appended to the land-cover file stem when deriving the output path
    pub suffix: String,
    pub format: OutputFormat,
    pub data_type: OutputDataType,
    /// Output nodata sentinel; falls back to land cover's, then the type default
    pub nodata: Option<i64>,
    /// GDAL creation options (`KEY=VALUE`); `None` uses the format's defaults
    pub creation_options: Option<Vec<String>>,
    /// Replace an existing output file
    pub overwrite: bool,
    /// Also write `<output>.json` with provenance and cell statistics
    pub sidecar: bool,
}

impl FusionParams {
    /// Configured creation options, or the defaults for `format`
    pub fn effective_creation_options(&self) -> Vec<String> {
        self.creation_options
            .clone()
            .unwrap_or_else(|| self.format.default_creation_options())
    }
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            status: None,
            land_cover: None,
            output: None,
            status_band: 1,
            status_field: None,
            land_cover_band: 1,
            remap: RemapTable::gap_status(),
            unmapped: UnmappedPolicy::Nodata,
            suffix: "_PAD".to_string(),
            format: OutputFormat::Tiff,
            data_type: OutputDataType::U16,
            nodata: None,
            creation_options: None,
            overwrite: true,
            sidecar: false,
        }
    }
}
