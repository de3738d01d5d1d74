//! Shared types and enums used across nlcdpad.
//! Includes `OutputFormat`, `OutputDataType` and `UnmappedPolicy`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Raster container written by the persistence stage.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// GeoTIFF (`.tif`)
    Tiff,
    /// Erdas Imagine (`.img`)
    Img,
}

impl OutputFormat {
    /// GDAL short driver name
    pub fn driver_name(self) -> &'static str {
        match self {
            OutputFormat::Tiff => "GTiff",
            OutputFormat::Img => "HFA",
        }
    }

    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Tiff => "tif",
            OutputFormat::Img => "img",
        }
    }

    /// Creation options used when none are configured.
    /// `BIGTIFF` is GTiff-only; HFA spills large rasters to `.ige` on its own.
    pub fn default_creation_options(self) -> Vec<String> {
        match self {
            OutputFormat::Tiff => vec!["COMPRESS=LZW".to_string(), "BIGTIFF=IF_SAFER".to_string()],
            OutputFormat::Img => Vec::new(),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tiff => write!(f, "GTiff"),
            OutputFormat::Img => write!(f, "HFA"),
        }
    }
}

/// Band type of the output raster
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputDataType {
    U16,
    I32,
}

impl OutputDataType {
    /// Sentinel used when neither the caller nor the land-cover raster supplies one
    pub fn default_nodata(self) -> i64 {
        match self {
            OutputDataType::U16 => u16::MAX as i64,
            OutputDataType::I32 => i32::MIN as i64,
        }
    }

    pub fn contains(self, value: i64) -> bool {
        match self {
            OutputDataType::U16 => (u16::MIN as i64..=u16::MAX as i64).contains(&value),
            OutputDataType::I32 => (i32::MIN as i64..=i32::MAX as i64).contains(&value),
        }
    }
}

impl std::fmt::Display for OutputDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputDataType::U16 => write!(f, "UInt16"),
            OutputDataType::I32 => write!(f, "Int32"),
        }
    }
}

/// What the reclassifier does with a defined status code that has no entry in the remap table
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum,
    Debug,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedPolicy {
    /// Emit nodata for the cell
    #[default]
    Nodata,
    /// Abort with `Error::UnmappedValue`
    Error,
    /// Keep the original status code as the cell value
    Keep,
}

impl std::fmt::Display for UnmappedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnmappedPolicy::Nodata => write!(f, "nodata"),
            UnmappedPolicy::Error => write!(f, "error"),
            UnmappedPolicy::Keep => write!(f, "keep"),
        }
    }
}
