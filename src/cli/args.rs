use clap::Parser;
use std::path::PathBuf;

use nlcdpad::{OutputDataType, OutputFormat, UnmappedPolicy};

#[derive(Parser, Debug)]
#[command(
    name = "nlcdpad",
    version,
    about = "Encode PAD-US protection status into NLCD land-cover classes"
)]
pub struct CliArgs {
    /// PAD-US GAP status raster
    #[arg(long, value_name = "FILE")]
    pub status: Option<PathBuf>,

    /// NLCD land-cover raster
    #[arg(long, value_name = "FILE")]
    pub land_cover: Option<PathBuf>,

    /// Output raster (default: land-cover path with extension replaced by <suffix>.<format>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Band index (1-based) to read from the status raster
    #[arg(long, value_name = "N")]
    pub status_band: Option<usize>,

    /// Attribute table column holding GAP status (status cells are then category ids)
    #[arg(long, value_name = "FIELD")]
    pub status_field: Option<String>,

    /// Band index (1-based) to read from the land-cover raster
    #[arg(long, value_name = "N")]
    pub land_cover_band: Option<usize>,

    /// Replace the remap table with FROM:TO pairs (repeatable, default 1:10 2:10 3:1 4:1)
    #[arg(long, value_name = "FROM:TO")]
    pub remap: Vec<String>,

    /// Handling of status codes missing from the remap table
    #[arg(long, value_enum)]
    pub unmapped: Option<UnmappedPolicy>,

    /// Suffix appended to the land-cover file stem when deriving the output path
    #[arg(long)]
    pub suffix: Option<String>,

    /// Output format (tiff or img)
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output band type (u16 or i32)
    #[arg(long, value_enum)]
    pub data_type: Option<OutputDataType>,

    /// Output nodata value (default: land-cover nodata, else the type's default)
    #[arg(long, allow_hyphen_values = true)]
    pub nodata: Option<i64>,

    /// GDAL creation option KEY=VALUE (repeatable; replaces the format's defaults)
    #[arg(long = "co", value_name = "KEY=VALUE")]
    pub creation_options: Vec<String>,

    /// Fail instead of replacing an existing output file
    #[arg(long, default_value_t = false)]
    pub no_overwrite: bool,

    /// Write a JSON metadata sidecar next to the output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
