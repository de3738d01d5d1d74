#![doc = r#"
NLCDPAD — fuse NLCD land cover with PAD-US protection status.

This crate reclassifies a PAD-US GAP status raster into multipliers, multiplies
them into an NLCD land-cover raster, fills the unprotected gaps with the original
land-cover class and writes the result as a new raster. It powers the `nlcdpad`
CLI and can be embedded in your own Rust applications.

Each cell of the output is:

- `land_cover * 10` where GAP status is 1 or 2,
- `land_cover * 1` where GAP status is 3 or 4,
- `land_cover` where there is no status.

Requirements
------------
- GDAL development headers and runtime available on your system.
- Rust 2024 edition toolchain.

Quick start: fuse two files
---------------------------
```rust,no_run
use std::path::Path;
use nlcdpad::{fuse_to_path, FusionParams};

fn main() -> nlcdpad::Result<()> {
    let report = fuse_to_path(
        Path::new("/data/PADUS2_0_status.tif"),
        Path::new("/data/NLCD_2016_Land_Cover_L48_20190424.img"),
        Path::new("/out/NLCD_2016_Land_Cover_L48_20190424_PAD.tif"),
        &FusionParams::default(),
    )?;
    println!("combined={} filled={}", report.stats.combined, report.stats.filled);
    Ok(())
}
```

Fuse in memory
--------------
```rust
use ndarray::array;
use nlcdpad::{fuse_grids, RemapTable, UnmappedPolicy};

let land_cover = array![[Some(42), Some(42), Some(42)]];
let status = array![[Some(1), Some(3), None]];
let (fused, _stats) = fuse_grids(
    &land_cover,
    &status,
    &RemapTable::gap_status(),
    UnmappedPolicy::Nodata,
)
.unwrap();
assert_eq!(fused, array![[Some(420), Some(42), Some(42)]]);
```

Error handling
--------------
All public functions return `nlcdpad::Result<T>`; match on `nlcdpad::Error` to handle
specific cases, e.g. misaligned inputs or an existing output.

Useful modules
--------------
- [`api`] — high-level entry points.
- [`core`] — configuration and the reclassify / multiply / fill / save stages.
- [`io`] — GDAL readers, output path derivation and writers.
- [`types`] — shared enums.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::{FusionParams, RemapTable};
pub use crate::core::processing::Grid;
pub use crate::core::processing::ops::{fill_nodata, multiply};
pub use crate::core::processing::pipeline::{FusionStats, fuse_grids};
pub use crate::core::processing::reclassify::reclassify;
pub use error::{Error, Result};
pub use types::{OutputDataType, OutputFormat, UnmappedPolicy};

pub use crate::io::{ClassRaster, GeoReference, RasterError, derive_output_path};

pub use api::{
    FusionReport, fuse_files, fuse_rasters, fuse_to_path, load_params, resolve_output_path,
};
