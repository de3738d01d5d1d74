use gdal::cpl::CslStringList;
use gdal::raster::{Buffer, ColorInterpretation, GdalType};
use gdal::{Dataset, DriverManager};
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::io::GeoReference;
use crate::types::OutputFormat;

fn is_identity(gt: &[f64; 6]) -> bool {
    gt[0] == 0.0 && gt[1] == 1.0 && gt[2] == 0.0 && gt[3] == 0.0 && gt[4] == 0.0 && gt[5] == 1.0
}

fn write_single_band<T: GdalType + Copy>(
    output: &Path,
    format: OutputFormat,
    georef: &GeoReference,
    data: &[T],
    nodata: f64,
    creation_options: &[String],
) -> Result<Dataset> {
    let (cols, rows) = (georef.size_x, georef.size_y);
    let driver = DriverManager::get_driver_by_name(format.driver_name())?;

    let mut options = CslStringList::new();
    for opt in creation_options {
        options.add_string(opt)?;
    }
    debug!(
        "Creating {} dataset {:?} ({}x{}, options={:?})",
        format, output, cols, rows, creation_options
    );
    let mut ds = driver.create_with_band_type_with_options::<T, _>(output, cols, rows, 1, &options)?;

    if !is_identity(&georef.geotransform) {
        ds.set_geo_transform(&georef.geotransform)?;
        if !georef.projection.is_empty() {
            ds.set_projection(&georef.projection)?;
        }
    }

    let mut band = ds.rasterband(1)?;
    band.set_color_interpretation(ColorInterpretation::GrayIndex)?;
    band.set_no_data_value(Some(nodata))?;
    let mut buf = Buffer::new((cols, rows), data.to_vec());
    band.write((0, 0), (cols, rows), &mut buf)?;

    Ok(ds)
}

/// Write a single UInt16 class band georeferenced like `georef`
pub fn write_class_raster_u16(
    output: &Path,
    format: OutputFormat,
    georef: &GeoReference,
    data: &[u16],
    nodata: u16,
    creation_options: &[String],
) -> Result<Dataset> {
    write_single_band(output, format, georef, data, nodata as f64, creation_options)
}

/// Write a single Int32 class band georeferenced like `georef`
pub fn write_class_raster_i32(
    output: &Path,
    format: OutputFormat,
    georef: &GeoReference,
    data: &[i32],
    nodata: i32,
    creation_options: &[String],
) -> Result<Dataset> {
    write_single_band(output, format, georef, data, nodata as f64, creation_options)
}
