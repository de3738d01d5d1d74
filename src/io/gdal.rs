use gdal::Dataset;
use gdal::errors::GdalError as GdalCrateError;
use gdal::raster::{RasterAttributeTable, RatFieldUsage};
use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::processing::Grid;

/// Errors encountered when reading or aligning input rasters
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Band index {index} out of range (dataset has {bands} bands)")]
    BandOutOfRange { index: usize, bands: usize },
    #[error("Raster has invalid dimensions: {0}x{1}")]
    InvalidDimensions(usize, usize),
    #[error("Dimension mismatch: expected {0}x{1}, got {2}x{3}")]
    DimensionMismatch(usize, usize, usize, usize),
    #[error("Rasters are not aligned: {0}")]
    GridMismatch(String),
    #[error("Band {band} has no raster attribute table")]
    MissingAttributeTable { band: usize },
    #[error("Attribute field `{field}` not found (available: {available})")]
    UnknownAttributeField { field: String, available: String },
}

/// Map cell values to the integer in column `field` of an attribute table.
///
/// Rows are keyed by the table's value column (usage `MinMax`, or a column named
/// `Value`); tables without one are indexed by row number.
pub fn attribute_lookup(
    rat: &RasterAttributeTable,
    field: &str,
) -> Result<HashMap<i32, i32>, RasterError> {
    let n_cols = rat.n_cols();
    let names: Vec<String> = (0..n_cols).map(|c| rat.col_name(c)).collect();

    let field_col = names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(field))
        .ok_or_else(|| RasterError::UnknownAttributeField {
            field: field.to_string(),
            available: names.join(","),
        })?;
    let value_col = rat
        .col_of_usage(RatFieldUsage::MinMax)
        .or_else(|| names.iter().position(|name| name.eq_ignore_ascii_case("value")));

    let mut lookup = HashMap::with_capacity(rat.n_rows());
    for row in 0..rat.n_rows() {
        let key = match value_col {
            Some(col) => rat.value_as_int(row, col),
            None => row as i32,
        };
        lookup.insert(key, rat.value_as_int(row, field_col));
    }
    debug!(
        "Attribute field `{}`: {} rows (value column {:?})",
        field,
        lookup.len(),
        value_col
    );
    Ok(lookup)
}

/// Georeferencing of a single raster band
#[derive(Debug, Clone, PartialEq)]
pub struct GeoReference {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Affine geotransform coefficients ([origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height])
    pub geotransform: [f64; 6],
    /// Projection in WKT format, empty when the dataset has none
    pub projection: String,
    /// Band nodata sentinel
    pub nodata: Option<f64>,
}

impl GeoReference {
    /// Verify `other` describes the same grid: size, geotransform and (when both set) projection.
    pub fn check_aligned(&self, other: &GeoReference) -> Result<(), RasterError> {
        if self.size_x != other.size_x || self.size_y != other.size_y {
            return Err(RasterError::GridMismatch(format!(
                "size {}x{} vs {}x{}",
                self.size_x, self.size_y, other.size_x, other.size_y
            )));
        }
        for (i, (a, b)) in self
            .geotransform
            .iter()
            .zip(other.geotransform.iter())
            .enumerate()
        {
            let tol = 1e-9 * a.abs().max(b.abs()).max(1.0);
            if (a - b).abs() > tol {
                return Err(RasterError::GridMismatch(format!(
                    "geotransform[{}] {} vs {}",
                    i, a, b
                )));
            }
        }
        if !self.projection.is_empty()
            && !other.projection.is_empty()
            && self.projection != other.projection
        {
            return Err(RasterError::GridMismatch("projection differs".to_string()));
        }
        Ok(())
    }
}

/// A single integer class band and its georeferencing
#[derive(Debug, Clone)]
pub struct ClassRaster {
    pub grid: Grid,
    pub georef: GeoReference,
}

impl ClassRaster {
    /// Open `path` and read band `index` (1-based) as an integer class grid
    pub fn open<P: AsRef<Path>>(path: P, index: usize) -> Result<Self, RasterError> {
        let path = path.as_ref();
        info!("Opening raster: {:?} (band {})", path, index);
        let dataset = Dataset::open(path)?;
        Self::from_dataset(&dataset, index)
    }

    /// Open `path` and replace each cell of band `index` with its value in attribute
    /// column `field`. Cells without a table row become nodata.
    pub fn open_attribute<P: AsRef<Path>>(
        path: P,
        index: usize,
        field: &str,
    ) -> Result<Self, RasterError> {
        let path = path.as_ref();
        info!(
            "Opening raster: {:?} (band {}, attribute `{}`)",
            path, index, field
        );
        let dataset = Dataset::open(path)?;
        let raster = Self::from_dataset(&dataset, index)?;

        let band = dataset.rasterband(index)?;
        let rat = band
            .default_rat()
            .ok_or(RasterError::MissingAttributeTable { band: index })?;
        let lookup = attribute_lookup(&rat, field)?;

        Ok(ClassRaster {
            grid: raster
                .grid
                .mapv(|cell| cell.and_then(|v| lookup.get(&v).copied())),
            georef: raster.georef,
        })
    }

    /// Read band `index` (1-based) of an already open dataset
    pub fn from_dataset(dataset: &Dataset, index: usize) -> Result<Self, RasterError> {
        let bands = dataset.raster_count() as usize;
        if index == 0 || index > bands {
            return Err(RasterError::BandOutOfRange { index, bands });
        }

        let (size_x, size_y) = dataset.raster_size();
        let (size_x, size_y) = (size_x as usize, size_y as usize);
        if size_x == 0 || size_y == 0 {
            return Err(RasterError::InvalidDimensions(size_x, size_y));
        }

        // Ungeoreferenced datasets still get an identity transform so alignment checks work
        let geotransform = dataset
            .geo_transform()
            .unwrap_or([0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

        let band = dataset.rasterband(index)?;
        let nodata = band.no_data_value();
        debug!(
            "Raster {}x{}, nodata={:?}, geotransform={:?}",
            size_x, size_y, nodata, geotransform
        );

        let window = (size_x, size_y);
        let buf = band.read_as::<i32>((0, 0), window, window, None)?;
        let cells: Vec<Option<i32>> = buf
            .data()
            .iter()
            .map(|&v| match nodata {
                Some(nd) if v as f64 == nd => None,
                _ => Some(v),
            })
            .collect();
        let grid = Array2::from_shape_vec((size_y, size_x), cells)
            .map_err(|_| RasterError::DimensionMismatch(size_x, size_y, size_x, size_y))?;

        Ok(ClassRaster {
            grid,
            georef: GeoReference {
                size_x,
                size_y,
                geotransform,
                projection: dataset.projection(),
                nodata,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdal::raster::RatFieldType;

    fn gap_table(value_usage: RatFieldUsage) -> RasterAttributeTable {
        let mut rat = RasterAttributeTable::new();
        rat.create_column("Value", RatFieldType::Integer, value_usage)
            .unwrap();
        rat.create_column("GAP_Sts", RatFieldType::Integer, RatFieldUsage::Generic)
            .unwrap();
        for (row, (id, gap)) in [(17, 1), (250, 2), (903, 4)].into_iter().enumerate() {
            rat.set_value_as_int(row, 0, id).unwrap();
            rat.set_value_as_int(row, 1, gap).unwrap();
        }
        rat
    }

    #[test]
    fn attribute_lookup_keys_on_value_column() {
        let lookup = attribute_lookup(&gap_table(RatFieldUsage::MinMax), "gap_sts").unwrap();
        assert_eq!(lookup.get(&17), Some(&1));
        assert_eq!(lookup.get(&250), Some(&2));
        assert_eq!(lookup.get(&903), Some(&4));
        assert_eq!(lookup.get(&1), None);

        // A generic column named Value still keys the rows
        let lookup = attribute_lookup(&gap_table(RatFieldUsage::Generic), "GAP_Sts").unwrap();
        assert_eq!(lookup.get(&903), Some(&4));
    }

    #[test]
    fn attribute_lookup_falls_back_to_row_index() {
        let mut rat = RasterAttributeTable::new();
        rat.create_column("GAP_Sts", RatFieldType::Integer, RatFieldUsage::Generic)
            .unwrap();
        for (row, gap) in [4, 1, 2].into_iter().enumerate() {
            rat.set_value_as_int(row, 0, gap).unwrap();
        }
        let lookup = attribute_lookup(&rat, "GAP_Sts").unwrap();
        assert_eq!(lookup.get(&0), Some(&4));
        assert_eq!(lookup.get(&2), Some(&2));
    }

    #[test]
    fn unknown_attribute_field_lists_columns() {
        let err = attribute_lookup(&gap_table(RatFieldUsage::MinMax), "GAP_Status").unwrap_err();
        match err {
            RasterError::UnknownAttributeField { field, available } => {
                assert_eq!(field, "GAP_Status");
                assert_eq!(available, "Value,GAP_Sts");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    fn georef() -> GeoReference {
        GeoReference {
            size_x: 4,
            size_y: 3,
            geotransform: [-2_356_095.0, 30.0, 0.0, 3_172_605.0, 0.0, -30.0],
            projection: String::new(),
            nodata: None,
        }
    }

    #[test]
    fn identical_grids_are_aligned() {
        assert!(georef().check_aligned(&georef()).is_ok());
    }

    #[test]
    fn size_mismatch_rejected() {
        let mut other = georef();
        other.size_x = 5;
        assert!(matches!(
            georef().check_aligned(&other),
            Err(RasterError::GridMismatch(_))
        ));
    }

    #[test]
    fn origin_shift_rejected() {
        let mut other = georef();
        other.geotransform[0] += 15.0;
        assert!(georef().check_aligned(&other).is_err());
    }

    #[test]
    fn projection_checked_only_when_both_set() {
        let mut a = georef();
        let mut b = georef();
        a.projection = "EPSG:5070".to_string();
        assert!(a.check_aligned(&b).is_ok());
        b.projection = "EPSG:4326".to_string();
        assert!(a.check_aligned(&b).is_err());
    }
}
