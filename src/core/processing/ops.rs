use ndarray::{Array2, Zip};

use crate::core::processing::Grid;
use crate::error::{Error, Result};

fn ensure_same_shape(a: &Grid, b: &Grid) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(Error::dimension_mismatch(a.dim(), b.dim()));
    }
    Ok(())
}

/// Element-wise product: a * b. Nodata in either operand yields nodata.
pub fn multiply(a: &Grid, b: &Grid) -> Result<Grid> {
    ensure_same_shape(a, b)?;

    let mut cells = Vec::with_capacity(a.len());
    for (((row, col), a_val), b_val) in a.indexed_iter().zip(b.iter()) {
        let product = match (a_val, b_val) {
            (Some(x), Some(y)) => Some(x.checked_mul(*y).ok_or(Error::Overflow { row, col })?),
            _ => None,
        };
        cells.push(product);
    }

    Ok(Array2::from_shape_vec(a.dim(), cells)?)
}

/// Conditional merge: the combined value where defined, otherwise the fallback value.
pub fn fill_nodata(combined: &Grid, fallback: &Grid) -> Result<Grid> {
    ensure_same_shape(combined, fallback)?;
    Ok(Zip::from(combined)
        .and(fallback)
        .map_collect(|c, f| c.or(*f)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn multiply_propagates_nodata() {
        let a = array![[Some(42), None], [Some(11), None]];
        let b = array![[Some(10), Some(10)], [None, None]];
        let out = multiply(&a, &b).unwrap();
        assert_eq!(out, array![[Some(420), None], [None, None]]);
    }

    #[test]
    fn multiply_rejects_shape_mismatch() {
        let a = Array2::<Option<i32>>::from_elem((2, 3), Some(1));
        let b = Array2::<Option<i32>>::from_elem((3, 2), Some(1));
        assert!(matches!(
            multiply(&a, &b),
            Err(Error::DimensionMismatch {
                left_rows: 2,
                left_cols: 3,
                right_rows: 3,
                right_cols: 2
            })
        ));
    }

    #[test]
    fn multiply_detects_overflow() {
        let a = array![[Some(1), Some(i32::MAX)]];
        let b = array![[Some(2), Some(2)]];
        assert!(matches!(
            multiply(&a, &b),
            Err(Error::Overflow { row: 0, col: 1 })
        ));
    }

    #[test]
    fn fill_prefers_combined_value() {
        let combined = array![[Some(420), None], [Some(42), None]];
        let fallback = array![[Some(42), Some(42)], [Some(42), None]];
        let out = fill_nodata(&combined, &fallback).unwrap();
        assert_eq!(out, array![[Some(420), Some(42)], [Some(42), None]]);
    }

    #[test]
    fn fill_rejects_shape_mismatch() {
        let a = Array2::<Option<i32>>::from_elem((1, 2), None);
        let b = Array2::<Option<i32>>::from_elem((2, 1), None);
        assert!(fill_nodata(&a, &b).is_err());
    }
}
