//! Dimension-to-attribute splitting
//!
//! Splitting turns one dimension of a labeled array into a set of named
//! attributes, one per coordinate value of the removed dimension. The
//! removed dimension is a position in a regular grid, not a join key, so
//! every attribute is produced by a positional slice instead of the
//! row-keyed pivot a tabular reshape would need. That is also what makes
//! the operation applicable chunk by chunk: a slice of a chunk is the
//! matching chunk of the slice, with no cross-chunk matching logic.

use log::debug;
use ndarray::Axis;

use crate::array::{Attribute, LabeledArray, SplitResult};
use crate::errors::{BandError, BandResult};

/// Splits a named dimension of a labeled array into attributes
pub struct DimensionSplitter;

impl DimensionSplitter {
    /// Split `array` along the dimension called `dimension_name`
    ///
    /// For each coordinate value `v` of the removed dimension the result
    /// carries one attribute named `v` holding the slice of the array with
    /// that dimension fixed. The remaining dimensions keep their original
    /// coordinates and order.
    ///
    /// # Arguments
    /// * `array` - Input array
    /// * `dimension_name` - Name of the dimension to remove
    ///
    /// # Returns
    /// The attributes, or InvalidDimension when no dimension carries
    /// the requested name
    pub fn split(array: &LabeledArray, dimension_name: &str) -> BandResult<SplitResult> {
        let axis = array
            .axis_of(dimension_name)
            .ok_or_else(|| BandError::InvalidDimension(dimension_name.to_string()))?;

        let split_dim = &array.dims()[axis];
        debug!(
            "Splitting dimension '{}' (axis {}) into {} attributes",
            dimension_name,
            axis,
            split_dim.len()
        );

        let remaining: Vec<_> = array
            .dims()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != axis)
            .map(|(_, d)| d.clone())
            .collect();
        let expected: Vec<usize> = remaining.iter().map(|d| d.len()).collect();

        let mut attributes = Vec::with_capacity(split_dim.len());
        for (index, coord) in split_dim.coords.iter().enumerate() {
            let values = array.data().index_axis(Axis(axis), index).to_owned();
            if values.shape() != expected.as_slice() {
                return Err(BandError::ShapeMismatch {
                    expected: expected.clone(),
                    actual: values.shape().to_vec(),
                });
            }
            attributes.push(Attribute {
                name: coord.clone(),
                values,
            });
        }

        Ok(SplitResult::new(remaining, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Dimension;

    /// The 2x2x2 scenario: dims x, y, band with A[x,y,band] = x*10 + y + band*100
    fn scenario() -> LabeledArray {
        let dims = vec![
            Dimension::indexed("x", 2),
            Dimension::indexed("y", 2),
            Dimension::new("band", vec!["1".to_string(), "2".to_string()]),
        ];
        let mut values = Vec::new();
        for x in 0..2 {
            for y in 0..2 {
                for band in 1..=2 {
                    values.push((x * 10 + y + band * 100) as f64);
                }
            }
        }
        LabeledArray::from_values(values, dims).unwrap()
    }

    #[test]
    fn test_split_band_dimension() {
        let array = scenario();
        let result = DimensionSplitter::split(&array, "band").unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.total_cells(), array.total_cells());

        let first = result.attribute("1").unwrap();
        assert_eq!(first.values.shape(), &[2, 2]);
        assert_eq!(
            first.values.iter().copied().collect::<Vec<f64>>(),
            vec![100.0, 101.0, 110.0, 111.0]
        );

        let second = result.attribute("2").unwrap();
        assert_eq!(
            second.values.iter().copied().collect::<Vec<f64>>(),
            vec![200.0, 201.0, 210.0, 211.0]
        );
    }

    #[test]
    fn test_remaining_dims_keep_order() {
        let result = DimensionSplitter::split(&scenario(), "y").unwrap();
        let names: Vec<&str> = result.dims().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["x", "band"]);
    }

    #[test]
    fn test_unknown_dimension_fails() {
        let err = DimensionSplitter::split(&scenario(), "nonexistent").unwrap_err();
        match err {
            BandError::InvalidDimension(name) => assert_eq!(name, "nonexistent"),
            other => panic!("expected InvalidDimension, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_on_leading_dimension() {
        let dims = vec![
            Dimension::new("band", vec!["B1".to_string(), "B2".to_string(), "B3".to_string()]),
            Dimension::indexed("y", 4),
            Dimension::indexed("x", 5),
        ];
        let values: Vec<f64> = (0..60).map(|v| v as f64).collect();
        let array = LabeledArray::from_values(values, dims).unwrap();

        let merged = DimensionSplitter::split(&array, "band")
            .unwrap()
            .merge("band")
            .unwrap();
        assert_eq!(merged, array);
    }
}
