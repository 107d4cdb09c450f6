//! Labeled multi-dimensional arrays
//!
//! A LabeledArray couples an ndarray with named dimensions so operations
//! can address axes by name ("band") instead of position. The shape and
//! the dimension metadata are validated together at construction; after
//! that every consumer may rely on them agreeing.

use ndarray::{ArrayD, IxDyn};

use crate::errors::{BandError, BandResult};

use super::dimension::Dimension;

/// An n-dimensional f64 array with named, ordered dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    /// Raw array data
    data: ArrayD<f64>,
    /// Dimension metadata, one entry per axis in axis order
    dims: Vec<Dimension>,
}

impl LabeledArray {
    /// Create a labeled array, validating shape against dimension metadata
    ///
    /// # Arguments
    /// * `data` - The array values
    /// * `dims` - One Dimension per axis, in axis order
    ///
    /// # Returns
    /// The labeled array, or ShapeMismatch when the dimension metadata
    /// disagrees with the array shape
    pub fn new(data: ArrayD<f64>, dims: Vec<Dimension>) -> BandResult<Self> {
        let expected: Vec<usize> = dims.iter().map(|d| d.len()).collect();
        if data.ndim() != dims.len() || data.shape() != expected.as_slice() {
            return Err(BandError::ShapeMismatch {
                expected,
                actual: data.shape().to_vec(),
            });
        }
        Ok(LabeledArray { data, dims })
    }

    /// Build a labeled array from a flat row-major value buffer
    pub fn from_values(values: Vec<f64>, dims: Vec<Dimension>) -> BandResult<Self> {
        let shape: Vec<usize> = dims.iter().map(|d| d.len()).collect();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), values)?;
        LabeledArray::new(data, dims)
    }

    /// The underlying array data
    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Dimension metadata in axis order
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// Find the axis index of a dimension by name
    pub fn axis_of(&self, name: &str) -> Option<usize> {
        self.dims.iter().position(|d| d.name == name)
    }

    /// Look up a dimension by name
    pub fn dim(&self, name: &str) -> Option<&Dimension> {
        self.dims.iter().find(|d| d.name == name)
    }

    /// Total number of cells in the array
    pub fn total_cells(&self) -> usize {
        self.data.len()
    }

    /// Consume the array, returning its parts
    pub fn into_parts(self) -> (ArrayD<f64>, Vec<Dimension>) {
        (self.data, self.dims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BandError;

    #[test]
    fn test_construction_validates_shape() {
        let dims = vec![Dimension::indexed("y", 2), Dimension::indexed("x", 3)];
        let ok = LabeledArray::from_values(vec![0.0; 6], dims.clone());
        assert!(ok.is_ok());

        let bad = LabeledArray::new(ArrayD::zeros(IxDyn(&[3, 2])), dims);
        match bad {
            Err(BandError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, vec![2, 3]);
                assert_eq!(actual, vec![3, 2]);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_axis_lookup() {
        let dims = vec![
            Dimension::new("band", vec!["B1".into(), "B2".into()]),
            Dimension::indexed("y", 2),
            Dimension::indexed("x", 2),
        ];
        let array = LabeledArray::from_values(vec![0.0; 8], dims).unwrap();
        assert_eq!(array.axis_of("band"), Some(0));
        assert_eq!(array.axis_of("x"), Some(2));
        assert_eq!(array.axis_of("time"), None);
        assert_eq!(array.total_cells(), 8);
    }
}
