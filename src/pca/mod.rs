//! Principal component analysis over band tables
//!
//! PCA numerics are delegated to linfa-reduction; this module wraps the
//! fit and transform primitives and reshapes component columns back into
//! the x/y plane as attributes.

use linfa::traits::{Fit, Transformer};
use linfa::DatasetBase;
use linfa_reduction::Pca;
use log::info;
use ndarray::Array2;

use crate::array::{Attribute, LabeledArray, SplitResult};
use crate::errors::{BandError, BandResult};
use crate::split::DimensionSplitter;
use crate::table;

/// Fitted PCA model
pub struct PcaModel {
    inner: Pca<f64>,
    n_components: usize,
}

impl PcaModel {
    /// Number of components the model projects onto
    pub fn n_components(&self) -> usize {
        self.n_components
    }
}

/// Fit a PCA model on a pixels x bands table
pub fn fit(table: &Array2<f64>, n_components: usize) -> BandResult<PcaModel> {
    if n_components == 0 || n_components > table.ncols() {
        return Err(BandError::PcaError(format!(
            "Component count {} out of range for {} bands",
            n_components,
            table.ncols()
        )));
    }

    let dataset = DatasetBase::new(table.clone(), ());
    let inner = Pca::params(n_components)
        .fit(&dataset)
        .map_err(|e| BandError::PcaError(e.to_string()))?;
    Ok(PcaModel { inner, n_components })
}

/// Project a table onto a fitted model's components
pub fn transform(model: &PcaModel, table: &Array2<f64>) -> Array2<f64> {
    let dataset = DatasetBase::new(table.clone(), ());
    model.inner.transform(dataset).records
}

/// Decompose an array's slices along a dimension into principal components
///
/// Splits the dimension, stacks the attributes into a table, fits a PCA
/// and reshapes the component columns back into the x/y plane. Attributes
/// are named PC1..PCn in order of explained variance.
pub fn decompose(array: &LabeledArray, dim: &str, n_components: usize) -> BandResult<SplitResult> {
    let split = DimensionSplitter::split(array, dim)?;
    let data = table::stack(&split)?;

    info!(
        "Fitting PCA with {} components over {} bands",
        n_components,
        split.len()
    );
    let model = fit(&data, n_components)?;
    let transformed = transform(&model, &data);

    // Rank-deficient band covariance yields fewer columns than requested
    if transformed.ncols() < n_components {
        return Err(BandError::PcaError(format!(
            "PCA produced {} components for {} requested; bands are linearly dependent",
            transformed.ncols(),
            n_components
        )));
    }

    let shape: Vec<usize> = split.dims().iter().map(|d| d.len()).collect();
    let mut attributes = Vec::with_capacity(n_components);
    for c in 0..n_components {
        let plane = transformed
            .column(c)
            .to_owned()
            .into_shape(shape.clone())?;
        attributes.push(Attribute {
            name: format!("PC{}", c + 1),
            values: plane,
        });
    }

    Ok(SplitResult::new(split.dims().to_vec(), attributes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Dimension;

    fn correlated_array() -> LabeledArray {
        let dims = vec![
            Dimension::new(
                "band",
                vec!["B1".to_string(), "B2".to_string(), "B3".to_string()],
            ),
            Dimension::indexed("y", 4),
            Dimension::indexed("x", 4),
        ];
        // Strongly correlated bands with a band-specific wiggle keeping
        // the covariance full rank
        let mut values = Vec::new();
        for b in 0..3usize {
            for i in 0..16usize {
                let base = i as f64 + ((i * 7) % 5) as f64 * 0.1;
                let wiggle = ((i + 3 * b) % 4) as f64 * 0.25;
                values.push(base * (b + 1) as f64 + wiggle);
            }
        }
        LabeledArray::from_values(values, dims).unwrap()
    }

    fn collinear_array() -> LabeledArray {
        let dims = vec![
            Dimension::new("band", vec!["B1".to_string(), "B2".to_string()]),
            Dimension::indexed("y", 4),
            Dimension::indexed("x", 4),
        ];
        // B2 is an exact multiple of B1, covariance rank 1
        let mut values = Vec::new();
        for b in 0..2usize {
            for i in 0..16usize {
                values.push(i as f64 * (b + 1) as f64);
            }
        }
        LabeledArray::from_values(values, dims).unwrap()
    }

    #[test]
    fn test_decompose_shapes_and_names() {
        let result = decompose(&correlated_array(), "band", 2).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.attributes()[0].name, "PC1");
        assert_eq!(result.attributes()[1].name, "PC2");
        for attribute in result.attributes() {
            assert_eq!(attribute.values.shape(), &[4, 4]);
        }
    }

    #[test]
    fn test_collinear_bands_error_instead_of_truncating() {
        let err = decompose(&collinear_array(), "band", 2).unwrap_err();
        assert!(matches!(err, BandError::PcaError(_)));
    }

    #[test]
    fn test_component_count_validation() {
        let array = correlated_array();
        let split = DimensionSplitter::split(&array, "band").unwrap();
        let data = table::stack(&split).unwrap();
        assert!(matches!(fit(&data, 0), Err(BandError::PcaError(_))));
        assert!(matches!(fit(&data, 4), Err(BandError::PcaError(_))));
    }
}
