//! Per-band summary statistics and band correlation

use ndarray::Array2;

use crate::array::LabeledArray;
use crate::errors::{BandError, BandResult};
use crate::split::DimensionSplitter;
use crate::table;

/// Summary statistics for one band
#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    /// Band name (coordinate label of the split dimension)
    pub band: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

/// Compute summary statistics per slice along a dimension
///
/// # Arguments
/// * `array` - Input array
/// * `dim` - Dimension whose slices are summarized, usually "band"
///
/// # Returns
/// One summary per coordinate of the dimension, in coordinate order
pub fn summarize(array: &LabeledArray, dim: &str) -> BandResult<Vec<BandSummary>> {
    let split = DimensionSplitter::split(array, dim)?;

    let mut summaries = Vec::with_capacity(split.len());
    for attribute in split.attributes() {
        let mean = attribute.values.mean().ok_or_else(|| {
            BandError::GenericError(format!("Band {} is empty", attribute.name))
        })?;
        let std_dev = attribute.values.std(0.0);
        let min = attribute.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = attribute
            .values
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        summaries.push(BandSummary {
            band: attribute.name.clone(),
            min,
            max,
            mean,
            std_dev,
        });
    }
    Ok(summaries)
}

/// Pearson correlation between all slices along a dimension
///
/// # Returns
/// A k x k matrix where entry (i, j) is the correlation between the
/// i-th and j-th coordinate slices. A constant slice correlates as NaN.
pub fn correlation_matrix(array: &LabeledArray, dim: &str) -> BandResult<Array2<f64>> {
    let split = DimensionSplitter::split(array, dim)?;
    let data = table::stack(&split)?;

    let (n, k) = data.dim();
    if n == 0 {
        return Err(BandError::GenericError("Empty array".to_string()));
    }

    let means: Vec<f64> = (0..k).map(|j| data.column(j).mean().unwrap_or(0.0)).collect();
    let stds: Vec<f64> = (0..k).map(|j| data.column(j).std(0.0)).collect();

    let mut matrix = Array2::zeros((k, k));
    for i in 0..k {
        for j in i..k {
            let cov = data
                .column(i)
                .iter()
                .zip(data.column(j).iter())
                .map(|(a, b)| (a - means[i]) * (b - means[j]))
                .sum::<f64>()
                / n as f64;
            let r = cov / (stds[i] * stds[j]);
            matrix[[i, j]] = r;
            matrix[[j, i]] = r;
        }
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Dimension;

    fn two_band_array() -> LabeledArray {
        let dims = vec![
            Dimension::new("band", vec!["B1".to_string(), "B2".to_string()]),
            Dimension::indexed("y", 2),
            Dimension::indexed("x", 2),
        ];
        // B2 = 2 * B1, perfectly correlated
        let values = vec![1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0];
        LabeledArray::from_values(values, dims).unwrap()
    }

    #[test]
    fn test_summaries() {
        let summaries = summarize(&two_band_array(), "band").unwrap();
        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.band, "B1");
        assert_eq!(first.min, 1.0);
        assert_eq!(first.max, 4.0);
        assert!((first.mean - 2.5).abs() < 1e-12);
        assert!((first.std_dev - (1.25f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_of_scaled_band_is_one() {
        let matrix = correlation_matrix(&two_band_array(), "band").unwrap();
        assert_eq!(matrix.dim(), (2, 2));
        assert!((matrix[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((matrix[[0, 1]] - 1.0).abs() < 1e-12);
        assert!((matrix[[1, 0]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_dimension() {
        let err = summarize(&two_band_array(), "time").unwrap_err();
        assert!(matches!(err, BandError::InvalidDimension(_)));
    }
}
