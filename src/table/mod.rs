//! Array-to-table reshaping and CSV export
//!
//! A split result already holds one 2-D plane per attribute, so turning
//! it into a pixels-by-attributes table is a flat reshape per column.
//! No row key is ever built; pixel order is the row-major order of the
//! plane and is the same for every column by construction.

use csv::Writer;
use log::info;
use ndarray::Array2;

use crate::array::SplitResult;
use crate::errors::{BandError, BandResult};

/// Reshape a split result into a pixels x attributes table
pub fn stack(result: &SplitResult) -> BandResult<Array2<f64>> {
    if result.is_empty() {
        return Err(BandError::GenericError(
            "Cannot tabulate an empty split result".to_string(),
        ));
    }

    let cells = result.attributes()[0].values.len();
    let mut table = Array2::<f64>::zeros((cells, result.len()));
    for (i, attribute) in result.attributes().iter().enumerate() {
        let flat = attribute.values.clone().into_shape(cells)?;
        table.column_mut(i).assign(&flat);
    }
    Ok(table)
}

/// Column headers for a stacked table
pub fn headers(result: &SplitResult) -> Vec<String> {
    result.attributes().iter().map(|a| a.name.clone()).collect()
}

/// Write a table with headers to a CSV file
pub fn write_csv(table: &Array2<f64>, headers: &[String], path: &str) -> BandResult<()> {
    info!("Writing {} rows to {}", table.nrows(), path);

    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(headers)?;
    for row in table.rows() {
        wtr.serialize(row.to_vec())?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::{Dimension, LabeledArray};
    use crate::split::DimensionSplitter;

    #[test]
    fn test_stack_column_order_matches_attributes() {
        let dims = vec![
            Dimension::new("band", vec!["B1".to_string(), "B2".to_string()]),
            Dimension::indexed("y", 2),
            Dimension::indexed("x", 3),
        ];
        let values: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let array = LabeledArray::from_values(values, dims).unwrap();
        let split = DimensionSplitter::split(&array, "band").unwrap();

        let table = stack(&split).unwrap();
        assert_eq!(table.dim(), (6, 2));
        assert_eq!(headers(&split), vec!["B1", "B2"]);

        // Row-major pixel order per column
        assert_eq!(table[[0, 0]], 0.0);
        assert_eq!(table[[5, 0]], 5.0);
        assert_eq!(table[[0, 1]], 6.0);
        assert_eq!(table[[5, 1]], 11.0);
    }
}
