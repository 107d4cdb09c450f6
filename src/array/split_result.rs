//! Result of splitting a dimension into attributes

use ndarray::{ArrayD, Axis};

use crate::errors::{BandError, BandResult};

use super::dimension::Dimension;
use super::labeled::LabeledArray;

/// One named slice produced by a dimension split
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name, taken from the removed dimension's coordinate label
    pub name: String,
    /// Slice values, shaped like the input minus the removed dimension
    pub values: ArrayD<f64>,
}

/// Collection of attributes produced by splitting one dimension
///
/// Holds one attribute per distinct coordinate of the removed dimension,
/// plus the metadata of the dimensions that survived the split. The total
/// cell count across attributes always equals the input's cell count.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitResult {
    /// Dimensions remaining after the split, in original order
    dims: Vec<Dimension>,
    /// One attribute per coordinate of the removed dimension
    attributes: Vec<Attribute>,
}

impl SplitResult {
    pub(crate) fn new(dims: Vec<Dimension>, attributes: Vec<Attribute>) -> Self {
        SplitResult { dims, attributes }
    }

    /// Dimensions remaining after the split
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// The attributes in removed-dimension coordinate order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the split produced no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Total cell count summed over all attributes
    pub fn total_cells(&self) -> usize {
        self.attributes.iter().map(|a| a.values.len()).sum()
    }

    /// Merge the attributes back into a single array
    ///
    /// Reintroduces a dimension named `dim_name` as the leading axis, with
    /// one coordinate per attribute in attribute order. This is the inverse
    /// of splitting the leading dimension of an array.
    ///
    /// # Arguments
    /// * `dim_name` - Name for the reintroduced dimension
    ///
    /// # Returns
    /// A labeled array with the attribute arrays stacked along a new axis
    pub fn merge(&self, dim_name: &str) -> BandResult<LabeledArray> {
        if self.attributes.is_empty() {
            return Err(BandError::GenericError(
                "Cannot merge an empty split result".to_string(),
            ));
        }

        let views: Vec<_> = self.attributes.iter().map(|a| a.values.view()).collect();
        let stacked = ndarray::stack(Axis(0), &views)?;

        let mut dims = Vec::with_capacity(self.dims.len() + 1);
        dims.push(Dimension::new(
            dim_name,
            self.attributes.iter().map(|a| a.name.clone()).collect(),
        ));
        dims.extend(self.dims.iter().cloned());

        LabeledArray::new(stacked, dims)
    }
}
