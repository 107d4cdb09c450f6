//! Named dimensions with coordinate labels
//!
//! A dimension pairs an axis name with one coordinate label per index
//! position. Coordinates are carried as strings: band identifiers like
//! "B4" are not numeric, and pixel axes only ever use their labels for
//! reporting, never for arithmetic.

/// A named, labeled axis of a LabeledArray
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Axis name, e.g. "x", "y" or "band"
    pub name: String,

    /// One coordinate label per index position along the axis
    pub coords: Vec<String>,
}

impl Dimension {
    /// Create a dimension from a name and explicit coordinate labels
    pub fn new(name: &str, coords: Vec<String>) -> Self {
        Dimension {
            name: name.to_string(),
            coords,
        }
    }

    /// Create a dimension whose coordinates are just the index positions
    ///
    /// Convenient for pixel axes where "0".."len" is all the labeling
    /// a raster provides.
    pub fn indexed(name: &str, len: usize) -> Self {
        Dimension {
            name: name.to_string(),
            coords: (0..len).map(|i| i.to_string()).collect(),
        }
    }

    /// Number of index positions along the axis
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether the axis has no positions
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Restrict the dimension to a sub-range of positions
    ///
    /// Used when cutting a chunk out of a larger array: the chunk keeps
    /// the coordinate labels of the rows it actually covers.
    pub fn slice(&self, start: usize, len: usize) -> Self {
        Dimension {
            name: self.name.clone(),
            coords: self.coords[start..start + len].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_coords() {
        let dim = Dimension::indexed("y", 3);
        assert_eq!(dim.name, "y");
        assert_eq!(dim.coords, vec!["0", "1", "2"]);
        assert_eq!(dim.len(), 3);
    }

    #[test]
    fn test_slice_keeps_labels() {
        let dim = Dimension::indexed("y", 5).slice(2, 2);
        assert_eq!(dim.coords, vec!["2", "3"]);
    }
}
