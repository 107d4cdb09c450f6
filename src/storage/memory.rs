//! In-memory chunk source and sink
//!
//! Used for rasters that fit in memory and for verifying that the chunked
//! loop produces the same output as a whole-array split.

use ndarray::{s, Array2, Ix2, Ix3};

use crate::array::{Attribute, Dimension, LabeledArray, SplitResult};
use crate::errors::{BandError, BandResult};
use crate::split::Region;

use super::{ChunkSink, ChunkSource};

/// Chunk source backed by a fully materialized labeled array
pub struct MemorySource {
    array: LabeledArray,
}

impl MemorySource {
    /// Wrap an array as a chunk source stacked along `stack_dim`
    ///
    /// The array must be three-dimensional. If the stack dimension is not
    /// already the leading axis the array is transposed so that sources
    /// always present [stack, rows, cols] order.
    pub fn new(array: LabeledArray, stack_dim: &str) -> BandResult<Self> {
        let axis = array
            .axis_of(stack_dim)
            .ok_or_else(|| BandError::InvalidDimension(stack_dim.to_string()))?;
        if array.dims().len() != 3 {
            return Err(BandError::GenericError(format!(
                "Memory source requires a 3-D array, got {} dimensions",
                array.dims().len()
            )));
        }

        if axis == 0 {
            return Ok(MemorySource { array });
        }

        // Rotate the stack axis to the front, keeping plane order intact
        let mut order: Vec<usize> = (0..3).filter(|i| *i != axis).collect();
        order.insert(0, axis);
        let (data, dims) = array.into_parts();
        let permuted = data
            .into_dimensionality::<Ix3>()?
            .permuted_axes([order[0], order[1], order[2]]);
        let dims: Vec<Dimension> = order.iter().map(|i| dims[*i].clone()).collect();
        let array = LabeledArray::new(permuted.as_standard_layout().to_owned().into_dyn(), dims)?;
        Ok(MemorySource { array })
    }
}

impl ChunkSource for MemorySource {
    fn dims(&self) -> &[Dimension] {
        self.array.dims()
    }

    fn read_chunk(&mut self, region: Region) -> BandResult<LabeledArray> {
        let view = self.array.data().view().into_dimensionality::<Ix3>()?;
        let (y0, y1) = (region.y as usize, region.end_y() as usize);
        let (x0, x1) = (region.x as usize, region.end_x() as usize);

        let shape = view.dim();
        if y1 > shape.1 || x1 > shape.2 {
            return Err(BandError::GenericError(format!(
                "{} exceeds plane {}x{}",
                region, shape.2, shape.1
            )));
        }

        let sub = view.slice(s![.., y0..y1, x0..x1]).to_owned().into_dyn();
        let dims = vec![
            self.array.dims()[0].clone(),
            self.array.dims()[1].slice(y0, y1 - y0),
            self.array.dims()[2].slice(x0, x1 - x0),
        ];
        LabeledArray::new(sub, dims)
    }
}

/// Chunk sink assembling a full split result in memory
pub struct MemorySink {
    dims: Vec<Dimension>,
    labels: Vec<String>,
    planes: Vec<Array2<f64>>,
}

impl MemorySink {
    /// Create a sink for a [rows, cols] plane and the given attribute labels
    pub fn new(dims: Vec<Dimension>, labels: Vec<String>) -> Self {
        let height = dims[0].len();
        let width = dims[1].len();
        let planes = labels.iter().map(|_| Array2::zeros((height, width))).collect();
        MemorySink { dims, labels, planes }
    }

    /// Consume the sink, returning the assembled split result
    pub fn into_result(self) -> SplitResult {
        let attributes = self
            .labels
            .into_iter()
            .zip(self.planes)
            .map(|(name, plane)| Attribute {
                name,
                values: plane.into_dyn(),
            })
            .collect();
        SplitResult::new(self.dims, attributes)
    }
}

impl ChunkSink for MemorySink {
    fn write_chunk(&mut self, region: Region, chunk: &SplitResult) -> BandResult<()> {
        let (y0, y1) = (region.y as usize, region.end_y() as usize);
        let (x0, x1) = (region.x as usize, region.end_x() as usize);

        for attribute in chunk.attributes() {
            let index = self
                .labels
                .iter()
                .position(|l| *l == attribute.name)
                .ok_or_else(|| {
                    BandError::GenericError(format!("Unknown attribute: {}", attribute.name))
                })?;

            let values = attribute.values.view().into_dimensionality::<Ix2>()?;
            self.planes[index]
                .slice_mut(s![y0..y1, x0..x1])
                .assign(&values);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::DimensionSplitter;

    fn plane_array() -> LabeledArray {
        let dims = vec![
            Dimension::indexed("y", 3),
            Dimension::indexed("x", 4),
            Dimension::new("band", vec!["B1".to_string(), "B2".to_string()]),
        ];
        let values: Vec<f64> = (0..24).map(|v| v as f64).collect();
        LabeledArray::from_values(values, dims).unwrap()
    }

    #[test]
    fn test_source_rotates_stack_axis_to_front() {
        let mut source = MemorySource::new(plane_array(), "band").unwrap();
        let names: Vec<&str> = source.dims().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["band", "y", "x"]);

        let chunk = source.read_chunk(Region::new(0, 0, 4, 3)).unwrap();
        assert_eq!(chunk.data().shape(), &[2, 3, 4]);
        // band B1 at y=0, x=1 was value index 2 in the original layout
        assert_eq!(chunk.data()[[0, 0, 1]], 2.0);
    }

    #[test]
    fn test_sink_reassembles_chunks() {
        let mut source = MemorySource::new(plane_array(), "band").unwrap();
        let full = source.read_chunk(Region::new(0, 0, 4, 3)).unwrap();
        let expected = DimensionSplitter::split(&full, "band").unwrap();

        let mut sink = MemorySink::new(
            full.dims()[1..].to_vec(),
            vec!["B1".to_string(), "B2".to_string()],
        );
        for region in [Region::new(0, 0, 4, 2), Region::new(0, 2, 4, 1)] {
            let chunk = source.read_chunk(region).unwrap();
            let split = DimensionSplitter::split(&chunk, "band").unwrap();
            sink.write_chunk(region, &split).unwrap();
        }

        assert_eq!(sink.into_result(), expected);
    }
}
