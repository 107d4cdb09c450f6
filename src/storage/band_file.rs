//! Band-sequential raster files
//!
//! On-disk backing for out-of-core processing: a small header followed by
//! every band's plane as raw little-endian f64, row-major, one band after
//! the other. Band-sequential layout keeps a row strip of one band
//! contiguous on disk, so the chunk loop reads and writes with plain
//! seeks and never touches data outside the requested region.
//!
//! Layout:
//!   magic "BNDK" | version u16 | width u32 | height u32 | band count u32
//!   per band: label length u16 | label bytes (UTF-8)
//!   data: bands * height * width f64 values, little-endian

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};

use crate::array::{Dimension, LabeledArray, SplitResult};
use crate::errors::{BandError, BandResult};
use crate::split::Region;

use super::{ChunkSink, ChunkSource};

const MAGIC: &[u8; 4] = b"BNDK";
const VERSION: u16 = 1;
const VALUE_SIZE: u64 = std::mem::size_of::<f64>() as u64;

/// Byte offset of one value within the data section
fn value_offset(band: u64, row: u64, col: u64, width: u64, height: u64) -> u64 {
    ((band * height + row) * width + col) * VALUE_SIZE
}

/// Reader for band-sequential raster files
pub struct BandFileSource {
    file: BufReader<File>,
    dims: Vec<Dimension>,
    width: u64,
    height: u64,
    data_start: u64,
}

impl BandFileSource {
    /// Open a band-sequential file and parse its header
    pub fn open(path: &str) -> BandResult<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(BandError::InvalidFormat(format!(
                "Not a band-sequential file: {}",
                path
            )));
        }
        let version = reader.read_u16::<LittleEndian>()?;
        if version != VERSION {
            return Err(BandError::InvalidFormat(format!(
                "Unsupported band file version: {}",
                version
            )));
        }

        let width = reader.read_u32::<LittleEndian>()? as u64;
        let height = reader.read_u32::<LittleEndian>()? as u64;
        let bands = reader.read_u32::<LittleEndian>()?;

        let mut labels = Vec::with_capacity(bands as usize);
        for _ in 0..bands {
            let len = reader.read_u16::<LittleEndian>()? as usize;
            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf)?;
            let label = String::from_utf8(buf)
                .map_err(|e| BandError::InvalidFormat(format!("Bad band label: {}", e)))?;
            labels.push(label);
        }

        let data_start = reader.stream_position()?;
        debug!(
            "Opened band file {}: {} bands, {}x{}, data at {}",
            path, bands, width, height, data_start
        );

        let dims = vec![
            Dimension::new("band", labels),
            Dimension::indexed("y", height as usize),
            Dimension::indexed("x", width as usize),
        ];

        Ok(BandFileSource {
            file: reader,
            dims,
            width,
            height,
            data_start,
        })
    }

    /// Read the whole file into a labeled array
    pub fn read_all(&mut self) -> BandResult<LabeledArray> {
        let region = Region::new(0, 0, self.width as u32, self.height as u32);
        self.read_chunk(region)
    }
}

impl ChunkSource for BandFileSource {
    fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    fn read_chunk(&mut self, region: Region) -> BandResult<LabeledArray> {
        if region.end_x() as u64 > self.width || region.end_y() as u64 > self.height {
            return Err(BandError::GenericError(format!(
                "{} exceeds raster {}x{}",
                region, self.width, self.height
            )));
        }

        let bands = self.dims[0].len();
        let rows = region.height as usize;
        let cols = region.width as usize;
        let mut values = Vec::with_capacity(bands * rows * cols);

        for band in 0..bands as u64 {
            for row in 0..rows as u64 {
                let offset = self.data_start
                    + value_offset(
                        band,
                        region.y as u64 + row,
                        region.x as u64,
                        self.width,
                        self.height,
                    );
                self.file.seek(SeekFrom::Start(offset))?;
                for _ in 0..cols {
                    values.push(self.file.read_f64::<LittleEndian>()?);
                }
            }
        }

        let dims = vec![
            self.dims[0].clone(),
            self.dims[1].slice(region.y as usize, rows),
            self.dims[2].slice(region.x as usize, cols),
        ];
        LabeledArray::from_values(values, dims)
    }
}

/// Writer for band-sequential raster files
///
/// The file is created at its final size up front; chunk writes then land
/// at their computed offsets, so disjoint regions can be written in any
/// order and the result is identical.
pub struct BandFileSink {
    file: File,
    labels: Vec<String>,
    width: u64,
    height: u64,
    data_start: u64,
}

impl BandFileSink {
    /// Create a band-sequential file for the given plane and band labels
    pub fn create(path: &str, width: u32, height: u32, labels: Vec<String>) -> BandResult<Self> {
        let mut file = File::create(path)?;

        file.write_all(MAGIC)?;
        file.write_u16::<LittleEndian>(VERSION)?;
        file.write_u32::<LittleEndian>(width)?;
        file.write_u32::<LittleEndian>(height)?;
        file.write_u32::<LittleEndian>(labels.len() as u32)?;
        for label in &labels {
            let bytes = label.as_bytes();
            file.write_u16::<LittleEndian>(bytes.len() as u16)?;
            file.write_all(bytes)?;
        }

        let data_start = file.stream_position()?;
        let total = labels.len() as u64 * width as u64 * height as u64 * VALUE_SIZE;
        file.set_len(data_start + total)?;

        info!(
            "Created band file {}: {} bands, {}x{}",
            path,
            labels.len(),
            width,
            height
        );

        Ok(BandFileSink {
            file,
            labels,
            width: width as u64,
            height: height as u64,
            data_start,
        })
    }

    /// Write a fully materialized split result in one pass
    pub fn write_all(&mut self, result: &SplitResult) -> BandResult<()> {
        let region = Region::new(0, 0, self.width as u32, self.height as u32);
        self.write_chunk(region, result)
    }

    /// Flush buffered data to disk
    pub fn finish(mut self) -> BandResult<()> {
        self.file.flush()?;
        Ok(())
    }
}

impl ChunkSink for BandFileSink {
    fn write_chunk(&mut self, region: Region, chunk: &SplitResult) -> BandResult<()> {
        if region.end_x() as u64 > self.width || region.end_y() as u64 > self.height {
            return Err(BandError::GenericError(format!(
                "{} exceeds raster {}x{}",
                region, self.width, self.height
            )));
        }

        for attribute in chunk.attributes() {
            let band = self
                .labels
                .iter()
                .position(|l| *l == attribute.name)
                .ok_or_else(|| {
                    BandError::GenericError(format!("Unknown attribute: {}", attribute.name))
                })? as u64;

            let values = attribute
                .values
                .view()
                .into_dimensionality::<ndarray::Ix2>()?;

            for row in 0..region.height as u64 {
                let offset = self.data_start
                    + value_offset(
                        band,
                        region.y as u64 + row,
                        region.x as u64,
                        self.width,
                        self.height,
                    );
                self.file.seek(SeekFrom::Start(offset))?;
                for value in values.row(row as usize) {
                    self.file.write_f64::<LittleEndian>(*value)?;
                }
            }
        }
        Ok(())
    }
}
