//! Multi-band TIFF loading
//!
//! Decodes every directory of a TIFF file as one band and stacks them
//! into a labeled array with dimensions [band, y, x]. Sample values are
//! widened to f64; the codec details stay inside the tiff crate.

use log::{debug, info};
use std::fs::File;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};

use crate::array::{Dimension, LabeledArray};
use crate::errors::{BandError, BandResult};

/// Read all bands of a TIFF file into a labeled array
///
/// Bands are the file's image directories in order, labeled "B1".."Bn".
/// Every band must share the dimensions of the first.
pub fn read_bands<P: AsRef<Path>>(path: P) -> BandResult<LabeledArray> {
    let file = File::open(path.as_ref())?;
    let mut decoder = Decoder::new(file)?;

    let mut values: Vec<f64> = Vec::new();
    let mut bands = 0usize;
    let (mut width, mut height) = (0usize, 0usize);

    loop {
        let (w, h) = decoder.dimensions()?;
        let (w, h) = (w as usize, h as usize);
        if bands == 0 {
            width = w;
            height = h;
        } else if w != width || h != height {
            return Err(BandError::ShapeMismatch {
                expected: vec![height, width],
                actual: vec![h, w],
            });
        }

        match decoder.read_image()? {
            DecodingResult::U8(buf) => values.extend(buf.into_iter().map(|v| v as f64)),
            DecodingResult::U16(buf) => values.extend(buf.into_iter().map(|v| v as f64)),
            DecodingResult::U32(buf) => values.extend(buf.into_iter().map(|v| v as f64)),
            DecodingResult::F32(buf) => values.extend(buf.into_iter().map(|v| v as f64)),
            DecodingResult::F64(buf) => values.extend(buf),
            _ => return Err(BandError::UnsupportedSampleFormat),
        }
        bands += 1;
        debug!("Decoded band {} ({}x{})", bands, width, height);

        if decoder.more_images() {
            decoder.next_image()?;
        } else {
            break;
        }
    }

    info!("Loaded {} bands of {}x{}", bands, width, height);

    let dims = vec![
        Dimension::new("band", (1..=bands).map(|b| format!("B{}", b)).collect()),
        Dimension::indexed("y", height),
        Dimension::indexed("x", width),
    ];
    LabeledArray::from_values(values, dims)
}
