//! RGB composite rendering
//!
//! Stateless rendering of three bands into an RGB image: each channel is
//! rescaled to 0-255 using explicit scale breaks or the band's own
//! min/max, then the channels are interleaved into an image buffer.
//! Everything an invocation needs travels in the RenderConfig; there is
//! no ambient plotting state.

use image::{Rgb, RgbImage};
use log::info;
use ndarray::Ix2;

use crate::array::{Attribute, LabeledArray};
use crate::errors::{BandError, BandResult};
use crate::split::DimensionSplitter;

/// Channel mapping and scaling for a composite render
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Band name mapped to the red channel
    pub red: String,
    /// Band name mapped to the green channel
    pub green: String,
    /// Band name mapped to the blue channel
    pub blue: String,
    /// Explicit (low, high) scale breaks; min/max stretch when absent
    pub breaks: Option<(f64, f64)>,
}

/// Rescale one band plane to 0-255
fn rescale(attribute: &Attribute, breaks: Option<(f64, f64)>) -> BandResult<Vec<u8>> {
    let (low, high) = match breaks {
        Some(b) => b,
        None => {
            let min = attribute.values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = attribute
                .values
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            (min, max)
        }
    };
    if !(high > low) {
        return Err(BandError::GenericError(format!(
            "Degenerate scale breaks for band {}: [{}, {}]",
            attribute.name, low, high
        )));
    }

    let scale = 255.0 / (high - low);
    Ok(attribute
        .values
        .iter()
        .map(|v| ((v - low) * scale).clamp(0.0, 255.0).round() as u8)
        .collect())
}

/// Compose three bands of an array into an RGB image
///
/// # Arguments
/// * `array` - Band-stacked input array
/// * `dim` - Name of the band dimension
/// * `config` - Channel mapping and scale breaks
///
/// # Returns
/// The composed image, or an error when a mapped band does not exist
pub fn compose(array: &LabeledArray, dim: &str, config: &RenderConfig) -> BandResult<RgbImage> {
    let split = DimensionSplitter::split(array, dim)?;

    let channel = |name: &str| {
        split
            .attribute(name)
            .ok_or_else(|| BandError::GenericError(format!("No such band: {}", name)))
    };
    let red = rescale(channel(&config.red)?, config.breaks)?;
    let green = rescale(channel(&config.green)?, config.breaks)?;
    let blue = rescale(channel(&config.blue)?, config.breaks)?;

    let plane = split.attributes()[0].values.view().into_dimensionality::<Ix2>()?;
    let (height, width) = plane.dim();

    info!(
        "Composing {}x{} RGB image from bands {}/{}/{}",
        width, height, config.red, config.green, config.blue
    );

    let mut image = RgbImage::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            image.put_pixel(x as u32, y as u32, Rgb([red[i], green[i], blue[i]]));
        }
    }
    Ok(image)
}

/// Compose three bands and save the result as an image file
pub fn compose_to_file(
    array: &LabeledArray,
    dim: &str,
    config: &RenderConfig,
    path: &str,
) -> BandResult<()> {
    let image = compose(array, dim, config)?;
    image
        .save(path)
        .map_err(|e| BandError::GenericError(format!("Failed to save image: {}", e)))?;
    info!("Saved composite to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Dimension;

    fn three_band_array() -> LabeledArray {
        let dims = vec![
            Dimension::new(
                "band",
                vec!["B1".to_string(), "B2".to_string(), "B3".to_string()],
            ),
            Dimension::indexed("y", 2),
            Dimension::indexed("x", 2),
        ];
        let values = vec![
            0.0, 1.0, 2.0, 3.0, // B1
            3.0, 2.0, 1.0, 0.0, // B2
            0.0, 0.0, 3.0, 3.0, // B3
        ];
        LabeledArray::from_values(values, dims).unwrap()
    }

    #[test]
    fn test_minmax_stretch_hits_bounds() {
        let config = RenderConfig {
            red: "B1".to_string(),
            green: "B2".to_string(),
            blue: "B3".to_string(),
            breaks: None,
        };
        let image = compose(&three_band_array(), "band", &config).unwrap();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 255, 0]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 0, 255]));
    }

    #[test]
    fn test_explicit_breaks_clamp() {
        let config = RenderConfig {
            red: "B1".to_string(),
            green: "B1".to_string(),
            blue: "B1".to_string(),
            breaks: Some((1.0, 2.0)),
        };
        let image = compose(&three_band_array(), "band", &config).unwrap();
        // Values below the low break clamp to 0, above the high break to 255
        assert_eq!(image.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(1, 1), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_missing_band_is_an_error() {
        let config = RenderConfig {
            red: "B9".to_string(),
            green: "B2".to_string(),
            blue: "B3".to_string(),
            breaks: None,
        };
        assert!(compose(&three_band_array(), "band", &config).is_err());
    }
}
