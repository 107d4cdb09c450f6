use log::info;

use crate::config::ChunkingConfig;
use crate::errors::BandResult;
use crate::pca;
use crate::render::{self, RenderConfig};
use crate::split::{DimensionSplitter, SplitPipeline};
use crate::stats;
use crate::storage::{self, BandFileSink};
use crate::table;
use crate::utils::logger::Logger;
use crate::utils::parse_utils;

/// Main interface to the BandKit library
pub struct BandKit {
    logger: Logger,
}

impl BandKit {
    /// Create a new BandKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "bandkit.log"
    ///
    /// # Returns
    /// A BandKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> BandResult<Self> {
        let log_path = log_file.unwrap_or("bandkit.log");
        let logger = Logger::new(log_path)?;
        Ok(BandKit { logger })
    }

    /// Analyze a raster and return a summary of its structure and statistics
    ///
    /// # Arguments
    /// * `input_path` - Path to the raster file (TIFF or band-sequential)
    ///
    /// # Returns
    /// String containing dimension info, per-band summaries and the band
    /// correlation matrix, or an error
    pub fn analyze(&self, input_path: &str) -> BandResult<String> {
        let array = storage::load_array(input_path)?;

        let mut result = String::from("Raster Analysis Results:\n");
        for dim in array.dims() {
            result.push_str(&format!("  {}: {} positions\n", dim.name, dim.len()));
        }
        result.push_str(&format!("  Total cells: {}\n", array.total_cells()));

        let summaries = stats::summarize(&array, "band")?;
        result.push_str("\nPer-band summary:\n");
        for summary in &summaries {
            result.push_str(&format!(
                "  {}: min={:.4} max={:.4} mean={:.4} std={:.4}\n",
                summary.band, summary.min, summary.max, summary.mean, summary.std_dev
            ));
        }

        let matrix = stats::correlation_matrix(&array, "band")?;
        result.push_str("\nCorrelation matrix:\n");
        for (i, summary) in summaries.iter().enumerate() {
            let row: Vec<String> = (0..summaries.len())
                .map(|j| format!("{:+.3}", matrix[[i, j]]))
                .collect();
            result.push_str(&format!("  {}: {}\n", summary.band, row.join(" ")));
        }

        self.logger.log(&format!("Analyzed {}", input_path))?;
        Ok(result)
    }

    /// Split a raster's stacked dimension into per-band planes
    ///
    /// Runs the chunked pipeline from the input to a band-sequential
    /// output file, honoring the chunking policy. Band-sequential inputs
    /// are streamed strip by strip and never fully materialized.
    ///
    /// # Arguments
    /// * `input_path` - Path to the input raster
    /// * `output_path` - Path for the band-sequential output
    /// * `dimension` - Name of the dimension to remove, usually "band"
    /// * `chunking` - Memory budget and optional strip-height override
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn split(
        &self,
        input_path: &str,
        output_path: &str,
        dimension: &str,
        chunking: &ChunkingConfig,
    ) -> BandResult<()> {
        info!(
            "Splitting '{}' of {} into {}",
            dimension, input_path, output_path
        );

        let mut source = storage::open_source(input_path)?;
        let dims = source.dims().to_vec();
        SplitPipeline::validate_source(&dims, dimension)?;

        let mut sink = BandFileSink::create(
            output_path,
            dims[2].len() as u32,
            dims[1].len() as u32,
            dims[0].coords.clone(),
        )?;

        let mut pipeline = SplitPipeline::new().with_memory_budget(chunking.memory_budget);
        if let Some(rows) = chunking.chunk_rows {
            pipeline = pipeline.with_chunk_rows(rows);
        }
        pipeline.run(source.as_mut(), &mut sink, dimension)?;
        sink.finish()
    }

    /// Decompose a raster's bands into principal components
    ///
    /// # Arguments
    /// * `input_path` - Path to the input raster
    /// * `output_path` - Path for the band-sequential component output
    /// * `components` - Number of principal components to keep
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn decompose(
        &self,
        input_path: &str,
        output_path: &str,
        components: usize,
    ) -> BandResult<()> {
        let array = storage::load_array(input_path)?;
        let result = pca::decompose(&array, "band", components)?;

        let mut sink = BandFileSink::create(
            output_path,
            result.dims()[1].len() as u32,
            result.dims()[0].len() as u32,
            table::headers(&result),
        )?;
        sink.write_all(&result)?;
        sink.finish()
    }

    /// Render three bands of a raster into an RGB composite image
    ///
    /// # Arguments
    /// * `input_path` - Path to the input raster
    /// * `output_path` - Path for the image file (format from extension)
    /// * `channels` - Channel mapping as "r=<band>,g=<band>,b=<band>"
    /// * `breaks` - Optional scale breaks as "low,high"; min/max stretch
    ///   when absent
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn render(
        &self,
        input_path: &str,
        output_path: &str,
        channels: &str,
        breaks: Option<&str>,
    ) -> BandResult<()> {
        let (red, green, blue) = parse_utils::parse_channel_mapping(channels)?;
        let breaks = breaks.map(parse_utils::parse_breaks).transpose()?;
        let config = RenderConfig { red, green, blue, breaks };

        let array = storage::load_array(input_path)?;
        render::compose_to_file(&array, "band", &config, output_path)
    }

    /// Export a raster as a pixels-by-bands CSV table
    ///
    /// # Arguments
    /// * `input_path` - Path to the input raster
    /// * `output_path` - Path for the CSV file
    /// * `dimension` - Dimension pivoted into columns, usually "band"
    ///
    /// # Returns
    /// Result indicating success or an error
    pub fn export_table(
        &self,
        input_path: &str,
        output_path: &str,
        dimension: &str,
    ) -> BandResult<()> {
        let array = storage::load_array(input_path)?;
        let split = DimensionSplitter::split(&array, dimension)?;
        let data = table::stack(&split)?;
        table::write_csv(&data, &table::headers(&split), output_path)
    }
}
