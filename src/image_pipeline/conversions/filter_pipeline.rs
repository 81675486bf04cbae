use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    bmp::{BmpReader, BmpWriter, ImageReader, ImageWriter},
    common::error::{FileError, FilterError, ImageError, PipelineError},
    conversions::{PipelineConfig, PipelineTimings},
    filters::Filter,
    model::Image,
};

/// Applies one filter, naming it in whatever error comes back.
///
/// Filter errors get the filter name attached; any other failure inside the
/// filter is reported as [`FilterError::BrokenFilter`].
pub fn apply_filter(filter: &dyn Filter, image: &mut Image) -> Result<(), FilterError> {
    let _span = tracing::debug_span!("apply_filter", filter = filter.name()).entered();
    filter.apply(image).map_err(|e| match e {
        ImageError::Filter(e) => e.with_filter(filter.name()),
        other => FilterError::BrokenFilter {
            filter: filter.name().to_string(),
            source: Box::new(other),
        },
    })
}

/// Decode, an ordered list of filters, encode.
pub struct FilterPipeline<R: ImageReader = BmpReader, W: ImageWriter = BmpWriter> {
    reader: R,
    writer: W,
    config: PipelineConfig,
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline<BmpReader, BmpWriter> {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_custom(BmpReader, BmpWriter, config)
    }
}

impl<R: ImageReader, W: ImageWriter> FilterPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: PipelineConfig) -> Self {
        Self {
            reader,
            writer,
            config,
            filters: Vec::new(),
        }
    }

    pub fn push(&mut self, filter: impl Filter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.push(filter);
        self
    }

    pub fn extend(&mut self, filters: impl IntoIterator<Item = Box<dyn Filter>>) {
        self.filters.extend(filters);
    }

    /// Names of the queued filters in application order.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|filter| filter.name())
    }

    fn validate_dimensions(&self, image: &Image) -> Result<(), PipelineError> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if image.width() > max || image.height() > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    image.width(),
                    image.height(),
                    max
                );
                return Err(PipelineError::InvalidDimensions {
                    width: image.width(),
                    height: image.height(),
                });
            }
        }

        Ok(())
    }

    /// Applies every filter in order, stopping at the first failure.
    pub fn run(&self, image: &mut Image) -> Result<(), FilterError> {
        let mut timings = PipelineTimings::new();
        self.run_timed(image, &mut timings)?;
        if self.config.record_timings {
            timings.log_summary();
        }
        Ok(())
    }

    fn run_timed(&self, image: &mut Image, timings: &mut PipelineTimings) -> Result<(), FilterError> {
        for filter in &self.filters {
            timings.time(filter.name(), || apply_filter(filter.as_ref(), image))?;
        }
        Ok(())
    }

    /// Reads and checks the input image.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Image, PipelineError> {
        let image = self.reader.read_file(path.as_ref())?;
        self.validate_dimensions(&image)?;
        Ok(image)
    }

    #[instrument(skip(self, path, image), fields(path = %path.as_ref().display()))]
    pub fn save<P: AsRef<Path>>(&self, path: P, image: &Image) -> Result<(), FileError> {
        self.writer.write_file(path.as_ref(), image)
    }

    pub fn process(&self, input_data: &[u8], output: &mut dyn Write) -> Result<(), PipelineError> {
        self.process_with_timings(input_data, output).map(|_| ())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn process_with_timings(
        &self,
        input_data: &[u8],
        output: &mut dyn Write,
    ) -> Result<PipelineTimings, PipelineError> {
        let mut timings = PipelineTimings::new();
        info!("Starting filter pipeline with {} filter(s)", self.filters.len());

        let mut image = {
            let _span = tracing::info_span!("decode").entered();
            timings.time("decode", || self.reader.read_image(input_data))?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = image.width(),
                height = image.height()
            ).entered();
            self.validate_dimensions(&image)?;
        }

        {
            let _span = tracing::info_span!("filters").entered();
            self.run_timed(&mut image, &mut timings)?;
        }

        {
            let _span = tracing::info_span!("encode").entered();
            timings.time("encode", || self.writer.write_image(&image, output))?;
        }

        info!(
            width = image.width(),
            height = image.height(),
            "Pipeline complete in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        if self.config.record_timings {
            timings.log_summary();
        }
        Ok(timings)
    }

    /// Loads `input_path`, applies the filters and writes `output_path`.
    ///
    /// The output file is only created once every filter has succeeded.
    #[instrument(skip(self, input_path, output_path))]
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<(), PipelineError> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Processing file"
        );

        let mut image = self.load(input_path)?;
        self.run(&mut image)?;
        self.save(output_path, &image)?;

        Ok(())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
