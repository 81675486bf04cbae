//! Pipeline configuration types

/// Configuration for a filter pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Largest accepted width or height of a decoded image (None for no limit)
    pub max_dimension: Option<usize>,
    /// Whether to check decoded dimensions against `max_dimension`
    pub validate_dimensions: bool,
    /// Whether to log a per-stage timing summary after each run
    pub record_timings: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dimension: None,
            validate_dimensions: true,
            record_timings: false,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    max_dimension: Option<Option<usize>>,
    validate_dimensions: Option<bool>,
    record_timings: Option<bool>,
}

impl PipelineConfigBuilder {
    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn record_timings(mut self, enable: bool) -> Self {
        self.record_timings = Some(enable);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            record_timings: self.record_timings.unwrap_or(default.record_timings),
        }
    }
}
