//! Pipeline driver
//!
//! Wires a reader, an ordered list of filters and a writer together.

mod filter_pipeline;
mod timing;
mod types;


pub use filter_pipeline::{FilterPipeline, apply_filter};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{PipelineConfig, PipelineConfigBuilder};
