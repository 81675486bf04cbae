pub mod image_pipeline;
pub mod cli;
pub mod logger;
