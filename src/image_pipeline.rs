//! BMP filtering pipeline
//!
//! Decoding and encoding of uncompressed 24-bit BMP files, an in-memory
//! floating point image, a set of in-place filters and a driver that chains
//! them between a reader and a writer.

pub mod common;
pub mod model;
pub mod bmp;
pub mod filters;
pub mod conversions;

pub use common::{
    FileError,
    FilterError,
    ImageError,
    OptionError,
    PipelineError,
    Result,
};

pub use model::{
    Image,
    Pixel,
};

pub use bmp::{
    BmpReader,
    BmpWriter,
    ImageReader,
    ImageWriter,
};

pub use filters::{
    ChalkFilter,
    ColorBurnFilter,
    ColorDodgeFilter,
    ConvolutionFilter,
    CropFilter,
    EdgeDetectionFilter,
    Filter,
    GaussianFilter,
    GrayscaleFilter,
    NegativeFilter,
    QueueFilter,
    SharpeningFilter,
    SketchFilter,
    ThresholdFilter,
};

pub use conversions::{
    FilterPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
    PipelineTimings,
};
