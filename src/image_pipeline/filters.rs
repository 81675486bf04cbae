//! Image filters
//!
//! Every filter rewrites an [`Image`](crate::image_pipeline::Image) in place
//! through the [`Filter`] trait. Filters compose with [`QueueFilter`].

mod filter;
mod pointwise;
mod crop;
mod convolution;
mod gaussian;
mod blend;
mod composite;
mod queue;

#[cfg(test)]
mod tests;

pub use filter::Filter;
pub use pointwise::{GrayscaleFilter, NegativeFilter, ThresholdFilter, luma};
pub use crop::CropFilter;
pub use convolution::{ConvolutionFilter, EdgeDetectionFilter, Matrix, SharpeningFilter, EDGE_MATRIX, SHARP_MATRIX};
pub use gaussian::GaussianFilter;
pub use blend::{ColorBurnFilter, ColorDodgeFilter, burn, dodge};
pub use composite::{ChalkFilter, SketchFilter};
pub use queue::QueueFilter;
