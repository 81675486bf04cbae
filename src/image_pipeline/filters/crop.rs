use tracing::debug;

use crate::image_pipeline::common::error::{FilterError, Result};
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::model::Image;

/// Keeps the top-left `width` x `height` part of the image.
///
/// Never enlarges: a requested size beyond the image keeps that dimension.
#[derive(Debug, Clone, Copy)]
pub struct CropFilter {
    width: usize,
    height: usize,
}

impl CropFilter {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl Filter for CropFilter {
    fn name(&self) -> &str {
        "CropFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        if self.width == 0 {
            return Err(FilterError::prohibited(0, "<width>").into());
        }
        if self.height == 0 {
            return Err(FilterError::prohibited(0, "<height>").into());
        }
        let height = self.height.min(image.height());
        let width = self.width.min(image.width());
        debug!(
            "Cropping {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );
        image.resize(height, width);
        Ok(())
    }
}
