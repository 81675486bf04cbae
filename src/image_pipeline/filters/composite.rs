//! Pencil-drawing effects built from the simpler filters.
//!
//! Both grayscale the target, blur a negated copy of it and blend the copy
//! back: dodge gives a pencil sketch, burn a chalk drawing.

use std::rc::Rc;

use tracing::debug;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::filters::blend::{ColorBurnFilter, ColorDodgeFilter};
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::filters::gaussian::GaussianFilter;
use crate::image_pipeline::filters::pointwise::{GrayscaleFilter, NegativeFilter};
use crate::image_pipeline::model::Image;

/// Grayscales `image` and returns its blurred negative.
fn blurred_negative(image: &mut Image, blur: &GaussianFilter) -> Result<Rc<Image>> {
    blur.validate()?;
    GrayscaleFilter.apply(image)?;
    let mut second = image.clone();
    NegativeFilter.apply(&mut second)?;
    blur.apply(&mut second)?;
    debug!(sigma = blur.sigma(), "Prepared blend layer");
    Ok(Rc::new(second))
}

#[derive(Debug, Clone, Copy)]
pub struct SketchFilter {
    blur: GaussianFilter,
}

impl SketchFilter {
    pub fn new(sigma: f64) -> Self {
        Self { blur: GaussianFilter::new(sigma) }
    }
}

impl Filter for SketchFilter {
    fn name(&self) -> &str {
        "SketchFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        let second = blurred_negative(image, &self.blur)?;
        ColorDodgeFilter::new(second).apply(image)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChalkFilter {
    blur: GaussianFilter,
}

impl ChalkFilter {
    pub fn new(sigma: f64) -> Self {
        Self { blur: GaussianFilter::new(sigma) }
    }
}

impl Filter for ChalkFilter {
    fn name(&self) -> &str {
        "ChalkFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        let second = blurred_negative(image, &self.blur)?;
        ColorBurnFilter::new(second).apply(image)
    }
}
