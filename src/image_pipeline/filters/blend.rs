//! Blend modes taking a second image fixed at construction.
//!
//! Pixels of the target outside the second image are left unchanged.

use std::rc::Rc;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::filters::pointwise::for_each_pixel;
use crate::image_pipeline::model::Image;

/// Brightens `bg` by `fg`; blending with black leaves `bg` unchanged.
pub fn dodge(bg: f64, fg: f64) -> f64 {
    if fg >= 1.0 {
        return 1.0;
    }
    let value = bg / (1.0 - fg);
    if value > 1.0 { 1.0 } else { value }
}

/// Darkens `bg` by `fg`; blending with white leaves `bg` unchanged.
pub fn burn(bg: f64, fg: f64) -> f64 {
    if fg <= 0.0 {
        return 0.0;
    }
    let value = (1.0 - bg) / fg;
    if value > 1.0 { 0.0 } else { 1.0 - value }
}

fn blend(image: &mut Image, second: &Image, mode: fn(f64, f64) -> f64) -> Result<()> {
    for_each_pixel(image, |row, col, pixel| {
        if let Ok(added) = second.at(row, col) {
            *pixel = pixel.zip_with(*added, mode);
        }
    })
}

pub struct ColorDodgeFilter {
    second: Rc<Image>,
}

impl ColorDodgeFilter {
    pub fn new(second: Rc<Image>) -> Self {
        Self { second }
    }
}

impl Filter for ColorDodgeFilter {
    fn name(&self) -> &str {
        "ColorDodgeFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        blend(image, &self.second, dodge)
    }
}

pub struct ColorBurnFilter {
    second: Rc<Image>,
}

impl ColorBurnFilter {
    pub fn new(second: Rc<Image>) -> Self {
        Self { second }
    }
}

impl Filter for ColorBurnFilter {
    fn name(&self) -> &str {
        "ColorBurnFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        blend(image, &self.second, burn)
    }
}
