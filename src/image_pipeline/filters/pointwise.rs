//! Filters that compute every pixel from that pixel alone.

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::model::{Image, Pixel};

/// Visits every pixel in row-major order.
pub(crate) fn for_each_pixel(
    image: &mut Image,
    mut compute: impl FnMut(usize, usize, &mut Pixel),
) -> Result<()> {
    for row in 0..image.height() {
        for col in 0..image.width() {
            compute(row, col, image.at_mut(row, col)?);
        }
    }
    Ok(())
}

const RED_MULT: f64 = 0.299;
const GREEN_MULT: f64 = 0.587;
const BLUE_MULT: f64 = 0.114;

/// Luma of a pixel with BT.601 weights.
pub fn luma(pixel: &Pixel) -> f64 {
    RED_MULT * pixel.red + GREEN_MULT * pixel.green + BLUE_MULT * pixel.blue
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GrayscaleFilter;

impl Filter for GrayscaleFilter {
    fn name(&self) -> &str {
        "GrayscaleFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        for_each_pixel(image, |_, _, pixel| {
            let gray = luma(pixel);
            *pixel = Pixel::new(gray, gray, gray);
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NegativeFilter;

impl Filter for NegativeFilter {
    fn name(&self) -> &str {
        "NegativeFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        for_each_pixel(image, |_, _, pixel| *pixel = pixel.map(|c| 1.0 - c))
    }
}

/// White where every channel exceeds the threshold, black elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdFilter {
    threshold: f64,
}

impl ThresholdFilter {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Filter for ThresholdFilter {
    fn name(&self) -> &str {
        "ThresholdFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        let t = self.threshold;
        for_each_pixel(image, |_, _, pixel| {
            let steps_over = pixel.red > t && pixel.green > t && pixel.blue > t;
            *pixel = if steps_over { Pixel::WHITE } else { Pixel::BLACK };
        })
    }
}
