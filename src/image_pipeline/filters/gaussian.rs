//! Separable Gaussian blur.
//!
//! Two in-place passes: along every row, then along every column of the
//! result. Samples outside the image are dropped from both the weighted sum
//! and its normalization, so each output is an average over in-bounds pixels.

use tracing::trace;

use crate::image_pipeline::common::error::{FilterError, Result};
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::model::{Image, Pixel};

#[derive(Debug, Clone, Copy)]
pub struct GaussianFilter {
    sigma: f64,
}

impl GaussianFilter {
    /// The sign of `sigma` is ignored.
    pub fn new(sigma: f64) -> Self {
        Self { sigma: sigma.abs() }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub(crate) fn validate(&self) -> Result<(), FilterError> {
        if self.sigma == 0.0 || self.sigma.is_nan() {
            return Err(FilterError::prohibited(self.sigma, "<sigma>"));
        }
        Ok(())
    }

    /// Kernel radius for a sweep over `len` pixels.
    ///
    /// The whole sweep is covered unless `3 * sigma` is comfortably shorter.
    pub fn radius(&self, len: usize) -> usize {
        if 4.0 * self.sigma < (len + 1) as f64 {
            (3.0 * self.sigma).ceil() as usize
        } else {
            len
        }
    }

    /// Unnormalized weights for offsets `-radius..=radius`.
    pub fn kernel(&self, radius: usize) -> Vec<f64> {
        let base = (-1.0 / (2.0 * self.sigma * self.sigma)).exp();
        let radius = radius as i64;
        (-radius..=radius)
            .map(|k| base.powf((k * k) as f64))
            .collect()
    }
}

/// Blurs one line of `len` pixels in place.
///
/// `prevs[j]` keeps the original value of every position already
/// overwritten, positions ahead of the cursor are still original in the image.
fn sweep(
    image: &mut Image,
    len: usize,
    kernel: &[f64],
    radius: usize,
    prevs: &mut [Pixel],
    position: impl Fn(usize) -> (usize, usize),
) -> Result<()> {
    for y in 0..len {
        let (row, col) = position(y);
        prevs[y] = *image.at(row, col)?;

        let mut pixel = Pixel::default();
        let mut sum = 0.0;
        for j in y.saturating_sub(radius)..=(y + radius).min(len - 1) {
            let weight = kernel[j + radius - y];
            let source = if j <= y {
                prevs[j]
            } else {
                let (r, c) = position(j);
                *image.at(r, c)?
            };
            pixel += source * weight;
            sum += weight;
        }

        *image.at_mut(row, col)? = pixel / sum;
    }
    Ok(())
}

impl Filter for GaussianFilter {
    fn name(&self) -> &str {
        "GaussianFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.validate()?;
        if image.is_empty() {
            return Ok(());
        }
        let height = image.height();
        let width = image.width();

        let radius = self.radius(width);
        let kernel = self.kernel(radius);
        trace!(sigma = self.sigma, radius, "Row pass");
        let mut prevs = vec![Pixel::default(); width];
        for line in 0..height {
            sweep(image, width, &kernel, radius, &mut prevs, |y| (line, y))?;
        }

        let radius = self.radius(height);
        let kernel = self.kernel(radius);
        trace!(sigma = self.sigma, radius, "Column pass");
        let mut prevs = vec![Pixel::default(); height];
        for column in 0..width {
            sweep(image, height, &kernel, radius, &mut prevs, |x| (x, column))?;
        }
        Ok(())
    }
}
