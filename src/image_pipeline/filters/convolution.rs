//! 3x3 convolution with edge-clamped addressing.
//!
//! The image is rewritten in place in a single row-major sweep. Neighbors in
//! the row above come from a copy of that row taken before it was overwritten,
//! neighbors to the left in the current row from a copy of the current row,
//! everything else is still untouched in the image.

use std::mem;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::filters::pointwise::{GrayscaleFilter, ThresholdFilter};
use crate::image_pipeline::filters::queue::QueueFilter;
use crate::image_pipeline::model::{Image, Pixel};

pub type Matrix<T> = [[T; 3]; 3];

pub const SHARP_MATRIX: Matrix<i8> = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];
pub const EDGE_MATRIX: Matrix<i8> = [[0, -1, 0], [-1, 4, -1], [0, -1, 0]];

/// Convolves every channel with a 3x3 matrix and clamps to `[0, 1]`.
///
/// `matrix[i][j]` weighs the neighbor at `(row + i - 1, col + j - 1)`.
#[derive(Debug, Clone)]
pub struct ConvolutionFilter<T> {
    matrix: Matrix<T>,
}

impl<T: Copy + Into<f64>> ConvolutionFilter<T> {
    pub fn new(matrix: Matrix<T>) -> Self {
        Self { matrix }
    }

    fn convolve(&self, image: &mut Image) -> Result<()> {
        let height = image.height();
        let width = image.width();
        if height == 0 {
            return Ok(());
        }

        let mut prev_row: Vec<Pixel> = vec![Pixel::default(); width];
        let mut cur_row: Vec<Pixel> = vec![Pixel::default(); width];

        for x in 0..height {
            // prev_row now holds the original values of row x - 1
            mem::swap(&mut prev_row, &mut cur_row);
            for y in 0..width {
                cur_row[y] = *image.at(x, y)?;

                let mut pixel = Pixel::default();
                for (i, weights) in self.matrix.iter().enumerate() {
                    let nx = (x + i).clamp(1, height) - 1;
                    for (j, &weight) in weights.iter().enumerate() {
                        let ny = (y + j).clamp(1, width) - 1;
                        let source = if nx < x {
                            prev_row[ny]
                        } else if nx > x || ny > y {
                            *image.at(nx, ny)?
                        } else {
                            cur_row[ny]
                        };
                        pixel += source * weight;
                    }
                }

                *image.at_mut(x, y)? = pixel.clamped();
            }
        }
        Ok(())
    }
}

impl<T: Copy + Into<f64>> Filter for ConvolutionFilter<T> {
    fn name(&self) -> &str {
        "ConvolutionFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.convolve(image)
    }
}

#[derive(Debug, Clone)]
pub struct SharpeningFilter {
    convolution: ConvolutionFilter<i8>,
}

impl SharpeningFilter {
    pub fn new() -> Self {
        Self {
            convolution: ConvolutionFilter::new(SHARP_MATRIX),
        }
    }
}

impl Default for SharpeningFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for SharpeningFilter {
    fn name(&self) -> &str {
        "SharpeningFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.convolution.apply(image)
    }
}

/// Grayscale, Laplacian convolution, then threshold.
pub struct EdgeDetectionFilter {
    stages: QueueFilter,
}

impl EdgeDetectionFilter {
    pub fn new(threshold: f64) -> Self {
        Self {
            stages: QueueFilter::new()
                .with(GrayscaleFilter)
                .with(ConvolutionFilter::new(EDGE_MATRIX))
                .with(ThresholdFilter::new(threshold)),
        }
    }
}

impl Filter for EdgeDetectionFilter {
    fn name(&self) -> &str {
        "EdgeDetectionFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        self.stages.apply(image)
    }
}
