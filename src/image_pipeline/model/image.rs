//! Rectangular pixel grid

use crate::image_pipeline::common::error::{ImageError, Result};
use crate::image_pipeline::model::pixel::Pixel;

/// Default resolution stored in the BMP header when none is known.
pub const DEFAULT_RESOLUTION: i32 = 1;

/// In-memory image: `height` rows of `width` pixels, row 0 on top.
///
/// A grid with no pixels is always 0x0. The two resolution fields are carried
/// through from the file and never interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: Vec<Pixel>,
    height: usize,
    width: usize,
    horizontal_resolution: i32,
    vertical_resolution: i32,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            pixels: Vec::new(),
            height: 0,
            width: 0,
            horizontal_resolution: DEFAULT_RESOLUTION,
            vertical_resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl Image {
    /// Black image of the given size.
    pub fn new(height: usize, width: usize) -> Self {
        Self::filled(height, width, Pixel::BLACK)
    }

    pub fn filled(height: usize, width: usize, pixel: Pixel) -> Self {
        let (height, width) = if height == 0 || width == 0 {
            (0, 0)
        } else {
            (height, width)
        };
        Self {
            pixels: vec![pixel; height * width],
            height,
            width,
            ..Self::default()
        }
    }

    /// Builds an image from row-major rows.
    ///
    /// Fails with [`ImageError::InvalidConstructor`] when the rows differ in
    /// length or when the rows are empty.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::default());
        };
        let width = first.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(ImageError::InvalidConstructor);
        }
        let height = rows.len();
        Ok(Self {
            pixels: rows.into_iter().flatten().collect(),
            height,
            width,
            ..Self::default()
        })
    }

    pub fn with_resolution(mut self, horizontal: i32, vertical: i32) -> Self {
        self.horizontal_resolution = horizontal;
        self.vertical_resolution = vertical;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// `(horizontal, vertical)` resolution.
    pub fn resolution(&self) -> (i32, i32) {
        (self.horizontal_resolution, self.vertical_resolution)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(ImageError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn at(&self, row: usize, col: usize) -> Result<&Pixel> {
        let index = self.index(row, col)?;
        Ok(&self.pixels[index])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut Pixel> {
        let index = self.index(row, col)?;
        Ok(&mut self.pixels[index])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + '_ {
        self.pixels.chunks(self.width.max(1))
    }

    /// Truncates or pads with black to `new_height` x `new_width`.
    ///
    /// A zero in either dimension leaves an empty 0x0 image.
    pub fn resize(&mut self, new_height: usize, new_width: usize) {
        if new_height == 0 || new_width == 0 {
            self.pixels.clear();
            self.height = 0;
            self.width = 0;
            return;
        }
        if new_height == self.height && new_width == self.width {
            return;
        }

        let mut pixels = Vec::with_capacity(new_height * new_width);
        for row in 0..new_height {
            if row < self.height {
                let start = row * self.width;
                let kept = new_width.min(self.width);
                pixels.extend_from_slice(&self.pixels[start..start + kept]);
                pixels.resize(pixels.len() + (new_width - kept), Pixel::BLACK);
            } else {
                pixels.resize(pixels.len() + new_width, Pixel::BLACK);
            }
        }

        self.pixels = pixels;
        self.height = new_height;
        self.width = new_width;
    }
}
