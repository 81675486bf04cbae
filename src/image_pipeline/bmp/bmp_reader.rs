//! 24-bit BMP decoder.
//!
//! Handles both row orders (bottom-up and top-down) and, for symmetry,
//! columns stored right to left when the stored width is negative.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use tracing::debug;

use crate::image_pipeline::bmp::header::{BmpHeader, BYTES_PER_PIXEL, row_padding, row_stride};
use crate::image_pipeline::bmp::reader::ImageReader;
use crate::image_pipeline::common::error::FileError;
use crate::image_pipeline::model::{Image, Pixel};

/// Reader for uncompressed 24-bit BMP files with a 40-byte info header.
#[derive(Debug, Default, Clone, Copy)]
pub struct BmpReader;

impl ImageReader for BmpReader {
    /// Decodes a BMP file held in memory.
    ///
    /// # Errors
    ///
    /// * `WrongFileFormat` - bad magic, info header size, plane count, bit
    ///   depth or compression
    /// * `DamagedFile` - width/height zero mismatch or an image size field
    ///   inconsistent with the dimensions and the file size
    /// * `ReadFileError` - the data ends before the headers or the pixels do
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bmp_filter_rs::image_pipeline::{BmpReader, ImageReader};
    ///
    /// let bytes = std::fs::read("image.bmp").unwrap();
    /// let image = BmpReader.read_image(&bytes).unwrap();
    /// println!("{}x{}", image.width(), image.height());
    /// ```
    fn read_image(&self, data: &[u8]) -> Result<Image, FileError> {
        debug!("Decoding BMP image, {} bytes", data.len());

        let mut cursor = Cursor::new(data);
        let header = BmpHeader::read(&mut cursor)?;

        let width = header.width.unsigned_abs() as usize;
        let height = header.height.unsigned_abs() as usize;

        // Refuse to allocate a grid the data cannot fill.
        if height > 0 {
            let needed = header.offset as u64
                + row_stride(width) as u64 * (height as u64 - 1)
                + (BYTES_PER_PIXEL * width) as u64;
            if needed > data.len() as u64 {
                return Err(FileError::read(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("pixel data needs {} bytes, got {}", needed, data.len()),
                )));
            }
        }

        cursor
            .seek(SeekFrom::Start(header.offset as u64))
            .map_err(FileError::read)?;

        let mut rows: Vec<Vec<Pixel>> = vec![Vec::new(); height];
        let mut line = vec![0u8; BYTES_PER_PIXEL * width];
        let padding = row_padding(width) as i64;

        for i in 0..height {
            cursor.read_exact(&mut line).map_err(FileError::read)?;
            let mut pixels: Vec<Pixel> = line
                .chunks_exact(BYTES_PER_PIXEL)
                .map(|bgr| Pixel::from_bgr([bgr[0], bgr[1], bgr[2]]))
                .collect();
            if header.width < 0 {
                pixels.reverse();
            }

            let row = if header.height > 0 { i } else { height - 1 - i };
            rows[row] = pixels;

            cursor
                .seek(SeekFrom::Current(padding))
                .map_err(FileError::read)?;
        }

        let image = Image::from_rows(rows)
            .map_err(|e| FileError::damaged(e.to_string()))?
            .with_resolution(header.horizontal_resolution, header.vertical_resolution);

        debug!("Decoded image: {}x{}", image.width(), image.height());
        Ok(image)
    }
}
