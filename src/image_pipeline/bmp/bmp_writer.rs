use std::io::Write;

use tracing::debug;

use crate::image_pipeline::bmp::header::{BmpHeader, row_padding, row_stride};
use crate::image_pipeline::bmp::writer::ImageWriter;
use crate::image_pipeline::common::error::FileError;
use crate::image_pipeline::model::Image;

/// Writes 24-bit bottom-up BMP files.
#[derive(Debug, Default, Clone, Copy)]
pub struct BmpWriter;

impl ImageWriter for BmpWriter {
    fn write_image(&self, image: &Image, output: &mut dyn Write) -> Result<(), FileError> {
        debug!("Encoding BMP image: {}x{}", image.width(), image.height());

        let header = BmpHeader::for_image(image)?;
        let mut buffer = Vec::with_capacity(header.file_size as usize);
        buffer.extend_from_slice(&header.to_bytes());

        let padding = [0u8; 4];
        let padding = &padding[..row_padding(image.width())];
        for row in image.rows().rev() {
            for pixel in row {
                buffer.extend_from_slice(&pixel.to_bgr());
            }
            buffer.extend_from_slice(padding);
        }
        debug_assert_eq!(
            buffer.len(),
            header.offset as usize + row_stride(image.width()) * image.height()
        );

        output.write_all(&buffer).map_err(FileError::write)?;

        debug!("BMP encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
