//! BMP file header and BITMAPINFOHEADER layout
//!
//! All multi-byte fields are little-endian on disk. The reader accepts only
//! uncompressed 24-bit images with the 40-byte info header; the writer always
//! emits that variant with rows stored bottom-up.

use std::io::{self, Read, Seek, SeekFrom};

use tracing::debug;

use crate::image_pipeline::common::error::FileError;
use crate::image_pipeline::model::Image;

pub const MAGIC: [u8; 2] = *b"BM";
pub const BITS_PER_PIXEL: u16 = 24;
pub const BYTES_PER_PIXEL: usize = 3;
pub const COLOR_PLANES: u16 = 1;
/// Size of the file header preceding the info header.
pub const BMP_HEADER_SIZE: u32 = 14;
/// The only supported info header variant (BITMAPINFOHEADER).
pub const DIB_HEADER_SIZE: u32 = 40;
/// Pixel data offset written by the encoder.
pub const OFFSET: u32 = BMP_HEADER_SIZE + DIB_HEADER_SIZE;

/// Bytes per encoded row, including alignment to 4 bytes.
pub fn row_stride(width: usize) -> usize {
    (BYTES_PER_PIXEL * width).div_ceil(4) * 4
}

/// Alignment bytes after each encoded row.
pub fn row_padding(width: usize) -> usize {
    (4 - (BYTES_PER_PIXEL * width) % 4) % 4
}

/// Header fields the decoder needs.
///
/// `height` is the stored value negated: positive means the rows are stored
/// top-down, negative means bottom-up (the usual layout). A negative `width`
/// means the columns are stored right to left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub offset: u32,
    pub width: i32,
    pub height: i32,
    pub image_size: u32,
    pub horizontal_resolution: i32,
    pub vertical_resolution: i32,
}

fn read_array<const N: usize, R: Read>(reader: &mut R) -> Result<[u8; N], FileError> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(FileError::read)?;
    Ok(buf)
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16, FileError> {
    read_array(reader).map(u16::from_le_bytes)
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, FileError> {
    read_array(reader).map(u32::from_le_bytes)
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, FileError> {
    read_array(reader).map(i32::from_le_bytes)
}

impl BmpHeader {
    /// Parses and validates both headers.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self, FileError> {
        reader.seek(SeekFrom::Start(0)).map_err(FileError::read)?;
        let magic: [u8; 2] = read_array(reader)?;
        if magic != MAGIC {
            return Err(FileError::wrong_format(format!(
                "bad magic {:02X} {:02X}",
                magic[0], magic[1]
            )));
        }
        let file_size = read_u32(reader)?;
        reader.seek(SeekFrom::Current(4)).map_err(FileError::read)?;
        let offset = read_u32(reader)?;

        reader
            .seek(SeekFrom::Start(BMP_HEADER_SIZE as u64))
            .map_err(FileError::read)?;
        let header_size = read_u32(reader)?;
        if header_size != DIB_HEADER_SIZE {
            return Err(FileError::wrong_format(format!(
                "unsupported info header size {}",
                header_size
            )));
        }

        let width = read_i32(reader)?;
        let height = read_i32(reader)?
            .checked_neg()
            .ok_or_else(|| FileError::damaged("height out of range"))?;
        if (width == 0) != (height == 0) {
            return Err(FileError::damaged(format!(
                "width {} and height {} must both be zero or both nonzero",
                width, height
            )));
        }

        let color_planes = read_u16(reader)?;
        if color_planes != COLOR_PLANES {
            return Err(FileError::wrong_format(format!(
                "{} color planes",
                color_planes
            )));
        }
        let bits_per_pixel = read_u16(reader)?;
        if bits_per_pixel != BITS_PER_PIXEL {
            return Err(FileError::wrong_format(format!(
                "{} bits per pixel",
                bits_per_pixel
            )));
        }
        let compression = read_u32(reader)?;
        if compression != 0 {
            return Err(FileError::wrong_format(format!(
                "compression method {}",
                compression
            )));
        }

        let image_size = read_u32(reader)?;
        if image_size != 0 {
            let expected = row_stride(width.unsigned_abs() as usize) as u64
                * height.unsigned_abs() as u64;
            if image_size as u64 != expected {
                return Err(FileError::damaged(format!(
                    "image size {} does not match {} computed from dimensions",
                    image_size, expected
                )));
            }
            if image_size as u64 + offset as u64 != file_size as u64 {
                return Err(FileError::damaged(format!(
                    "offset {} plus image size {} does not match file size {}",
                    offset, image_size, file_size
                )));
            }
        }

        let horizontal_resolution = read_i32(reader)?;
        let vertical_resolution = read_i32(reader)?;

        let header = Self {
            file_size,
            offset,
            width,
            height,
            image_size,
            horizontal_resolution,
            vertical_resolution,
        };
        debug!(?header, "Parsed BMP header");
        Ok(header)
    }

    /// Header the encoder writes for `image`.
    pub fn for_image(image: &Image) -> Result<Self, FileError> {
        let too_large = || {
            FileError::write(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "image {}x{} does not fit a BMP header",
                    image.width(),
                    image.height()
                ),
            ))
        };

        let width = i32::try_from(image.width()).map_err(|_| too_large())?;
        let height = i32::try_from(image.height()).map_err(|_| too_large())?;
        let file_size = (row_stride(image.width()) as u64)
            .checked_mul(image.height() as u64)
            .and_then(|size| size.checked_add(OFFSET as u64))
            .and_then(|size| u32::try_from(size).ok())
            .ok_or_else(too_large)?;
        let (horizontal_resolution, vertical_resolution) = image.resolution();

        Ok(Self {
            file_size,
            offset: OFFSET,
            width,
            height,
            image_size: 0,
            horizontal_resolution,
            vertical_resolution,
        })
    }

    /// Serializes both headers; `height` is written as is.
    pub fn to_bytes(&self) -> [u8; OFFSET as usize] {
        let mut bytes = [0u8; OFFSET as usize];
        let mut fields: Vec<u8> = Vec::with_capacity(OFFSET as usize);
        fields.extend_from_slice(&MAGIC);
        fields.extend_from_slice(&self.file_size.to_le_bytes());
        fields.extend_from_slice(&0u32.to_le_bytes()); // reserved
        fields.extend_from_slice(&self.offset.to_le_bytes());
        fields.extend_from_slice(&DIB_HEADER_SIZE.to_le_bytes());
        fields.extend_from_slice(&self.width.to_le_bytes());
        fields.extend_from_slice(&self.height.to_le_bytes());
        fields.extend_from_slice(&COLOR_PLANES.to_le_bytes());
        fields.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        fields.extend_from_slice(&0u32.to_le_bytes()); // compression
        fields.extend_from_slice(&self.image_size.to_le_bytes());
        fields.extend_from_slice(&self.horizontal_resolution.to_le_bytes());
        fields.extend_from_slice(&self.vertical_resolution.to_le_bytes());
        // palette size and important colors stay zero
        bytes[..fields.len()].copy_from_slice(&fields);
        bytes
    }
}
