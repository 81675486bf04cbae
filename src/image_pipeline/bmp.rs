//! BMP reading and writing module
//!
//! This module provides the 24-bit BMP codec behind format-agnostic reader
//! and writer traits.

pub mod header;
mod reader;
mod writer;
mod bmp_reader;
mod bmp_writer;


pub use header::{BmpHeader, row_padding, row_stride};
pub use reader::ImageReader;
pub use writer::ImageWriter;
pub use bmp_reader::BmpReader;
pub use bmp_writer::BmpWriter;
