//! Pixel and image types shared by the codec and the filters.

pub mod pixel;
pub mod image;


pub use pixel::Pixel;
pub use image::Image;
