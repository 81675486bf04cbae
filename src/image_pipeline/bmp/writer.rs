use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::image_pipeline::common::error::FileError;
use crate::image_pipeline::model::Image;

pub trait ImageWriter {
    fn write_image(&self, image: &Image, output: &mut dyn Write) -> Result<(), FileError>;

    /// Encodes `image` into `path`, truncating it first.
    ///
    /// A failed write may leave a partial file behind.
    fn write_file(&self, path: &Path, image: &Image) -> Result<(), FileError> {
        let file = File::create(path).map_err(|source| FileError::OpenFileError {
            path: Some(path.to_path_buf()),
            source,
        })?;
        let mut output = BufWriter::new(file);
        self.write_image(image, &mut output)
            .map_err(|e| e.with_path(path))?;
        output
            .flush()
            .map_err(|e| FileError::write(e).with_path(path))
    }
}
