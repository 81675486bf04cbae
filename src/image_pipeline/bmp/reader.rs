use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::image_pipeline::common::error::FileError;
use crate::image_pipeline::model::Image;

pub trait ImageReader {
    /// Decodes a whole encoded image held in memory.
    fn read_image(&self, data: &[u8]) -> Result<Image, FileError>;

    /// Reads and decodes `path`; every error carries the path.
    fn read_file(&self, path: &Path) -> Result<Image, FileError> {
        let mut file = File::open(path).map_err(|source| FileError::OpenFileError {
            path: Some(path.to_path_buf()),
            source,
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| FileError::read(e).with_path(path))?;
        debug!("Read {} bytes from {}", data.len(), path.display());

        self.read_image(&data).map_err(|e| e.with_path(path))
    }
}
