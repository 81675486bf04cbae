use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::model::Image;

/// An in-place image operation.
pub trait Filter {
    /// Name used in error messages and logs.
    fn name(&self) -> &str;

    fn apply(&self, image: &mut Image) -> Result<()>;
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        (**self).apply(image)
    }
}
