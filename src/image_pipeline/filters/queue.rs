use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::filters::filter::Filter;
use crate::image_pipeline::model::Image;

/// Filters applied one after another to the same image.
///
/// Stops at the first failure. An empty queue changes nothing.
#[derive(Default)]
pub struct QueueFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl QueueFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.push(filter);
        self
    }

    pub fn push(&mut self, filter: impl Filter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|filter| filter.name())
    }
}

impl FromIterator<Box<dyn Filter>> for QueueFilter {
    fn from_iter<I: IntoIterator<Item = Box<dyn Filter>>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl Filter for QueueFilter {
    fn name(&self) -> &str {
        "QueueFilter"
    }

    fn apply(&self, image: &mut Image) -> Result<()> {
        for filter in &self.filters {
            filter.apply(image)?;
        }
        Ok(())
    }
}
