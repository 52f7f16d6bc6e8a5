//! Epilogue Locator
//!
//! Mirror of [`PreludeTagBlock`](super::PreludeTagBlock) for content models
//! that end with optional ordered elements. Indices are absolute positions in
//! the container's child sequence.

use std::sync::Arc;

use super::error::PreludeError;
use super::order::OrderSpec;
use super::scanner::{scan_epilogue, TagBlock, TagRun};
use super::source::ChildTagSource;

/// Trailing ordered block of a container
#[derive(Debug, Clone)]
pub struct EpilogueTagBlock {
    spec: Arc<OrderSpec>,
    block: TagBlock,
}

impl EpilogueTagBlock {
    /// Scan `container` against the tag names in `order`
    ///
    /// # Errors
    ///
    /// Checked in this order: `InvalidArgument` if `container` is `None`,
    /// `InvalidSpec` if `order` is empty or repeats a tag.
    pub fn new<S, I, T>(container: Option<&S>, order: I) -> Result<Self, PreludeError>
    where
        S: ChildTagSource + ?Sized,
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let container = container.ok_or(PreludeError::InvalidArgument)?;
        let spec = OrderSpec::new(order)?;
        Ok(Self::with_spec(container, Arc::new(spec)))
    }

    pub fn with_spec<S: ChildTagSource + ?Sized>(container: &S, spec: Arc<OrderSpec>) -> Self {
        let block = scan_epilogue(container, &spec);
        EpilogueTagBlock { spec, block }
    }

    /// Number of children in the epilogue
    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Index of the first epilogue child (the child count when empty)
    pub fn start(&self) -> usize {
        self.block.start()
    }

    pub fn spec(&self) -> &OrderSpec {
        &self.spec
    }

    pub fn block(&self) -> &TagBlock {
        &self.block
    }

    /// # Errors
    ///
    /// `InvalidTag` if `tag` is not part of the spec.
    pub fn run(&self, tag: &str) -> Result<Option<&TagRun>, PreludeError> {
        let tag = self.spec.tag(tag)?;
        Ok(self.block.run(tag))
    }

    /// `(start_index, count)` of the run of `tag`, or `(-1, 0)` if absent
    ///
    /// # Errors
    ///
    /// `InvalidTag` if `tag` is not part of the spec.
    pub fn tag_info(&self, tag: &str) -> Result<(isize, usize), PreludeError> {
        Ok(match self.run(tag)? {
            Some(run) => (run.start as isize, run.count),
            None => (-1, 0),
        })
    }

    /// Insertion index placing a new child before existing ones
    ///
    /// Without a tag this is the start of the epilogue.
    ///
    /// # Errors
    ///
    /// `InvalidTag` if `tag` is not part of the spec.
    pub fn insert_position_before(&self, tag: Option<&str>) -> Result<usize, PreludeError> {
        match tag {
            None => Ok(self.block.start()),
            Some(tag) => {
                let tag = self.spec.tag(tag)?;
                Ok(self.block.position_before(tag))
            }
        }
    }

    /// Insertion index placing a new `tag` child after existing ones
    ///
    /// # Errors
    ///
    /// `InvalidTag` if `tag` is not part of the spec.
    pub fn insert_position_after(&self, tag: &str) -> Result<usize, PreludeError> {
        let tag = self.spec.tag(tag)?;
        Ok(self.block.position_after(tag))
    }
}
