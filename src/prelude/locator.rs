//! Prelude Locator
//!
//! [`PreludeTagBlock`] scans a container once and answers where new children
//! must be inserted so that the leading ordered block keeps its order.
//!
//! ```text
//! order:    title, desc, columns
//! children: title title columns row row ...
//!           |- prelude (len 3) -|
//! insert_position_before("desc") == 2
//! ```

use std::sync::Arc;

use super::error::PreludeError;
use super::order::OrderSpec;
use super::scanner::{scan_prelude, TagBlock, TagRun};
use super::source::ChildTagSource;

/// Leading ordered block of a container, plus the spec it was scanned with
#[derive(Debug, Clone)]
pub struct PreludeTagBlock {
    spec: Arc<OrderSpec>,
    block: TagBlock,
}

impl PreludeTagBlock {
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

    /// Scan `container` against an already validated spec
    pub fn with_spec<S: ChildTagSource + ?Sized>(container: &S, spec: Arc<OrderSpec>) -> Self {
        let block = scan_prelude(container, &spec);
        PreludeTagBlock { spec, block }
    }

    /// Number of children in the prelude
    pub fn len(&self) -> usize {
        self.block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    pub fn spec(&self) -> &OrderSpec {
        &self.spec
    }

    /// The scanned block
    pub fn block(&self) -> &TagBlock {
        &self.block
    }

    /// The run of `tag`, or `None` if the tag does not occur in the prelude
    ///
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

    /// Insertion index placing a new `tag` child before existing ones
    ///
    /// # Errors
    ///
    /// `InvalidTag` if `tag` is not part of the spec.
    pub fn insert_position_before(&self, tag: &str) -> Result<usize, PreludeError> {
        let tag = self.spec.tag(tag)?;
        Ok(self.block.position_before(tag))
    }

    /// Insertion index placing a new child after existing ones
    ///
    /// Without a tag this is the end of the prelude.
    ///
    /// # Errors
    ///
    /// `InvalidTag` if `tag` is not part of the spec.
    pub fn insert_position_after(&self, tag: Option<&str>) -> Result<usize, PreludeError> {
        match tag {
            None => Ok(self.block.len()),
            Some(tag) => {
                let tag = self.spec.tag(tag)?;
                Ok(self.block.position_after(tag))
            }
        }
    }
}
