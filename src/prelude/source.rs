//! Child tag sources
//!
//! The scanners never touch a tree directly. They observe a container through
//! [`ChildTagSource`], which enumerates the tag names of its child elements in
//! document order. The DOM implements it for element children
//! (`dom::ElementChildren`); plain string slices implement it for synthetic
//! sequences.

/// Read-only, restartable enumeration of a container's child tag names
pub trait ChildTagSource {
    /// Tag names of the child elements, in document order
    fn child_tags(&self) -> impl Iterator<Item = &str> + '_;
}

impl<T: AsRef<str>> ChildTagSource for [T] {
    fn child_tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(AsRef::as_ref)
    }
}

impl<T: AsRef<str>> ChildTagSource for Vec<T> {
    fn child_tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(AsRef::as_ref)
    }
}

impl<S: ChildTagSource + ?Sized> ChildTagSource for &S {
    fn child_tags(&self) -> impl Iterator<Item = &str> + '_ {
        (**self).child_tags()
    }
}
