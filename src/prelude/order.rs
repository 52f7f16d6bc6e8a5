//! Ordering Specification
//!
//! A fixed, duplicate-free list of tag names. The position of a tag in the
//! list is its rank; a lower-ranked tag must never follow a higher-ranked one
//! inside an ordered block.
//!
//! Tag names are resolved once into a [`Tag`] (the rank itself), so every
//! later comparison is an integer comparison.

use std::collections::HashMap;

use super::error::PreludeError;

/// A tag name validated against an [`OrderSpec`]
///
/// Ordering of `Tag` values is rank ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(u32);

impl Tag {
    /// Position of this tag in its order spec
    #[inline]
    pub fn rank(self) -> u32 {
        self.0
    }
}

/// Ordered set of recognized tag names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    /// Tag names in rank order
    names: Vec<String>,
    /// Name -> rank
    ranks: HashMap<String, u32>,
}

impl OrderSpec {
    /// Build an order spec from tag names in rank order
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpec` if `tags` is empty or names a tag twice.
    pub fn new<I, T>(tags: I) -> Result<Self, PreludeError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut ranks = HashMap::new();

        for tag in tags {
            let name = tag.as_ref();
            let rank = names.len() as u32;
            if ranks.insert(name.to_string(), rank).is_some() {
                return Err(PreludeError::InvalidSpec(format!("duplicate tag: {}", name)));
            }
            names.push(name.to_string());
        }

        if names.is_empty() {
            return Err(PreludeError::InvalidSpec("no tags".to_string()));
        }

        Ok(OrderSpec { names, ranks })
    }

    /// Resolve a tag name, or `None` if it is not part of this spec
    #[inline]
    pub fn resolve(&self, name: &str) -> Option<Tag> {
        self.ranks.get(name).copied().map(Tag)
    }

    /// Resolve a tag name for a query
    ///
    /// # Errors
    ///
    /// Returns `InvalidTag` if `name` is not part of this spec.
    pub fn tag(&self, name: &str) -> Result<Tag, PreludeError> {
        self.resolve(name)
            .ok_or_else(|| PreludeError::InvalidTag(name.to_string()))
    }

    /// Name of a resolved tag
    ///
    /// `tag` must have been resolved by this spec.
    pub fn name(&self, tag: Tag) -> &str {
        &self.names[tag.0 as usize]
    }

    /// Check membership
    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    /// Tag names in rank order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of tags (never zero)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_follow_position() {
        let spec = OrderSpec::new(["table:title", "table:desc", "table:table-columns"]).unwrap();
        assert_eq!(spec.tag("table:title").unwrap().rank(), 0);
        assert_eq!(spec.tag("table:table-columns").unwrap().rank(), 2);
        assert!(spec.tag("table:title").unwrap() < spec.tag("table:desc").unwrap());
    }

    #[test]
    fn test_empty_spec_rejected() {
        let tags: [&str; 0] = [];
        assert!(matches!(OrderSpec::new(tags), Err(PreludeError::InvalidSpec(_))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = OrderSpec::new(["a", "b", "c", "c"]).unwrap_err();
        assert_eq!(err, PreludeError::InvalidSpec("duplicate tag: c".to_string()));
    }

    #[test]
    fn test_unknown_tag() {
        let spec = OrderSpec::new(["a", "b", "c"]).unwrap();
        assert_eq!(spec.resolve("d"), None);
        assert_eq!(spec.tag("d"), Err(PreludeError::InvalidTag("d".to_string())));
        assert!(!spec.contains("d"));
    }

    #[test]
    fn test_name_roundtrip() {
        let spec = OrderSpec::new(vec!["a".to_string(), "b".to_string()]).unwrap();
        let b = spec.tag("b").unwrap();
        assert_eq!(spec.name(b), "b");
        assert_eq!(spec.len(), 2);
        assert!(!spec.is_empty());
    }
}
