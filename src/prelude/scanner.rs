//! Ordered Block Scanner
//!
//! Computes the maximal run of children, at the front (prelude) or at the back
//! (epilogue) of a container, whose tags respect an [`OrderSpec`]:
//!
//! - every tag is a member of the spec
//! - ranks never decrease in document order
//!
//! Repeated tags form a single [`TagRun`]. A foreign tag or a step back to a
//! lower rank ends the block.

use super::order::{OrderSpec, Tag};
use super::source::ChildTagSource;

/// Contiguous occurrence of one tag inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRun {
    pub tag: Tag,
    /// Index of the first child of the run in the container
    pub start: usize,
    /// Number of children in the run (at least 1)
    pub count: usize,
}

impl TagRun {
    /// Exclusive end index
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.count
    }
}

/// Snapshot of an ordered block of children
///
/// Runs are stored in document order, which is also strictly increasing rank
/// order, so lookups by tag are binary searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBlock {
    /// Index of the first child of the block (0 for a prelude)
    start: usize,
    /// Number of children in the block
    len: usize,
    runs: Vec<TagRun>,
}

impl TagBlock {
    /// Index of the first child in the block
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of children in the block
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive end index of the block
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Runs in document order
    pub fn runs(&self) -> &[TagRun] {
        &self.runs
    }

    /// The run of `tag`, if it occurs in the block
    pub fn run(&self, tag: Tag) -> Option<&TagRun> {
        self.runs
            .binary_search_by_key(&tag, |run| run.tag)
            .ok()
            .map(|i| &self.runs[i])
    }

    /// First run whose tag ranks strictly above `tag`
    pub fn first_run_above(&self, tag: Tag) -> Option<&TagRun> {
        let i = self.runs.partition_point(|run| run.tag <= tag);
        self.runs.get(i)
    }

    /// Where a new `tag` child goes to precede any existing ones
    ///
    /// Falls back to the first higher-ranked run, then to the block end.
    pub fn position_before(&self, tag: Tag) -> usize {
        if let Some(run) = self.run(tag) {
            return run.start;
        }
        self.first_run_above(tag)
            .map_or(self.end(), |run| run.start)
    }

    /// Where a new `tag` child goes to follow any existing ones
    ///
    /// An absent tag has a single insertion point, shared with `position_before`.
    pub fn position_after(&self, tag: Tag) -> usize {
        match self.run(tag) {
            Some(run) => run.end(),
            None => self.position_before(tag),
        }
    }
}

/// Scan the leading block of `source`
pub fn scan_prelude<S: ChildTagSource + ?Sized>(source: &S, spec: &OrderSpec) -> TagBlock {
    let mut runs: Vec<TagRun> = Vec::new();
    let mut len = 0;

    for name in source.child_tags() {
        let tag = match spec.resolve(name) {
            Some(tag) if runs.last().map_or(true, |run| run.tag <= tag) => tag,
            _ => {
                log::trace!(target: "rustyprelude.scan", "prelude ends at {} on <{}>", len, name);
                break;
            }
        };

        match runs.last_mut() {
            Some(run) if run.tag == tag => run.count += 1,
            _ => runs.push(TagRun { tag, start: len, count: 1 }),
        }
        len += 1;
    }

    TagBlock { start: 0, len, runs }
}

/// Scan the trailing block of `source`
///
/// Walks backwards from the last child; tags read in document order must still
/// have non-decreasing rank.
pub fn scan_epilogue<S: ChildTagSource + ?Sized>(source: &S, spec: &OrderSpec) -> TagBlock {
    let tags: Vec<Option<Tag>> = source.child_tags().map(|name| spec.resolve(name)).collect();
    let total = tags.len();
    let mut runs: Vec<TagRun> = Vec::new();

    for (i, resolved) in tags.iter().enumerate().rev() {
        let tag = match resolved {
            Some(tag) if runs.last().map_or(true, |run| *tag <= run.tag) => *tag,
            _ => {
                log::trace!(target: "rustyprelude.scan", "epilogue starts at {}", i + 1);
                break;
            }
        };

        match runs.last_mut() {
            Some(run) if run.tag == tag => {
                run.start = i;
                run.count += 1;
            }
            _ => runs.push(TagRun { tag, start: i, count: 1 }),
        }
    }

    runs.reverse();
    let len: usize = runs.iter().map(|run| run.count).sum();

    TagBlock { start: total - len, len, runs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> OrderSpec {
        OrderSpec::new(["a", "b", "c"]).unwrap()
    }

    fn children(tags: &str) -> Vec<String> {
        tags.chars().map(String::from).collect()
    }

    fn run_summary(block: &TagBlock, spec: &OrderSpec) -> Vec<(String, usize, usize)> {
        block
            .runs()
            .iter()
            .map(|r| (spec.name(r.tag).to_string(), r.start, r.count))
            .collect()
    }

    #[test]
    fn test_prelude_runs() {
        let spec = abc();
        let block = scan_prelude(&children("aabbbccghixyz"), &spec);
        assert_eq!(block.len(), 7);
        assert_eq!(
            run_summary(&block, &spec),
            vec![
                ("a".to_string(), 0, 2),
                ("b".to_string(), 2, 3),
                ("c".to_string(), 5, 2),
            ]
        );
    }

    #[test]
    fn test_prelude_stops_on_foreign_tag() {
        let block = scan_prelude(&children("aabbbgccixyz"), &abc());
        assert_eq!(block.len(), 5);
        assert_eq!(block.runs().len(), 2);
    }

    #[test]
    fn test_prelude_stops_on_lower_rank() {
        let block = scan_prelude(&children("bba"), &abc());
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_prelude_rejects_leading_foreign_tag() {
        assert!(scan_prelude(&children("haabbccghixyz"), &abc()).is_empty());
        assert!(scan_prelude(&children("dadeeff"), &abc()).is_empty());
    }

    #[test]
    fn test_prelude_only_tree() {
        let block = scan_prelude(&children("aabbcc"), &abc());
        assert_eq!(block.len(), 6);
        assert_eq!(block.end(), 6);
    }

    #[test]
    fn test_empty_source() {
        let block = scan_prelude(&children(""), &abc());
        assert_eq!(block, TagBlock::default());
    }

    #[test]
    fn test_run_lookup() {
        let spec = abc();
        let block = scan_prelude(&children("aacc"), &spec);
        let b = spec.tag("b").unwrap();
        assert!(block.run(b).is_none());
        assert_eq!(block.first_run_above(b).map(|r| r.start), Some(2));
        assert_eq!(block.position_before(b), 2);
        assert_eq!(block.position_after(b), 2);
        assert_eq!(block.position_after(spec.tag("c").unwrap()), 4);
    }

    #[test]
    fn test_epilogue_runs() {
        let spec = abc();
        let block = scan_epilogue(&children("xyzaabcc"), &spec);
        assert_eq!(block.start(), 3);
        assert_eq!(block.len(), 5);
        assert_eq!(block.end(), 8);
        assert_eq!(
            run_summary(&block, &spec),
            vec![
                ("a".to_string(), 3, 2),
                ("b".to_string(), 5, 1),
                ("c".to_string(), 6, 2),
            ]
        );
    }

    #[test]
    fn test_epilogue_stops_on_higher_rank() {
        // reading backwards: b, a, then c ranks above a
        let block = scan_epilogue(&children("xcab"), &abc());
        assert_eq!(block.start(), 2);
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_epilogue_without_trailing_tags() {
        let block = scan_epilogue(&children("aabbx"), &abc());
        assert!(block.is_empty());
        assert_eq!(block.start(), 5);
    }

    #[test]
    fn test_epilogue_covers_whole_container() {
        let block = scan_epilogue(&children("abc"), &abc());
        assert_eq!(block.start(), 0);
        assert_eq!(block.len(), 3);
    }
}
