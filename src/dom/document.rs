//! XML Document - Arena-based DOM for document construction
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - String interning for names and text
//!
//! Documents are built programmatically. Ordered insertion (`insert_ordered`)
//! consults a [`PreludeTagBlock`] scanned over the parent's element children,
//! so elements such as `table:title` or `table:desc` land in schema order.

use std::sync::Arc;

use super::node::{NodeId, NodeKind, XmlNode};
use super::strings::StringPool;
use crate::prelude::parallel::scan_parallel;
use crate::prelude::{ChildTagSource, OrderSpec, PreludeError, PreludeTagBlock};

/// Which end of an existing run a new element attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// In front of existing elements with the same tag
    Before,
    /// Behind existing elements with the same tag
    After,
}

/// An XML document stored in arena format
#[derive(Debug)]
pub struct XmlDocument {
    /// Arena of nodes; index 0 is the document node
    nodes: Vec<XmlNode>,
    /// Interned strings
    pub strings: StringPool,
    /// Root element node ID (not document node)
    root_element: NodeId,
}

impl XmlDocument {
    /// Create a document with a single root element
    pub fn new(root_name: &str) -> Self {
        let mut doc = XmlDocument {
            nodes: Vec::with_capacity(64),
            strings: StringPool::new(),
            root_element: 1,
        };

        doc.nodes.push(XmlNode::document());
        let name_id = doc.strings.intern(root_name);
        doc.nodes.push(XmlNode::element(name_id, Some(0), 1));
        doc.link_child(0, 1);

        doc
    }

    /// Get root element ID
    pub fn root_element_id(&self) -> NodeId {
        self.root_element
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get node name as string (elements only)
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_element() {
            self.strings.get_str(node.name_id)
        } else {
            None
        }
    }

    /// Get content of a text or comment node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Text | NodeKind::Comment => self.strings.get_str(node.name_id),
            _ => None,
        }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over element children of a node, skipping text and comments
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(move |&child| self.get_node(child).is_some_and(XmlNode::is_element))
    }

    /// Number of element children of a node
    pub fn element_count(&self, id: NodeId) -> usize {
        self.element_children(id).count()
    }

    /// Tag source over the element children of `parent`
    ///
    /// Returns `None` if `parent` is not an element.
    pub fn child_tags(&self, parent: NodeId) -> Option<ElementChildren<'_>> {
        self.element(parent).ok()?;
        Some(ElementChildren { doc: self, parent })
    }

    /// Append a new element as the last child of `parent`
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> Result<NodeId, &'static str> {
        let depth = self.element(parent)?.depth + 1;
        let name_id = self.strings.intern(name);
        let child = self.push_node(XmlNode::element(name_id, Some(parent), depth));
        self.link_child(parent, child);
        Ok(child)
    }

    /// Append a text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, &'static str> {
        let depth = self.element(parent)?.depth + 1;
        let content_id = self.strings.intern(text);
        let child = self.push_node(XmlNode::text(content_id, Some(parent), depth));
        self.link_child(parent, child);
        Ok(child)
    }

    /// Append a comment as the last child of `parent`
    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> Result<NodeId, &'static str> {
        let depth = self.element(parent)?.depth + 1;
        let content_id = self.strings.intern(text);
        let child = self.push_node(XmlNode::comment(content_id, Some(parent), depth));
        self.link_child(parent, child);
        Ok(child)
    }

    /// Insert a new element so that it becomes element child number `index`
    ///
    /// `index` counts element children only; text and comments before the
    /// element currently at `index` stay in front of the new element.
    /// `index == element_count(parent)` appends.
    pub fn insert_element(
        &mut self,
        parent: NodeId,
        index: usize,
        name: &str,
    ) -> Result<NodeId, &'static str> {
        let depth = self.element(parent)?.depth + 1;
        let next = self.element_children(parent).nth(index);
        if next.is_none() && index != self.element_count(parent) {
            return Err("index_out_of_range");
        }

        let name_id = self.strings.intern(name);
        let child = self.push_node(XmlNode::element(name_id, Some(parent), depth));
        match next {
            Some(next) => self.link_before(parent, next, child),
            None => self.link_child(parent, child),
        }
        Ok(child)
    }

    /// Insert a new `name` element into the ordered prelude of `parent`
    ///
    /// Returns the new node and its element index.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `parent` is not an element, `InvalidTag` if `name`
    /// is not part of `order`.
    pub fn insert_ordered(
        &mut self,
        parent: NodeId,
        name: &str,
        order: &Arc<OrderSpec>,
        placement: Placement,
    ) -> Result<(NodeId, usize), PreludeError> {
        let prelude = self.prelude(parent, Arc::clone(order))?;
        let index = match placement {
            Placement::Before => prelude.insert_position_before(name)?,
            Placement::After => prelude.insert_position_after(Some(name))?,
        };

        let child = self
            .insert_element(parent, index, name)
            .map_err(|_| PreludeError::InvalidArgument)?;
        log::trace!(target: "rustyprelude.dom", "inserted <{}> at {} of node {}", name, index, parent);
        Ok((child, index))
    }

    /// Scan the ordered prelude of `parent`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `parent` is not an element.
    pub fn prelude(&self, parent: NodeId, order: Arc<OrderSpec>) -> Result<PreludeTagBlock, PreludeError> {
        let source = self.child_tags(parent).ok_or(PreludeError::InvalidArgument)?;
        Ok(PreludeTagBlock::with_spec(&source, order))
    }

    /// Scan the preludes of several parents in parallel
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any parent is not an element.
    pub fn prelude_blocks(
        &self,
        parents: &[NodeId],
        order: &Arc<OrderSpec>,
    ) -> Result<Vec<PreludeTagBlock>, PreludeError> {
        let sources = parents
            .iter()
            .map(|&parent| self.child_tags(parent).ok_or(PreludeError::InvalidArgument))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(scan_parallel(&sources, order))
    }

    /// Element node by ID
    fn element(&self, id: NodeId) -> Result<&XmlNode, &'static str> {
        let node = self.get_node(id).ok_or("no_such_node")?;
        if node.is_element() {
            Ok(node)
        } else {
            Err("not_an_element")
        }
    }

    fn push_node(&mut self, node: XmlNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Link a child node as the last child of its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }

        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Link a child node directly in front of `next_id`
    fn link_before(&mut self, parent_id: NodeId, next_id: NodeId, child_id: NodeId) {
        let prev_opt = self.nodes[next_id as usize].prev_sibling;

        self.nodes[child_id as usize].prev_sibling = prev_opt;
        self.nodes[child_id as usize].next_sibling = Some(next_id);
        self.nodes[next_id as usize].prev_sibling = Some(child_id);

        match prev_opt {
            Some(prev_id) => self.nodes[prev_id as usize].next_sibling = Some(child_id),
            None => self.nodes[parent_id as usize].first_child = Some(child_id),
        }
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d XmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Element children of one parent, viewed as a [`ChildTagSource`]
#[derive(Clone, Copy)]
pub struct ElementChildren<'d> {
    doc: &'d XmlDocument,
    parent: NodeId,
}

impl ChildTagSource for ElementChildren<'_> {
    fn child_tags(&self) -> impl Iterator<Item = &str> + '_ {
        let doc = self.doc;
        doc.element_children(self.parent)
            .filter_map(move |id| doc.node_name(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "table:title";
    const DESC: &str = "table:desc";
    const COLUMNS: &str = "table:table-columns";

    fn table_order() -> Arc<OrderSpec> {
        Arc::new(OrderSpec::new([TITLE, DESC, COLUMNS]).unwrap())
    }

    fn names(doc: &XmlDocument, parent: NodeId) -> Vec<&str> {
        doc.element_children(parent)
            .filter_map(|id| doc.node_name(id))
            .collect()
    }

    #[test]
    fn test_new_document() {
        let doc = XmlDocument::new("table:table");
        let root = doc.root_element_id();
        assert_eq!(doc.node_name(root), Some("table:table"));
        assert_eq!(doc.get_node(root).unwrap().depth, 1);
        assert_eq!(doc.node_count(), 2);
    }

    #[test]
    fn test_append_and_children() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root_element_id();
        let a = doc.append_element(root, "a").unwrap();
        doc.append_text(root, "hello").unwrap();
        doc.append_comment(root, "note").unwrap();
        doc.append_element(root, "b").unwrap();

        assert_eq!(doc.children(root).count(), 4);
        assert_eq!(names(&doc, root), vec!["a", "b"]);
        assert_eq!(doc.element_count(root), 2);
        assert_eq!(doc.get_node(a).unwrap().depth, 2);

        let first = doc.get_node(a).unwrap();
        assert!(first.prev_sibling.is_none());
        assert!(first.next_sibling.is_some());
    }

    #[test]
    fn test_text_content() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root_element_id();
        let text = doc.append_text(root, "hello").unwrap();
        assert_eq!(doc.text_content(text), Some("hello"));
        assert_eq!(doc.node_name(text), None);
    }

    #[test]
    fn test_append_to_text_node_fails() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root_element_id();
        let text = doc.append_text(root, "hello").unwrap();
        assert_eq!(doc.append_element(text, "a"), Err("not_an_element"));
        assert_eq!(doc.append_element(99, "a"), Err("no_such_node"));
    }

    #[test]
    fn test_insert_element_positions() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root_element_id();
        doc.append_element(root, "b").unwrap();
        doc.append_element(root, "d").unwrap();

        doc.insert_element(root, 0, "a").unwrap();
        doc.insert_element(root, 2, "c").unwrap();
        doc.insert_element(root, 4, "e").unwrap();

        assert_eq!(names(&doc, root), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(doc.insert_element(root, 9, "z"), Err("index_out_of_range"));
    }

    #[test]
    fn test_insert_element_keeps_text_in_front() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root_element_id();
        let text = doc.append_text(root, "lead").unwrap();
        let b = doc.append_element(root, "b").unwrap();

        let a = doc.insert_element(root, 0, "a").unwrap();
        let order: Vec<NodeId> = doc.children(root).collect();
        assert_eq!(order, vec![text, a, b]);
    }

    #[test]
    fn test_child_tags_source() {
        let mut doc = XmlDocument::new("root");
        let root = doc.root_element_id();
        doc.append_element(root, "a").unwrap();
        doc.append_text(root, " ").unwrap();
        doc.append_element(root, "b").unwrap();

        let source = doc.child_tags(root).unwrap();
        let tags: Vec<&str> = source.child_tags().collect();
        assert_eq!(tags, vec!["a", "b"]);

        let text = doc.children(root).nth(1).unwrap();
        assert!(doc.child_tags(text).is_none());
    }

    #[test]
    fn test_prelude_over_document() {
        let mut doc = XmlDocument::new("table:table");
        let root = doc.root_element_id();
        for name in [TITLE, COLUMNS, "table:table-row", "table:table-row"] {
            doc.append_element(root, name).unwrap();
        }

        let prelude = doc.prelude(root, table_order()).unwrap();
        assert_eq!(prelude.len(), 2);
        assert_eq!(prelude.insert_position_before(DESC), Ok(1));
        assert_eq!(prelude.tag_info(COLUMNS), Ok((1, 1)));
    }

    #[test]
    fn test_prelude_requires_element() {
        let doc = XmlDocument::new("root");
        assert_eq!(
            doc.prelude(0, table_order()).unwrap_err(),
            PreludeError::InvalidArgument
        );
    }

    #[test]
    fn test_insert_ordered_builds_schema_order() {
        let order = table_order();
        let mut doc = XmlDocument::new("table:table");
        let root = doc.root_element_id();
        doc.append_element(root, "table:table-row").unwrap();

        doc.insert_ordered(root, COLUMNS, &order, Placement::After).unwrap();
        doc.insert_ordered(root, TITLE, &order, Placement::After).unwrap();
        let (_, index) = doc.insert_ordered(root, DESC, &order, Placement::Before).unwrap();
        assert_eq!(index, 1);
        doc.insert_ordered(root, TITLE, &order, Placement::After).unwrap();

        assert_eq!(
            names(&doc, root),
            vec![TITLE, TITLE, DESC, COLUMNS, "table:table-row"]
        );
    }

    #[test]
    fn test_insert_ordered_placement_within_run() {
        let order = table_order();
        let mut doc = XmlDocument::new("table:table");
        let root = doc.root_element_id();
        let first = doc.append_element(root, DESC).unwrap();

        let (before, index) = doc.insert_ordered(root, DESC, &order, Placement::Before).unwrap();
        assert_eq!(index, 0);
        let (after, index) = doc.insert_ordered(root, DESC, &order, Placement::After).unwrap();
        assert_eq!(index, 2);

        let ids: Vec<NodeId> = doc.element_children(root).collect();
        assert_eq!(ids, vec![before, first, after]);
    }

    #[test]
    fn test_insert_ordered_rejects_foreign_tag() {
        let order = table_order();
        let mut doc = XmlDocument::new("table:table");
        let root = doc.root_element_id();
        let err = doc
            .insert_ordered(root, "table:table-row", &order, Placement::Before)
            .unwrap_err();
        assert_eq!(err, PreludeError::InvalidTag("table:table-row".to_string()));
        assert_eq!(doc.element_count(root), 0);
    }

    #[test]
    fn test_prelude_blocks_parallel() {
        let order = table_order();
        let mut doc = XmlDocument::new("office:spreadsheet");
        let root = doc.root_element_id();
        let t1 = doc.append_element(root, "table:table").unwrap();
        let t2 = doc.append_element(root, "table:table").unwrap();
        doc.append_element(t1, TITLE).unwrap();
        doc.append_element(t1, DESC).unwrap();
        doc.append_element(t2, "table:table-row").unwrap();

        let blocks = doc.prelude_blocks(&[t1, t2], &order).unwrap();
        let lengths: Vec<usize> = blocks.iter().map(|b| b.len()).collect();
        assert_eq!(lengths, vec![2, 0]);

        assert!(doc.prelude_blocks(&[t1, 0], &order).is_err());
    }
}
