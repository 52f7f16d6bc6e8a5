//! DOM Module - Arena-based XML Document
//!
//! Implements a compact DOM for building documents:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element names and text
//! - Element children exposed as a `ChildTagSource` for ordered insertion

pub mod document;
pub mod node;
pub mod strings;

pub use document::{ChildIter, ElementChildren, Placement, XmlDocument};
pub use node::{NodeId, NodeKind, XmlNode};
pub use strings::StringPool;
