//! Prelude Module - Ordered child blocks
//!
//! Locates the leading (prelude) or trailing (epilogue) children of a
//! container whose tags follow a fixed relative order, and computes where new
//! children of those tags may be inserted without breaking the order.
//!
//! - `order`: validated tag order, tag names resolved to ranks once
//! - `scanner`: single-pass block scan into per-tag runs
//! - `locator` / `epilogue`: insertion position queries over a scanned block
//! - `cache` / `parallel`: helpers for the NIF surface

pub mod cache;
pub mod epilogue;
pub mod error;
pub mod locator;
pub mod order;
pub mod parallel;
pub mod scanner;
pub mod source;

pub use epilogue::EpilogueTagBlock;
pub use error::PreludeError;
pub use locator::PreludeTagBlock;
pub use order::{OrderSpec, Tag};
pub use scanner::{TagBlock, TagRun};
pub use source::ChildTagSource;
