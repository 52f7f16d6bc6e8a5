//! ResourceArc Wrappers
//!
//! Persistent state for scanned blocks and documents under construction.

use crate::dom::XmlDocument;
use crate::prelude::{EpilogueTagBlock, PreludeTagBlock};
use rustler::ResourceArc;
use std::sync::Mutex;

/// Scanned prelude; immutable, so shared across processes without locking
pub struct PreludeResource {
    pub block: PreludeTagBlock,
}

impl PreludeResource {
    pub fn new(block: PreludeTagBlock) -> Self {
        PreludeResource { block }
    }
}

#[rustler::resource_impl]
impl rustler::Resource for PreludeResource {}

/// Type alias for the ResourceArc
pub type PreludeRef = ResourceArc<PreludeResource>;

/// Scanned epilogue
pub struct EpilogueResource {
    pub block: EpilogueTagBlock,
}

impl EpilogueResource {
    pub fn new(block: EpilogueTagBlock) -> Self {
        EpilogueResource { block }
    }
}

#[rustler::resource_impl]
impl rustler::Resource for EpilogueResource {}

pub type EpilogueRef = ResourceArc<EpilogueResource>;

/// Document under construction
pub struct DocumentResource {
    pub doc: Mutex<XmlDocument>,
}

impl DocumentResource {
    pub fn new(root_name: &str) -> Self {
        DocumentResource {
            doc: Mutex::new(XmlDocument::new(root_name)),
        }
    }

    /// Read the document.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the document mutex is poisoned.
    pub fn with_doc<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&XmlDocument) -> R,
    {
        let guard = self.doc.lock().map_err(|_| "mutex_poisoned")?;
        Ok(f(&guard))
    }

    /// Modify the document.
    ///
    /// # Errors
    ///
    /// Returns `"mutex_poisoned"` if the document mutex is poisoned.
    pub fn with_doc_mut<F, R>(&self, f: F) -> Result<R, &'static str>
    where
        F: FnOnce(&mut XmlDocument) -> R,
    {
        let mut guard = self.doc.lock().map_err(|_| "mutex_poisoned")?;
        Ok(f(&mut guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for DocumentResource {}

/// Type alias for document ResourceArc
pub type DocumentRef = ResourceArc<DocumentResource>;
