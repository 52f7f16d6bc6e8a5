//! RustyPrelude - Ordered insertion positions for XML content models
//!
//! Many content models require optional child elements to appear first (or
//! last) in a fixed relative order, e.g. `table:title` before `table:desc`
//! before `table:table-columns`. This crate scans those blocks and answers
//! where a new child must be inserted to keep the order.
//!
//! Surfaces:
//! A: Prelude queries (prelude_*)
//! B: Epilogue queries (epilogue_*)
//! C: Parallel scanning of many containers (prelude_scan_many)
//! D: Document construction with ordered insertion (document_*)

use rustler::{Atom, Encoder, Env, NifResult, ResourceArc, Term};

pub mod dom;
pub mod prelude;
mod resource;
mod term;

use dom::NodeId;
use prelude::cache::order_spec;
use prelude::parallel::scan_parallel;
use prelude::{ChildTagSource, EpilogueTagBlock, PreludeError, PreludeTagBlock};
use resource::{
    DocumentRef, DocumentResource, EpilogueRef, EpilogueResource, PreludeRef, PreludeResource,
};
use term::{error_term, ok_or_error, placement_from_atom, value_or_error};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Surface A: Prelude Queries
// ============================================================================

/// Scan the prelude of a child tag list (`nil` container is rejected)
#[rustler::nif]
fn prelude_new<'a>(
    env: Env<'a>,
    children: Option<Vec<String>>,
    order: Vec<String>,
) -> NifResult<Term<'a>> {
    let result = children
        .ok_or(PreludeError::InvalidArgument)
        .and_then(|children| {
            let spec = order_spec(order)?;
            let block = PreludeTagBlock::with_spec(&children, spec);
            Ok(ResourceArc::new(PreludeResource::new(block)))
        });

    ok_or_error(env, result)
}

#[rustler::nif]
fn prelude_length(prelude: PreludeRef) -> usize {
    prelude.block.len()
}

/// Returns `{start_index, count}`, `{-1, 0}` for an absent tag
#[rustler::nif]
fn prelude_tag_info<'a>(env: Env<'a>, prelude: PreludeRef, tag: &str) -> NifResult<Term<'a>> {
    value_or_error(env, prelude.block.tag_info(tag))
}

#[rustler::nif]
fn prelude_insert_position_before<'a>(
    env: Env<'a>,
    prelude: PreludeRef,
    tag: &str,
) -> NifResult<Term<'a>> {
    value_or_error(env, prelude.block.insert_position_before(tag))
}

/// `tag` may be `nil` for the end of the prelude
#[rustler::nif]
fn prelude_insert_position_after<'a>(
    env: Env<'a>,
    prelude: PreludeRef,
    tag: Option<String>,
) -> NifResult<Term<'a>> {
    value_or_error(env, prelude.block.insert_position_after(tag.as_deref()))
}

// ============================================================================
// Surface B: Epilogue Queries
// ============================================================================

#[rustler::nif]
fn epilogue_new<'a>(
    env: Env<'a>,
    children: Option<Vec<String>>,
    order: Vec<String>,
) -> NifResult<Term<'a>> {
    let result = children
        .ok_or(PreludeError::InvalidArgument)
        .and_then(|children| {
            let spec = order_spec(order)?;
            let block = EpilogueTagBlock::with_spec(&children, spec);
            Ok(ResourceArc::new(EpilogueResource::new(block)))
        });

    ok_or_error(env, result)
}

#[rustler::nif]
fn epilogue_length(epilogue: EpilogueRef) -> usize {
    epilogue.block.len()
}

#[rustler::nif]
fn epilogue_start(epilogue: EpilogueRef) -> usize {
    epilogue.block.start()
}

#[rustler::nif]
fn epilogue_tag_info<'a>(env: Env<'a>, epilogue: EpilogueRef, tag: &str) -> NifResult<Term<'a>> {
    value_or_error(env, epilogue.block.tag_info(tag))
}

/// `tag` may be `nil` for the start of the epilogue
#[rustler::nif]
fn epilogue_insert_position_before<'a>(
    env: Env<'a>,
    epilogue: EpilogueRef,
    tag: Option<String>,
) -> NifResult<Term<'a>> {
    value_or_error(env, epilogue.block.insert_position_before(tag.as_deref()))
}

#[rustler::nif]
fn epilogue_insert_position_after<'a>(
    env: Env<'a>,
    epilogue: EpilogueRef,
    tag: &str,
) -> NifResult<Term<'a>> {
    value_or_error(env, epilogue.block.insert_position_after(tag))
}

// ============================================================================
// Surface C: Parallel Scanning
// ============================================================================

/// Prelude lengths of many child tag lists, scanned in parallel
#[rustler::nif(schedule = "DirtyCpu")]
fn prelude_scan_many<'a>(
    env: Env<'a>,
    containers: Vec<Vec<String>>,
    order: Vec<String>,
) -> NifResult<Term<'a>> {
    let result = order_spec(order).map(|spec| {
        scan_parallel(&containers, &spec)
            .iter()
            .map(PreludeTagBlock::len)
            .collect::<Vec<usize>>()
    });

    ok_or_error(env, result)
}

// ============================================================================
// Surface D: Document Construction
// ============================================================================

#[rustler::nif]
fn document_new(root: &str) -> DocumentRef {
    ResourceArc::new(DocumentResource::new(root))
}

#[rustler::nif]
fn document_root<'a>(env: Env<'a>, doc: DocumentRef) -> NifResult<Term<'a>> {
    match doc.with_doc(|d| d.root_element_id()) {
        Ok(id) => Ok(id.encode(env)),
        Err(reason) => error_term(env, reason),
    }
}

/// Append an element; returns `{:ok, node_id}`
#[rustler::nif]
fn document_append_element<'a>(
    env: Env<'a>,
    doc: DocumentRef,
    parent: NodeId,
    name: &str,
) -> NifResult<Term<'a>> {
    match doc.with_doc_mut(|d| d.append_element(parent, name)).and_then(|r| r) {
        Ok(id) => Ok((term::atoms::ok(), id).encode(env)),
        Err(reason) => error_term(env, reason),
    }
}

/// Names of the element children of `parent`
#[rustler::nif]
fn document_child_names<'a>(env: Env<'a>, doc: DocumentRef, parent: NodeId) -> NifResult<Term<'a>> {
    let result = doc.with_doc(|d| {
        d.child_tags(parent).map(|source| {
            source.child_tags().map(str::to_string).collect::<Vec<String>>()
        })
    });

    match result {
        Ok(Some(names)) => Ok(names.encode(env)),
        Ok(None) => error_term(env, PreludeError::InvalidArgument.reason()),
        Err(reason) => error_term(env, reason),
    }
}

/// Insert `name` into the ordered prelude of `parent`
///
/// `placement` is `:before` or `:after` existing elements of the same tag.
/// Returns `{:ok, {node_id, index}}`.
#[rustler::nif]
fn document_insert_ordered<'a>(
    env: Env<'a>,
    doc: DocumentRef,
    parent: NodeId,
    name: &str,
    order: Vec<String>,
    placement: Atom,
) -> NifResult<Term<'a>> {
    let placement = placement_from_atom(placement).ok_or(rustler::Error::BadArg)?;

    let result = doc.with_doc_mut(|d| -> Result<(NodeId, usize), PreludeError> {
        if d.child_tags(parent).is_none() {
            return Err(PreludeError::InvalidArgument);
        }
        let spec = order_spec(order)?;
        d.insert_ordered(parent, name, &spec, placement)
    });

    match result {
        Ok(result) => ok_or_error(env, result),
        Err(reason) => error_term(env, reason),
    }
}

/// Scan the prelude of a document element; returns `{:ok, prelude_ref}`
#[rustler::nif]
fn document_prelude<'a>(
    env: Env<'a>,
    doc: DocumentRef,
    parent: NodeId,
    order: Vec<String>,
) -> NifResult<Term<'a>> {
    let result = doc.with_doc(|d| -> Result<PreludeRef, PreludeError> {
        let source = d.child_tags(parent).ok_or(PreludeError::InvalidArgument)?;
        let spec = order_spec(order)?;
        let block = PreludeTagBlock::with_spec(&source, spec);
        Ok(ResourceArc::new(PreludeResource::new(block)))
    });

    match result {
        Ok(result) => ok_or_error(env, result),
        Err(reason) => error_term(env, reason),
    }
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.RustyPrelude.Native");
