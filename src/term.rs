//! Elixir Term Conversion Utilities
//!
//! Success values are returned as-is or as `{:ok, value}`; failures always
//! as `{:error, reason}` with `reason` an atom.

use rustler::{Atom, Encoder, Env, NifResult, Term};

use crate::dom::Placement;
use crate::prelude::PreludeError;

pub mod atoms {
    rustler::atoms! {
        ok,
        error,
        before,
        after,
    }
}

/// `{:error, reason}`
pub fn error_term<'a>(env: Env<'a>, reason: &str) -> NifResult<Term<'a>> {
    let reason = Atom::from_str(env, reason)?;
    Ok((atoms::error(), reason).encode(env))
}

/// `{:ok, value}` or `{:error, reason}`
pub fn ok_or_error<'a, T: Encoder>(
    env: Env<'a>,
    result: Result<T, PreludeError>,
) -> NifResult<Term<'a>> {
    match result {
        Ok(value) => Ok((atoms::ok(), value).encode(env)),
        Err(e) => error_term(env, e.reason()),
    }
}

/// `value` or `{:error, reason}`, for queries
pub fn value_or_error<'a, T: Encoder>(
    env: Env<'a>,
    result: Result<T, PreludeError>,
) -> NifResult<Term<'a>> {
    match result {
        Ok(value) => Ok(value.encode(env)),
        Err(e) => error_term(env, e.reason()),
    }
}

/// Decode `:before` / `:after`
pub fn placement_from_atom(atom: Atom) -> Option<Placement> {
    if atom == atoms::before() {
        Some(Placement::Before)
    } else if atom == atoms::after() {
        Some(Placement::After)
    } else {
        None
    }
}
