//! Upstream data errors.
//!
//! These mean the extraction step produced something the pipeline cannot
//! trust. They are never recovered from; callers attach the offending path
//! through `anyhow` context and stop.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("no <compounddef> element found")]
    NoCompound,

    #[error("expected exactly one compound in a {kind} document, found {found}")]
    MultipleCompounds { kind: &'static str, found: usize },

    #[error("compound `{name}` has kind `{found}`, expected class or struct")]
    UnexpectedKind { name: String, found: String },
}
