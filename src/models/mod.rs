//! Schema contracts for brewery records and tool inputs.
//!
//! Every value crossing a boundary (caller to client, upstream to client) is
//! checked here before it is used. Input contracts are typed structs with
//! `garde` constraints; the record contract is enforced by `serde`.

pub mod brewery;
pub mod query;

use garde::Validate;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use brewery::{Brewery, BreweryType};
pub use query::{ByIdQuery, RandomQuery, SearchQuery};

/// A value failed its schema contract.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Wrong shape or primitive type (missing field, number instead of string, ...).
    #[error("invalid {target}: {source}")]
    Shape {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Well-typed but outside a named constraint (range, non-empty, ...).
    #[error("invalid {target}: {report}")]
    Constraint {
        target: &'static str,
        report: garde::Report,
    },

    #[error("invalid {target}: expected {expected}, got {found}")]
    UnexpectedType {
        target: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// One element of a list failed; the whole list is rejected.
    #[error("invalid element at index {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Typed input contract for a tool call.
///
/// `validated` is the single fail-fast path: normalize, then check every
/// constraint. `from_value` runs the same path on loosely-typed JSON.
pub trait QueryInput: DeserializeOwned + Validate<Context = ()> + Sized {
    const NAME: &'static str;

    /// Canonicalize the raw input (trimming and the like) before constraints run.
    fn normalize(self) -> Self {
        self
    }

    fn validated(self) -> Result<Self, ValidationError> {
        let input = self.normalize();
        input
            .validate()
            .map_err(|report| ValidationError::Constraint {
                target: Self::NAME,
                report,
            })?;
        Ok(input)
    }

    fn from_value(raw: Value) -> Result<Self, ValidationError> {
        let input: Self = serde_json::from_value(raw).map_err(|source| ValidationError::Shape {
            target: Self::NAME,
            source,
        })?;
        input.validated()
    }
}

/// JSON type name, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
