//! Errors raised while checking, parsing or expanding type expressions.
//!
//! Every variant carries the offending string so callers can print an
//! actionable message. Nothing in the crate recovers from these.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiTypeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiTypeError {
    /// The type string violates the grammar.
    #[error("invalid type `{typ}`: {reason}")]
    Syntax { typ: String, reason: SyntaxReason },

    /// An object-with-generics names no known template.
    #[error("invalid type `{typ}`: no generic definition named `{name}`")]
    UnresolvedGeneric { typ: String, name: String },

    /// Usage site supplies the wrong number of generic arguments.
    #[error(
        "invalid type `{typ}`: `{name}` expects {expected} generic argument(s), found {found}"
    )]
    ArityMismatch {
        typ: String,
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid generic type `{ident}` in definition `{definition}`")]
    InvalidIdentifier { definition: String, ident: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxReason {
    #[error("empty type name")]
    Empty,
    #[error("malformed identifier")]
    BadIdentifier,
    #[error("malformed format suffix")]
    BadFormat,
    #[error("unbalanced generic brackets")]
    Unbalanced,
    #[error("whitespace before `[]`")]
    WhitespaceBeforeArray,
    #[error("generic argument list is empty")]
    NoGenericArguments,
    #[error("generics cannot be applied to a primitive or meta type")]
    GenericOnReserved,
    #[error("array and object take no format suffix")]
    FormatOnMetaKind,
    #[error("format suffix on a non-primitive type")]
    FormatOnObject,
    #[error("array and object cannot be used bare")]
    BareMetaKind,
}

impl ApiTypeError {
    pub(crate) fn syntax(typ: &str, reason: SyntaxReason) -> Self {
        Self::Syntax { typ: typ.to_string(), reason }
    }
}
