//! Compact API type expressions and generic definition expansion.
//!
//! Type strings such as `Obj<integer#int64, string[]>[]` are checked and
//! parsed by [`grammar`]; generic templates like `Page<T>` are instantiated
//! into a de-duplicated, dependency-ordered definition list by [`expand`].

pub mod error;
pub mod ir;
pub mod grammar;
pub mod tokens;
pub mod definition;
pub mod registry;
pub mod expand;
pub mod document;
pub mod path_de;
pub mod cli;

pub use definition::{ConcreteDefinition, Definition, Property};
pub use document::{
    Contact, Document, DocumentOption, ExternalDocs, Info, License, Operation, Param, Response,
    Security, Tag,
};
pub use error::{ApiTypeError, Result, SyntaxReason};
pub use expand::{Expander, PreparedTemplate, expand_all, prehandle_template};
pub use grammar::{check_type_name, parse_api_type};
pub use ir::{PrimitiveKind, TypeExpression, TypeKind};
pub use registry::DefinitionRegistry;
