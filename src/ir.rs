// Typed tree for a parsed type expression. Built fresh per parse, never mutated.

use std::fmt;

pub const INTEGER: &str = "integer";
pub const NUMBER: &str = "number";
pub const STRING: &str = "string";
pub const BOOLEAN: &str = "boolean";
pub const FILE: &str = "file";
pub const ARRAY: &str = "array";
pub const OBJECT: &str = "object";

pub const INT32: &str = "int32";
pub const DOUBLE: &str = "double";

/// Scan order for the format-prefix match. `array`/`object` must stay last.
pub const KEYWORDS: [&str; 7] = [INTEGER, NUMBER, STRING, BOOLEAN, FILE, ARRAY, OBJECT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Integer,
    Number,
    String,
    Boolean,
    File,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Integer,
        PrimitiveKind::Number,
        PrimitiveKind::String,
        PrimitiveKind::Boolean,
        PrimitiveKind::File,
    ];

    pub fn from_keyword(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Integer => INTEGER,
            PrimitiveKind::Number => NUMBER,
            PrimitiveKind::String => STRING,
            PrimitiveKind::Boolean => BOOLEAN,
            PrimitiveKind::File => FILE,
        }
    }

    /// Format applied when the type string carries no `#` suffix.
    pub fn default_format(self) -> &'static str {
        match self {
            PrimitiveKind::Integer => INT32,
            PrimitiveKind::Number => DOUBLE,
            _ => "",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed type expression. `name` is the exact (trimmed) text it came from.
///
/// Example: `Obj<integer#int64, string[]>[]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpression {
    pub name: String,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// `string` or `string#date-time`
    Primitive { kind: PrimitiveKind, format: String },
    /// `Xxx` or `Xxx<Yyy, Zzz>`
    Object { typ: String, generics: Vec<TypeExpression> },
    /// one level of `[]`
    Array { item: Box<TypeExpression> },
}

impl TypeExpression {
    pub fn primitive(
        name: impl Into<String>,
        kind: PrimitiveKind,
        format: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Primitive { kind, format: format.into() },
        }
    }

    pub fn object(
        name: impl Into<String>,
        typ: impl Into<String>,
        generics: Vec<TypeExpression>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Object { typ: typ.into(), generics },
        }
    }

    pub fn array(name: impl Into<String>, item: TypeExpression) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Array { item: Box::new(item) },
        }
    }

    /// Strip every array layer: `X[][]` -> `X`.
    pub fn element(&self) -> &TypeExpression {
        let mut at = self;
        while let TypeKind::Array { item } = &at.kind {
            at = item.as_ref();
        }
        at
    }

    pub fn array_depth(&self) -> usize {
        let mut depth = 0;
        let mut at = self;
        while let TypeKind::Array { item } = &at.kind {
            depth += 1;
            at = item.as_ref();
        }
        depth
    }

    /// Object name and generic arguments, if this node is an object.
    pub fn as_object(&self) -> Option<(&str, &[TypeExpression])> {
        match &self.kind {
            TypeKind::Object { typ, generics } => Some((typ.as_str(), generics.as_slice())),
            _ => None,
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = "  ".repeat(depth);
        match &self.kind {
            TypeKind::Primitive { kind, format } => {
                if format.is_empty() {
                    writeln!(f, "{pad}primitive {kind}")
                } else {
                    writeln!(f, "{pad}primitive {kind} (format: {format})")
                }
            }
            TypeKind::Object { typ, generics } => {
                writeln!(f, "{pad}object {typ}")?;
                for arg in generics {
                    arg.write_tree(f, depth + 1)?;
                }
                Ok(())
            }
            TypeKind::Array { item } => {
                writeln!(f, "{pad}array")?;
                item.write_tree(f, depth + 1)
            }
        }
    }
}

/// Indented tree, one node per line.
impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
