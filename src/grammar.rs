//! Type-expression grammar.
//!
//! ```text
//! type    := ident ( "<" args ">" | "#" format )? ( "[]" )*
//! args    := type ( "," type )*        (empty segments are skipped)
//! ident   := [A-Za-z0-9_]+
//! format  := [A-Za-z0-9_-]*
//! ```
//!
//! `check_type_name` and `parse_api_type` share one per-level classifier, so
//! they accept exactly the same strings. The checker only walks; the parser
//! builds a [`TypeExpression`] tree.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApiTypeError, Result, SyntaxReason};
use crate::ir::{ARRAY, KEYWORDS, OBJECT, PrimitiveKind, TypeExpression};

static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid identifier regex"));
static FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]*$").expect("valid format regex"));

pub fn is_identifier(s: &str) -> bool {
    IDENT_RE.is_match(s)
}

/// One syntactic level of a type string, borrowed from the input.
#[derive(Debug, PartialEq, Eq)]
enum Level<'a> {
    /// `X[]`, carrying `X`
    Array(&'a str),
    Primitive { kind: PrimitiveKind, format: Option<&'a str> },
    Object { typ: &'a str, args: Vec<&'a str> },
}

/// Classify a trimmed type string. Order matters: the `[]` suffix is the
/// outermost wrapper, then whichever of `#` / `<` appears first.
///
/// Only the whole input and generic argument segments are trimmed, so any
/// whitespace left at a level is a syntax error.
fn classify(text: &str) -> Result<Level<'_>> {
    if text.is_empty() {
        return Err(ApiTypeError::syntax(text, SyntaxReason::Empty));
    }

    // 1. X[] | X[][]
    if let Some(prefix) = text.strip_suffix("[]") {
        if prefix.ends_with(char::is_whitespace) {
            return Err(ApiTypeError::syntax(text, SyntaxReason::WhitespaceBeforeArray));
        }
        return Ok(Level::Array(prefix));
    }

    match text.find(['<', '#']) {
        // 2. X#fmt
        Some(idx) if text[idx..].starts_with('#') => {
            let head = &text[..idx];
            let format = &text[idx + 1..];
            if !is_identifier(head) {
                return Err(ApiTypeError::syntax(text, SyntaxReason::BadIdentifier));
            }
            if !FORMAT_RE.is_match(format) {
                return Err(ApiTypeError::syntax(text, SyntaxReason::BadFormat));
            }
            match KEYWORDS.iter().copied().find(|kw| head.starts_with(*kw)) {
                Some(ARRAY) | Some(OBJECT) => {
                    Err(ApiTypeError::syntax(text, SyntaxReason::FormatOnMetaKind))
                }
                Some(kw) => match PrimitiveKind::from_keyword(kw) {
                    Some(kind) => Ok(Level::Primitive { kind, format: Some(format) }),
                    None => Err(ApiTypeError::syntax(text, SyntaxReason::FormatOnObject)),
                },
                None => Err(ApiTypeError::syntax(text, SyntaxReason::FormatOnObject)),
            }
        }
        // 3. X<Y, Z<A, B>>
        Some(idx) => {
            let head = &text[..idx];
            let Some(inner) = text[idx + 1..].strip_suffix('>') else {
                return Err(ApiTypeError::syntax(text, SyntaxReason::Unbalanced));
            };
            if !is_identifier(head) {
                return Err(ApiTypeError::syntax(text, SyntaxReason::BadIdentifier));
            }
            if KEYWORDS.iter().any(|kw| *kw == head) {
                return Err(ApiTypeError::syntax(text, SyntaxReason::GenericOnReserved));
            }
            let args = split_generic_arguments(inner)
                .ok_or_else(|| ApiTypeError::syntax(text, SyntaxReason::Unbalanced))?;
            if args.is_empty() {
                return Err(ApiTypeError::syntax(text, SyntaxReason::NoGenericArguments));
            }
            Ok(Level::Object { typ: head, args })
        }
        // 4-6. bare name
        None => {
            if !is_identifier(text) {
                return Err(ApiTypeError::syntax(text, SyntaxReason::BadIdentifier));
            }
            if let Some(kind) = PrimitiveKind::from_keyword(text) {
                return Ok(Level::Primitive { kind, format: None });
            }
            if text == ARRAY || text == OBJECT {
                return Err(ApiTypeError::syntax(text, SyntaxReason::BareMetaKind));
            }
            Ok(Level::Object { typ: text, args: Vec::new() })
        }
    }
}

/// Split the inside of a generic list on top-level commas.
///
/// A comma only splits where the `<`/`>` counts seen so far are equal:
/// `T1, T2<T3, T4>` splits into `T1` and `T2<T3, T4>`. Returned segments are
/// trimmed; empty ones are dropped. `None` when the counts never balance.
pub fn split_generic_arguments(inner: &str) -> Option<Vec<&str>> {
    let mut out = Vec::with_capacity(2);
    let mut start = 0;
    // `<` minus `>` seen so far
    let mut depth: isize = 0;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                let trimmed = inner[start..idx].trim();
                if !trimmed.is_empty() {
                    out.push(trimmed);
                }
                start = idx + 1;
            }
            _ => {}
        }
    }

    if depth != 0 {
        return None;
    }
    let rest = &inner[start..];
    let trimmed = rest.trim();
    if !trimmed.is_empty() {
        out.push(trimmed);
    }
    Some(out)
}

/// Validate a type string without building a tree.
pub fn check_type_name(text: &str) -> Result<()> {
    check_level(text.trim())
}

fn check_level(text: &str) -> Result<()> {
    match classify(text)? {
        Level::Array(prefix) => check_level(prefix),
        Level::Primitive { .. } => Ok(()),
        Level::Object { args, .. } => args.into_iter().try_for_each(check_level),
    }
}

/// Parse a type string into a [`TypeExpression`].
pub fn parse_api_type(text: &str) -> Result<TypeExpression> {
    parse_level(text.trim())
}

fn parse_level(text: &str) -> Result<TypeExpression> {
    let parsed = match classify(text)? {
        Level::Array(prefix) => TypeExpression::array(text, parse_level(prefix)?),
        Level::Primitive { kind, format } => {
            TypeExpression::primitive(text, kind, format.unwrap_or(kind.default_format()))
        }
        Level::Object { typ, args } => {
            let generics = args
                .into_iter()
                .map(parse_level)
                .collect::<Result<Vec<_>>>()?;
            TypeExpression::object(text, typ, generics)
        }
    };
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeKind;

    fn reason(text: &str) -> SyntaxReason {
        match parse_api_type(text) {
            Err(ApiTypeError::Syntax { reason, .. }) => reason,
            other => panic!("expected syntax error for `{text}`, got {other:?}"),
        }
    }

    #[test]
    fn primitive_with_format() {
        let ty = parse_api_type("integer#int64").unwrap();
        assert_eq!(
            ty,
            TypeExpression::primitive("integer#int64", PrimitiveKind::Integer, "int64")
        );
    }

    #[test]
    fn primitive_default_format() {
        assert_eq!(
            parse_api_type("integer").unwrap(),
            TypeExpression::primitive("integer", PrimitiveKind::Integer, "int32")
        );
        assert_eq!(
            parse_api_type("number").unwrap(),
            TypeExpression::primitive("number", PrimitiveKind::Number, "double")
        );
        assert_eq!(
            parse_api_type("string").unwrap(),
            TypeExpression::primitive("string", PrimitiveKind::String, "")
        );
    }

    #[test]
    fn explicit_empty_format_is_kept_empty() {
        assert_eq!(
            parse_api_type("integer#").unwrap(),
            TypeExpression::primitive("integer#", PrimitiveKind::Integer, "")
        );
    }

    #[test]
    fn nested_generic_array() {
        let ty = parse_api_type("Obj<integer#int64, string[]>[]").unwrap();
        let expected = TypeExpression::array(
            "Obj<integer#int64, string[]>[]",
            TypeExpression::object(
                "Obj<integer#int64, string[]>",
                "Obj",
                vec![
                    TypeExpression::primitive("integer#int64", PrimitiveKind::Integer, "int64"),
                    TypeExpression::array(
                        "string[]",
                        TypeExpression::primitive("string", PrimitiveKind::String, ""),
                    ),
                ],
            ),
        );
        assert_eq!(ty, expected);
    }

    #[test]
    fn commas_inside_nested_generics_do_not_split() {
        let ty = parse_api_type("Map<K, Pair<A, B<C, D>>>").unwrap();
        let (typ, generics) = ty.as_object().unwrap();
        assert_eq!(typ, "Map");
        let names: Vec<_> = generics.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["K", "Pair<A, B<C, D>>"]);
        let (_, inner) = generics[1].as_object().unwrap();
        assert_eq!(inner[1].name, "B<C, D>");
    }

    #[test]
    fn trailing_comma_is_skipped() {
        let ty = parse_api_type("Page<Item,>").unwrap();
        let (_, generics) = ty.as_object().unwrap();
        assert_eq!(generics.len(), 1);
        assert!(check_type_name("Page<Item, >").is_ok());
    }

    #[test]
    fn plain_object_and_multi_dimensional_array() {
        let ty = parse_api_type("User[][]").unwrap();
        assert_eq!(ty.array_depth(), 2);
        assert!(matches!(
            &ty.element().kind,
            TypeKind::Object { typ, generics } if typ == "User" && generics.is_empty()
        ));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let ty = parse_api_type("  Page< Item >  ").unwrap();
        assert_eq!(ty.name, "Page< Item >");
        assert_eq!(ty.as_object().unwrap().1[0].name, "Item");
    }

    #[test]
    fn whitespace_before_array_suffix_is_rejected() {
        assert_eq!(reason("User []"), SyntaxReason::WhitespaceBeforeArray);
        assert_eq!(reason("Page<Item> []"), SyntaxReason::WhitespaceBeforeArray);
        assert_eq!(reason("Page<Item>\t[]"), SyntaxReason::WhitespaceBeforeArray);
        assert_eq!(reason("User[] []"), SyntaxReason::WhitespaceBeforeArray);
        let err = check_type_name("Obj<string []>").unwrap_err();
        assert_eq!(
            err,
            ApiTypeError::Syntax {
                typ: "string []".to_string(),
                reason: SyntaxReason::WhitespaceBeforeArray,
            }
        );
        assert!(check_type_name("  User[]  ").is_ok());
        assert!(check_type_name("Obj< string[] >").is_ok());
    }

    #[test]
    fn reserved_keyword_misuse() {
        assert_eq!(reason("array#date"), SyntaxReason::FormatOnMetaKind);
        assert_eq!(reason("object#x"), SyntaxReason::FormatOnMetaKind);
        assert_eq!(reason("array"), SyntaxReason::BareMetaKind);
        assert_eq!(reason("object[]"), SyntaxReason::BareMetaKind);
        assert_eq!(reason("string<T>"), SyntaxReason::GenericOnReserved);
        assert_eq!(reason("array<T>"), SyntaxReason::GenericOnReserved);
        assert_eq!(reason("User#id"), SyntaxReason::FormatOnObject);
    }

    #[test]
    fn malformed_strings() {
        assert_eq!(reason(""), SyntaxReason::Empty);
        assert_eq!(reason("[]"), SyntaxReason::Empty);
        assert_eq!(reason("Page<Item"), SyntaxReason::Unbalanced);
        assert_eq!(reason("Page<Wrap<Item>"), SyntaxReason::Unbalanced);
        assert_eq!(reason("Page<>"), SyntaxReason::NoGenericArguments);
        assert_eq!(reason("Page<,>"), SyntaxReason::NoGenericArguments);
        assert_eq!(reason("Two Words"), SyntaxReason::BadIdentifier);
        assert_eq!(reason("string#date time"), SyntaxReason::BadFormat);
    }

    #[test]
    fn syntax_error_names_offending_segment() {
        let err = check_type_name("Page<Wrap<array#x>>").unwrap_err();
        assert_eq!(
            err,
            ApiTypeError::Syntax {
                typ: "array#x".to_string(),
                reason: SyntaxReason::FormatOnMetaKind,
            }
        );
    }

    #[test]
    fn check_rejects_meta_format() {
        assert!(matches!(
            check_type_name("array#date"),
            Err(ApiTypeError::Syntax { reason: SyntaxReason::FormatOnMetaKind, .. })
        ));
    }

    #[test]
    fn parsed_name_is_original_spelling() {
        for text in [
            "integer#int64",
            "string",
            "User",
            "User[]",
            "Obj<integer#int64, string[]>[]",
            "Map<K, Pair<A, B<C, D>>>[][]",
            "string#date-time",
        ] {
            assert_eq!(parse_api_type(text).unwrap().name, text);
        }
    }

    #[test]
    fn check_and_parse_agree() {
        let inputs = [
            "integer", "integer#int64", "integer#", "file", "User", "User[]", "User[][]",
            "Page<Item>", "Page<Item>[]", "Page<Item, >", "Obj<integer#int64, string[]>[]",
            "Map<K, Pair<A, B<C, D>>>", "Obj<A#x>", "integerList<string#x>",
            "", "[]", "array", "object", "array#date", "object<T>", "string<T>", "User#id",
            "Page<Item", "Page<>", "Page<Item>>", "Page<Item><X>", "a b", "Page<Wrap<Item>",
            "string#date time", "Page<Item>x", "<Item>", "#fmt", "Page<array>",
            "User []", "Page<Item> []", "Page<Item>\t[]", "Obj<string []>", "Obj<A, B >[]",
        ];
        for text in inputs {
            assert_eq!(
                check_type_name(text).is_ok(),
                parse_api_type(text).is_ok(),
                "check/parse disagree on `{text}`"
            );
        }
    }

    #[test]
    fn split_generic_arguments_remerges_pieces() {
        assert_eq!(
            split_generic_arguments("T1, T2<T3, T4>"),
            Some(vec!["T1", "T2<T3, T4>"])
        );
        assert_eq!(
            split_generic_arguments("A<B, C<D, E>>, F"),
            Some(vec!["A<B, C<D, E>>", "F"])
        );
        assert_eq!(split_generic_arguments(" , X ,"), Some(vec!["X"]));
        assert_eq!(split_generic_arguments("A, B<C"), None);
        assert_eq!(split_generic_arguments("A>, <B"), Some(vec!["A>, <B"]));
    }

    #[test]
    fn split_generic_arguments_scales_with_many_arguments() {
        let args: Vec<String> = (0..2000).map(|i| format!("T{i}<A, B<C, D>>")).collect();
        let inner = args.join(", ");
        let pieces = split_generic_arguments(&inner).unwrap();
        assert_eq!(pieces.len(), 2000);
        assert_eq!(pieces[1999], "T1999<A, B<C, D>>");
    }
}
