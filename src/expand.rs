//! Generic template expansion.
//!
//! Templates are first *prehandled*: cloned, their parameter list
//! de-duplicated and validated, and every parameter occurrence in a property
//! type rewritten to a placeholder token (`T` -> `«T»`). Expansion then walks
//! the referenced type strings, instantiates every `Name<Args..>` it meets by
//! plain substring replacement of placeholders, and registers instantiations
//! after everything their properties depend on.

use std::collections::{HashMap, HashSet};

use crate::definition::{ConcreteDefinition, Definition, Property};
use crate::error::{ApiTypeError, Result};
use crate::grammar::{is_identifier, parse_api_type};
use crate::registry::DefinitionRegistry;
use crate::tokens::substitute_words;

/// Wrap a generic parameter name in sentinels no ASCII type name contains.
pub fn placeholder(param: &str) -> String {
    format!("«{param}»")
}

pub fn is_placeholder(s: &str) -> bool {
    s.len() > "«»".len() && s.starts_with('«') && s.ends_with('»')
}

/// Private working copy of a template. `params` holds placeholder tokens and
/// property types refer to them instead of the bare parameter names.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTemplate {
    pub name: String,
    pub desc: String,
    pub params: Vec<String>,
    pub properties: Vec<Property>,
}

pub fn prehandle_template(template: &Definition) -> Result<PreparedTemplate> {
    let mut params: Vec<&str> = Vec::with_capacity(template.generics.len());
    for ident in &template.generics {
        if params.contains(&ident.as_str()) {
            continue;
        }
        if !is_identifier(ident) {
            return Err(ApiTypeError::InvalidIdentifier {
                definition: template.name.clone(),
                ident: ident.clone(),
            });
        }
        params.push(ident);
    }

    let placeholders: HashMap<&str, String> = params.iter().map(|p| (*p, placeholder(p))).collect();
    let properties = template
        .properties
        .iter()
        .map(|prop| Property {
            typ: substitute_words(&prop.typ, |word| placeholders.get(word).map(String::as_str)),
            ..prop.clone()
        })
        .collect();

    Ok(PreparedTemplate {
        name: template.name.clone(),
        desc: template.desc.clone(),
        params: params.iter().map(|p| placeholder(p)).collect(),
        properties,
    })
}

/// One expansion run: owns its registry and template table.
#[derive(Debug)]
pub struct Expander {
    templates: HashMap<String, PreparedTemplate>,
    registry: DefinitionRegistry,
    in_progress: HashSet<String>,
}

impl Expander {
    /// Prehandle templates and register plain definitions in input order.
    pub fn new(definitions: &[Definition]) -> Result<Self> {
        let mut templates = HashMap::new();
        let mut registry = DefinitionRegistry::with_capacity(definitions.len());
        for def in definitions {
            if def.is_template() {
                templates.insert(def.name.clone(), prehandle_template(def)?);
            } else {
                registry.set(ConcreteDefinition::from(def));
            }
        }
        Ok(Self { templates, registry, in_progress: HashSet::new() })
    }

    pub fn template(&self, name: &str) -> Option<&PreparedTemplate> {
        self.templates.get(name)
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// Instantiate whatever generic object `typ` refers to, recursively.
    pub fn extract(&mut self, typ: &str) -> Result<()> {
        let parsed = parse_api_type(typ)?;
        let Some((name, args)) = parsed.element().as_object() else {
            return Ok(());
        };
        if args.is_empty() {
            return Ok(());
        }

        let template = self.templates.get(name).ok_or_else(|| ApiTypeError::UnresolvedGeneric {
            typ: typ.to_string(),
            name: name.to_string(),
        })?;
        if args.len() != template.params.len() {
            return Err(ApiTypeError::ArityMismatch {
                typ: typ.to_string(),
                name: name.to_string(),
                expected: template.params.len(),
                found: args.len(),
            });
        }

        let arg_names: Vec<&str> = args.iter().map(|a| a.name.as_str()).collect();
        let display = format!("{}<{}>", template.name, arg_names.join(", "));
        if self.registry.contains(&display) || self.in_progress.contains(&display) {
            return Ok(());
        }

        let properties = template
            .properties
            .iter()
            .map(|prop| {
                let mut typ = prop.typ.clone();
                for (param, arg) in template.params.iter().zip(&arg_names) {
                    typ = typ.replace(param.as_str(), arg);
                }
                Property { typ, ..prop.clone() }
            })
            .collect::<Vec<_>>();
        let definition = ConcreteDefinition {
            name: display.clone(),
            desc: template.desc.clone(),
            properties,
        };

        // dependencies first, so they precede this instantiation in the output
        self.in_progress.insert(display.clone());
        for prop in &definition.properties {
            if !self.registry.contains(&prop.typ) {
                self.extract(&prop.typ)?;
            }
        }
        self.in_progress.remove(&display);

        self.registry.insert_if_absent(definition);
        Ok(())
    }

    pub fn finish(self) -> Vec<ConcreteDefinition> {
        self.registry.into_definitions()
    }
}

/// Expand `definitions` against every type string the document references.
///
/// Output: plain definitions in input order, interleaved with instantiations
/// in the order they were first completed.
pub fn expand_all<I, S>(definitions: &[Definition], types: I) -> Result<Vec<ConcreteDefinition>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut expander = Expander::new(definitions)?;
    for typ in types {
        expander.extract(typ.as_ref())?;
    }
    Ok(expander.finish())
}
