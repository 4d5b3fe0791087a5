//! Definitions as supplied by callers and as produced by expansion.
//!
//! A [`Definition`] with a non-empty `generics` list is a template; one
//! without is a plain definition and passes through expansion unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A property of a definition. `typ` is a raw type expression; inside a
/// template it may name the template's generic parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub required: bool,
    pub desc: String,
    pub allow_empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        typ: impl Into<String>,
        required: bool,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            typ: typ.into(),
            required,
            desc: desc.into(),
            ..Self::default()
        }
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn example(mut self, value: impl Into<Value>) -> Self {
        self.example = Some(value.into());
        self
    }

    pub fn enums<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.enums = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn length(mut self, min: u64, max: u64) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.minimum = Some(min);
        self.maximum = Some(max);
        self
    }
}

/// A caller-owned definition: a template when `generics` is non-empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Definition {
    pub name: String,
    pub desc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<String>,
    pub properties: Vec<Property>,
}

impl Definition {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }

    pub fn generics<I, S>(mut self, generics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generics = generics.into_iter().map(Into::into).collect();
        self
    }

    pub fn properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    pub fn add_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn is_template(&self) -> bool {
        !self.generics.is_empty()
    }
}

/// Expansion output: no generic parameters remain. `name` is either a plain
/// name or an instantiation such as `Page<Item>`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteDefinition {
    pub name: String,
    pub desc: String,
    pub properties: Vec<Property>,
}

impl ConcreteDefinition {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl From<&Definition> for ConcreteDefinition {
    fn from(def: &Definition) -> Self {
        Self {
            name: def.name.clone(),
            desc: def.desc.clone(),
            properties: def.properties.clone(),
        }
    }
}

/// Human-readable listing used by the CLI.
impl fmt::Display for ConcreteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.desc.is_empty() {
            write!(f, " -- {}", self.desc)?;
        }
        for prop in &self.properties {
            write!(f, "\n  {}: {}", prop.name, prop.typ)?;
            if prop.required {
                f.write_str(" (required)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_with_defaults() {
        let def: Definition = serde_json::from_value(json!({
            "name": "Page",
            "generics": ["T"],
            "properties": [
                { "name": "items", "type": "T[]", "required": true },
                { "name": "total", "type": "integer", "minimum": 0, "enum": [1, 2] }
            ]
        }))
        .unwrap();
        assert!(def.is_template());
        assert_eq!(def.desc, "");
        assert_eq!(def.properties[0].typ, "T[]");
        assert!(def.properties[0].required);
        assert_eq!(def.properties[1].minimum, Some(0));
        assert_eq!(def.properties[1].enums, vec![json!(1), json!(2)]);
        assert!(!def.properties[1].allow_empty);
    }

    #[test]
    fn builder_sets_metadata() {
        let prop = Property::new("status", "string", true, "state")
            .allow_empty(true)
            .enums(["on", "off"])
            .default_value("on")
            .length(1, 3);
        assert!(prop.allow_empty);
        assert_eq!(prop.enums, vec![json!("on"), json!("off")]);
        assert_eq!(prop.default, Some(json!("on")));
        assert_eq!((prop.min_length, prop.max_length), (Some(1), Some(3)));
    }

    #[test]
    fn display_lists_properties() {
        let def = ConcreteDefinition {
            name: "Page<Item>".into(),
            desc: "".into(),
            properties: vec![
                Property::new("items", "Item[]", true, ""),
                Property::new("next", "string", false, ""),
            ],
        };
        assert_eq!(def.to_string(), "Page<Item>\n  items: Item[] (required)\n  next: string");
    }
}
