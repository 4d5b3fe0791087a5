//! Document model: the flat, builder-style description of an API that feeds
//! type strings and templates into expansion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::definition::{ConcreteDefinition, Definition};
use crate::error::Result;
use crate::expand::expand_all;
use crate::grammar::check_type_name;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub host: String,
    pub base_path: String,
    pub info: Option<Info>,
    pub option: Option<DocumentOption>,
    pub operations: Vec<Operation>,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Info {
    pub title: String,
    pub desc: String,
    pub version: String,
    pub terms_of_service: String,
    pub license: Option<License>,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub url: String,
    pub email: String,
}

/// Document-wide extras: transport lists, tags, security schemes, and
/// blueprint-only notes. Nothing here carries a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentOption {
    pub schemes: Vec<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub tags: Vec<Tag>,
    pub securities: Vec<Security>,
    pub external_docs: Option<ExternalDocs>,
    /// API Blueprint only.
    pub additional_doc: String,
    /// API Blueprint only. Route to alias.
    pub routes_aliases: IndexMap<String, String>,
    /// API Blueprint only. Route to extra markdown.
    pub routes_additional_docs: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    pub name: String,
    pub desc: String,
    pub external_docs: Option<ExternalDocs>,
}

pub const APIKEY: &str = "apiKey";
pub const BASIC: &str = "basic";
pub const OAUTH2: &str = "oauth2";

/// A security scheme. `in_loc`/`name` apply to `apiKey`; `flow`, the urls
/// and `scopes` apply to `oauth2`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Security {
    pub title: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub desc: String,
    #[serde(rename = "in")]
    pub in_loc: String,
    pub name: String,
    pub flow: String,
    pub authorization_url: String,
    pub token_url: String,
    pub scopes: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalDocs {
    pub desc: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    pub method: String,
    pub route: String,
    pub summary: String,
    pub desc: String,
    pub tags: Vec<String>,
    pub params: Vec<Param>,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Param {
    pub name: String,
    /// path, query, header, body or formData
    #[serde(rename = "in")]
    pub in_loc: String,
    #[serde(rename = "type")]
    pub typ: String,
    pub required: bool,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    pub code: u16,
    /// Empty for responses without a body.
    #[serde(rename = "type")]
    pub typ: String,
    pub desc: String,
}

impl Document {
    pub fn new(
        host: impl Into<String>,
        base_path: impl Into<String>,
        info: Option<Info>,
    ) -> Self {
        Self {
            host: host.into(),
            base_path: base_path.into(),
            info,
            ..Self::default()
        }
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }

    pub fn option(mut self, option: DocumentOption) -> Self {
        self.option = Some(option);
        self
    }

    pub fn operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    pub fn add_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations.extend(operations);
        self
    }

    pub fn definitions(mut self, definitions: Vec<Definition>) -> Self {
        self.definitions = definitions;
        self
    }

    pub fn add_definitions(mut self, definitions: Vec<Definition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Reset every field, keeping the value usable for a fresh build.
    pub fn cleanup(&mut self) -> &mut Self {
        *self = Self::default();
        self
    }

    /// Type strings used outside templates, in document order: parameter
    /// types, non-empty response types, then plain definitions' properties.
    pub fn referenced_types(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for op in &self.operations {
            out.extend(op.params.iter().map(|p| p.typ.as_str()));
            out.extend(
                op.responses
                    .iter()
                    .map(|r| r.typ.as_str())
                    .filter(|t| !t.trim().is_empty()),
            );
        }
        for def in self.definitions.iter().filter(|d| !d.is_template()) {
            out.extend(def.properties.iter().map(|p| p.typ.as_str()));
        }
        out
    }

    /// Syntax-check every type string in the document, templates included.
    pub fn check_types(&self) -> Result<()> {
        for typ in self.referenced_types() {
            check_type_name(typ)?;
        }
        for def in self.definitions.iter().filter(|d| d.is_template()) {
            for prop in &def.properties {
                check_type_name(&prop.typ)?;
            }
        }
        Ok(())
    }

    pub fn expand_definitions(&self) -> Result<Vec<ConcreteDefinition>> {
        self.check_types()?;
        expand_all(&self.definitions, self.referenced_types())
    }
}

impl Info {
    pub fn new(
        title: impl Into<String>,
        desc: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            desc: desc.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn terms_of_service(mut self, terms: impl Into<String>) -> Self {
        self.terms_of_service = terms.into();
        self
    }

    pub fn license(mut self, license: License) -> Self {
        self.license = Some(license);
        self
    }

    pub fn contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }
}

impl License {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { name: name.into(), url: url.into() }
    }
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), url: url.into(), email: email.into() }
    }
}

fn strings<I, S>(items: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into)
}

impl DocumentOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes = strings(schemes).collect();
        self
    }

    pub fn add_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemes.extend(strings(schemes));
        self
    }

    pub fn consumes<I, S>(mut self, consumes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes = strings(consumes).collect();
        self
    }

    pub fn add_consumes<I, S>(mut self, consumes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes.extend(strings(consumes));
        self
    }

    pub fn produces<I, S>(mut self, produces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces = strings(produces).collect();
        self
    }

    pub fn add_produces<I, S>(mut self, produces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces.extend(strings(produces));
        self
    }

    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn add_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn securities(mut self, securities: Vec<Security>) -> Self {
        self.securities = securities;
        self
    }

    pub fn add_securities(mut self, securities: Vec<Security>) -> Self {
        self.securities.extend(securities);
        self
    }

    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }

    pub fn additional_doc(mut self, doc: impl Into<String>) -> Self {
        self.additional_doc = doc.into();
        self
    }

    pub fn routes_aliases(mut self, aliases: IndexMap<String, String>) -> Self {
        self.routes_aliases = aliases;
        self
    }

    /// Replaces any alias already set for `route`.
    pub fn add_routes_alias(mut self, route: impl Into<String>, alias: impl Into<String>) -> Self {
        self.routes_aliases.insert(route.into(), alias.into());
        self
    }

    pub fn routes_additional_docs(mut self, docs: IndexMap<String, String>) -> Self {
        self.routes_additional_docs = docs;
        self
    }

    pub fn add_routes_additional_doc(
        mut self,
        route: impl Into<String>,
        doc: impl Into<String>,
    ) -> Self {
        self.routes_additional_docs.insert(route.into(), doc.into());
        self
    }
}

impl Tag {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self { name: name.into(), desc: desc.into(), external_docs: None }
    }

    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }
}

impl Security {
    pub fn new(title: impl Into<String>, typ: impl Into<String>) -> Self {
        Self { title: title.into(), typ: typ.into(), ..Self::default() }
    }

    pub fn api_key(
        title: impl Into<String>,
        in_loc: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(title, APIKEY).in_loc(in_loc).name(name)
    }

    pub fn basic(title: impl Into<String>) -> Self {
        Self::new(title, BASIC)
    }

    pub fn oauth2(title: impl Into<String>, flow: impl Into<String>) -> Self {
        Self::new(title, OAUTH2).flow(flow)
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn in_loc(mut self, in_loc: impl Into<String>) -> Self {
        self.in_loc = in_loc.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn flow(mut self, flow: impl Into<String>) -> Self {
        self.flow = flow.into();
        self
    }

    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = url.into();
        self
    }

    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn scopes(mut self, scopes: IndexMap<String, String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn add_scope(mut self, scope: impl Into<String>, desc: impl Into<String>) -> Self {
        self.scopes.insert(scope.into(), desc.into());
        self
    }
}

impl ExternalDocs {
    pub fn new(desc: impl Into<String>, url: impl Into<String>) -> Self {
        Self { desc: desc.into(), url: url.into() }
    }
}

impl Operation {
    pub fn new(
        method: impl Into<String>,
        route: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            route: route.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    pub fn responses(mut self, responses: Vec<Response>) -> Self {
        self.responses = responses;
        self
    }
}

impl Param {
    pub fn new(
        name: impl Into<String>,
        in_loc: impl Into<String>,
        typ: impl Into<String>,
        required: bool,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            in_loc: in_loc.into(),
            typ: typ.into(),
            required,
            desc: desc.into(),
        }
    }
}

impl Response {
    pub fn new(code: u16, typ: impl Into<String>, desc: impl Into<String>) -> Self {
        Self { code, typ: typ.into(), desc: desc.into() }
    }
}
