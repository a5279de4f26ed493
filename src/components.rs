use crate::error::ErrorKind;
use crate::ext::Extendable;
use crate::link::Link;
use crate::media::{Example, RequestBody};
use crate::parameter::{Header, Parameter};
use crate::paths::{Callback, PathItem};
use crate::refs::RefOrSpec;
use crate::response::Response;
use crate::schema::Schema;
use crate::security::SecurityScheme;
use crate::validate::{join_loc, Diagnostic, ValidateSpec, Validator};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// The category segments a local reference identifier may name.
pub const CATEGORIES: &[&str] = &[
    "schemas",
    "responses",
    "parameters",
    "examples",
    "requestBodies",
    "headers",
    "securitySchemes",
    "links",
    "callbacks",
    "pathItems",
];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").expect("valid pattern"));

/// A type storable in one of the [`Components`] collections. The category
/// constant ties the type to the reference identifiers that may point at it.
pub trait Component: Sized {
    const CATEGORY: &'static str;

    fn collection(components: &Components) -> &BTreeMap<String, RefOrSpec<Self>>;
}

macro_rules! impl_component {
    ($ty:ty, $category:literal, $field:ident) => {
        impl Component for $ty {
            const CATEGORY: &'static str = $category;

            fn collection(components: &Components) -> &BTreeMap<String, RefOrSpec<Self>> {
                &components.$field
            }
        }
    };
}

impl_component!(Schema, "schemas", schemas);
impl_component!(Extendable<Response>, "responses", responses);
impl_component!(Extendable<Parameter>, "parameters", parameters);
impl_component!(Extendable<Example>, "examples", examples);
impl_component!(Extendable<RequestBody>, "requestBodies", request_bodies);
impl_component!(Extendable<Header>, "headers", headers);
impl_component!(Extendable<SecurityScheme>, "securitySchemes", security_schemes);
impl_component!(Extendable<Link>, "links", links);
impl_component!(Callback, "callbacks", callbacks);
impl_component!(Extendable<PathItem>, "pathItems", path_items);

/// The shared section holding reusable objects for the rest of the document.
/// Entries have no effect unless something references them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, RefOrSpec<Schema>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, RefOrSpec<Extendable<Response>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, RefOrSpec<Extendable<Parameter>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples: BTreeMap<String, RefOrSpec<Extendable<Example>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub request_bodies: BTreeMap<String, RefOrSpec<Extendable<RequestBody>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, RefOrSpec<Extendable<Header>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, RefOrSpec<Extendable<SecurityScheme>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, RefOrSpec<Extendable<Link>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub callbacks: BTreeMap<String, RefOrSpec<Callback>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path_items: BTreeMap<String, RefOrSpec<Extendable<PathItem>>>,
}

/// One storable value together with its kind, for kind-dispatched insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentEntry {
    Schema(RefOrSpec<Schema>),
    Response(RefOrSpec<Extendable<Response>>),
    Parameter(RefOrSpec<Extendable<Parameter>>),
    Example(RefOrSpec<Extendable<Example>>),
    RequestBody(RefOrSpec<Extendable<RequestBody>>),
    Header(RefOrSpec<Extendable<Header>>),
    SecurityScheme(RefOrSpec<Extendable<SecurityScheme>>),
    Link(RefOrSpec<Extendable<Link>>),
    Callback(RefOrSpec<Callback>),
    PathItem(RefOrSpec<Extendable<PathItem>>),
}

impl Components {
    /// Stores an entry under the collection matching its kind. The entry sum
    /// is closed, so every kind has a defined destination.
    pub fn add(&mut self, name: impl Into<String>, entry: ComponentEntry) -> &mut Self {
        let name = name.into();
        match entry {
            ComponentEntry::Schema(v) => {
                self.schemas.insert(name, v);
            }
            ComponentEntry::Response(v) => {
                self.responses.insert(name, v);
            }
            ComponentEntry::Parameter(v) => {
                self.parameters.insert(name, v);
            }
            ComponentEntry::Example(v) => {
                self.examples.insert(name, v);
            }
            ComponentEntry::RequestBody(v) => {
                self.request_bodies.insert(name, v);
            }
            ComponentEntry::Header(v) => {
                self.headers.insert(name, v);
            }
            ComponentEntry::SecurityScheme(v) => {
                self.security_schemes.insert(name, v);
            }
            ComponentEntry::Link(v) => {
                self.links.insert(name, v);
            }
            ComponentEntry::Callback(v) => {
                self.callbacks.insert(name, v);
            }
            ComponentEntry::PathItem(v) => {
                self.path_items.insert(name, v);
            }
        }
        self
    }
}

/// Checks one components collection: entry names must match the shared name
/// pattern, and each entry is validated at its canonical location unless an
/// earlier reference already covered it.
fn check_collection<T: ValidateSpec + Component>(
    entries: &BTreeMap<String, RefOrSpec<T>>,
    location: &str,
    validator: &mut Validator,
    errs: &mut Vec<Diagnostic>,
) {
    for (name, entry) in entries {
        let loc = join_loc(location, format!("{}/{name}", T::CATEGORY));
        if !NAME_PATTERN.is_match(name) {
            errs.push(Diagnostic::new(
                loc.clone(),
                ErrorKind::InvalidPattern,
                format!("invalid name, must match `{}`", NAME_PATTERN.as_str()),
            ));
        }
        let canonical = format!("#/components/{}/{name}", T::CATEGORY);
        if validator.mark_visited(canonical) {
            errs.extend(entry.validate_spec(&loc, validator));
        }
    }
}

impl ValidateSpec for Components {
    fn validate_spec(&self, location: &str, validator: &mut Validator) -> Vec<Diagnostic> {
        let mut errs = Vec::new();
        check_collection(&self.schemas, location, validator, &mut errs);
        check_collection(&self.responses, location, validator, &mut errs);
        check_collection(&self.parameters, location, validator, &mut errs);
        check_collection(&self.examples, location, validator, &mut errs);
        check_collection(&self.request_bodies, location, validator, &mut errs);
        check_collection(&self.headers, location, validator, &mut errs);
        check_collection(&self.security_schemes, location, validator, &mut errs);
        check_collection(&self.links, location, validator, &mut errs);
        check_collection(&self.callbacks, location, validator, &mut errs);
        check_collection(&self.path_items, location, validator, &mut errs);
        errs
    }
}
