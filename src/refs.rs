use crate::components::{Component, Components, CATEGORIES};
use crate::error::ResolveError;
use crate::ext::Extendable;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix every locally resolvable reference identifier must carry.
pub const COMPONENTS_PREFIX: &str = "#/components/";

/// A pointer into the shared `components` section, with optional overriding
/// summary and description text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    #[serde(rename = "$ref")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Ref {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            summary: None,
            description: None,
        }
    }
}

/// Holds either a named reference into the shared section or an inline value.
///
/// Decoding commits to the `Ref` variant whenever the raw input carries a
/// non-empty `$ref` field; only then is the inline shape never attempted.
/// Encoding emits the chosen variant's fields directly, without a wrapper tag,
/// so the reference-vs-inline choice survives a round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOrSpec<T> {
    Ref(Ref),
    Spec(Box<T>),
}

impl<T> RefOrSpec<T> {
    pub fn spec(value: T) -> Self {
        RefOrSpec::Spec(Box::new(value))
    }

    pub fn reference(reference: impl Into<String>) -> Self {
        RefOrSpec::Ref(Ref::new(reference))
    }

    pub fn as_ref_name(&self) -> Option<&str> {
        match self {
            RefOrSpec::Ref(r) => Some(&r.reference),
            RefOrSpec::Spec(_) => None,
        }
    }

    pub fn as_spec(&self) -> Option<&T> {
        match self {
            RefOrSpec::Ref(_) => None,
            RefOrSpec::Spec(spec) => Some(spec),
        }
    }

    /// The reference identifier if this is a reference, otherwise the given
    /// location of the inline value. Used to address the governing schema
    /// when validating example data.
    pub(crate) fn location_or_ref(&self, location: &str) -> String {
        match self {
            RefOrSpec::Ref(r) => r.reference.clone(),
            RefOrSpec::Spec(_) => location.to_string(),
        }
    }
}

impl<T> From<T> for RefOrSpec<T> {
    fn from(value: T) -> Self {
        RefOrSpec::spec(value)
    }
}

impl<T: Component> RefOrSpec<T> {
    /// Resolves this container to its inline value, following references
    /// through the shared section.
    ///
    /// An inline value is returned immediately. A reference is split into
    /// `(category, name)`, looked up in the matching components collection,
    /// and followed again if the entry is itself a reference. Each hop
    /// consumes one distinct identifier from the visited chain, so resolution
    /// always terminates, reporting a [`ResolveError::CycleDetected`] instead
    /// of looping.
    pub fn resolve<'a>(
        &'a self,
        components: Option<&'a Extendable<Components>>,
    ) -> Result<&'a T, ResolveError> {
        let mut visited = Vec::new();
        self.resolve_with(components, &mut visited)
    }

    pub(crate) fn resolve_with<'a>(
        &'a self,
        components: Option<&'a Extendable<Components>>,
        visited: &mut Vec<String>,
    ) -> Result<&'a T, ResolveError> {
        let reference = match self {
            RefOrSpec::Spec(spec) => return Ok(spec),
            RefOrSpec::Ref(r) => r.reference.as_str(),
        };
        if reference.is_empty() {
            return Err(ResolveError::NilReference);
        }
        if visited.iter().any(|v| v == reference) {
            return Err(ResolveError::CycleDetected {
                reference: reference.to_string(),
                chain: visited.join(" -> "),
            });
        }
        let Some(rest) = reference.strip_prefix(COMPONENTS_PREFIX) else {
            return Err(ResolveError::UnsupportedRemoteReference {
                reference: reference.to_string(),
            });
        };
        let Some(components) = components else {
            return Err(ResolveError::ComponentsRequired {
                reference: reference.to_string(),
            });
        };
        visited.push(reference.to_string());
        log::debug!("resolving reference '{reference}'");

        let Some((category, name)) = rest.split_once('/') else {
            return Err(ResolveError::NotFound {
                reference: reference.to_string(),
            });
        };
        if category != T::CATEGORY {
            if CATEGORIES.contains(&category) {
                return Err(ResolveError::TypeMismatch {
                    reference: reference.to_string(),
                    expected: T::CATEGORY,
                    found: category.to_string(),
                });
            }
            return Err(ResolveError::NotFound {
                reference: reference.to_string(),
            });
        }
        match T::collection(&components.spec).get(name) {
            Some(entry) => entry.resolve_with(Some(components), visited),
            None => Err(ResolveError::NotFound {
                reference: reference.to_string(),
            }),
        }
    }
}

impl<T: Serialize> Serialize for RefOrSpec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RefOrSpec::Ref(r) => r.serialize(serializer),
            RefOrSpec::Spec(spec) => spec.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RefOrSpec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Two-phase attempt-and-commit: decode into a neutral value first so
        // a rejected reference shape leaves no partial state behind.
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_ref = value
            .get("$ref")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|r| !r.is_empty());
        if is_ref {
            let r: Ref = serde_json::from_value(value).map_err(de::Error::custom)?;
            return Ok(RefOrSpec::Ref(r));
        }
        let spec: T = serde_json::from_value(value).map_err(de::Error::custom)?;
        Ok(RefOrSpec::Spec(Box::new(spec)))
    }
}
