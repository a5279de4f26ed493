use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wraps an object together with its free-form `x-*` vendor extensions.
///
/// Extension names are conventionally prefixed with `x-`, but the container
/// does not enforce the prefix; any key the inner object does not claim is
/// kept in the side map and survives a round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extendable<T> {
    #[serde(flatten)]
    pub spec: T,
    #[serde(flatten)]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl<T> Extendable<T> {
    pub fn new(spec: T) -> Self {
        Self {
            spec,
            extensions: BTreeMap::new(),
        }
    }

    /// Merges a single extension into the side map, replacing any previous
    /// value under the same name.
    pub fn add_ext(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> &mut Self {
        self.extensions.insert(name.into(), value.into());
        self
    }
}

impl<T: Eq> Eq for Extendable<T> {}

impl<T: Default> Default for Extendable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Extendable<T> {
    fn from(spec: T) -> Self {
        Self::new(spec)
    }
}

pub(crate) fn is_false(v: &bool) -> bool {
    !*v
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Default, Serialize, Deserialize)]
    struct Inner {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    }

    #[test]
    fn unknown_keys_land_in_extensions() {
        let data = serde_json::json!({"title": "foo", "x-b": "bar"});
        let v: Extendable<Inner> = serde_json::from_value(data.clone()).unwrap();
        assert_eq!(v.spec.title.as_deref(), Some("foo"));
        assert_eq!(v.extensions["x-b"], "bar");
        assert_eq!(serde_json::to_value(&v).unwrap(), data);
    }

    #[test]
    fn add_ext_does_not_enforce_prefix() {
        let mut v = Extendable::new(Inner::default());
        v.add_ext("foo", 42);
        v.add_ext("x-foo", 43);
        assert_eq!(v.extensions["foo"], 42);
        assert_eq!(v.extensions["x-foo"], 43);
    }
}
