use crate::refs::RefOrSpec;
use crate::schema::Schema;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Deref, DerefMut};

/// Holds either a boolean flag or a nested schema, never both.
///
/// A literal `false` is semantically distinct from an absent value, so this
/// type must be wrapped in `Option` by its owner rather than defaulted.
/// The presence of a nested schema implies the flag would be `true`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolOrSchema {
    Allowed(bool),
    Schema(Box<RefOrSpec<Schema>>),
}

impl BoolOrSchema {
    pub fn is_allowed(&self) -> bool {
        match self {
            BoolOrSchema::Allowed(allowed) => *allowed,
            BoolOrSchema::Schema(_) => true,
        }
    }

    pub fn schema(&self) -> Option<&RefOrSpec<Schema>> {
        match self {
            BoolOrSchema::Allowed(_) => None,
            BoolOrSchema::Schema(schema) => Some(schema),
        }
    }
}

impl From<bool> for BoolOrSchema {
    fn from(allowed: bool) -> Self {
        BoolOrSchema::Allowed(allowed)
    }
}

impl From<RefOrSpec<Schema>> for BoolOrSchema {
    fn from(schema: RefOrSpec<Schema>) -> Self {
        BoolOrSchema::Schema(Box::new(schema))
    }
}

impl Serialize for BoolOrSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BoolOrSchema::Allowed(allowed) => serializer.serialize_bool(*allowed),
            BoolOrSchema::Schema(schema) => schema.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for BoolOrSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if let serde_json::Value::Bool(allowed) = value {
            return Ok(BoolOrSchema::Allowed(allowed));
        }
        let schema: RefOrSpec<Schema> =
            serde_json::from_value(value).map_err(de::Error::custom)?;
        Ok(BoolOrSchema::Schema(Box::new(schema)))
    }
}

/// Holds one or many values of the same kind.
///
/// A single element encodes as a bare scalar rather than a one-element
/// sequence; an empty collection stays a sequence. Both input shapes decode
/// into the same internal representation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SingleOrArray<T>(Vec<T>);

impl<T> SingleOrArray<T> {
    pub fn new() -> Self {
        SingleOrArray(Vec::new())
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<T> for SingleOrArray<T> {
    fn from(value: T) -> Self {
        SingleOrArray(vec![value])
    }
}

impl<T> From<Vec<T>> for SingleOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        SingleOrArray(values)
    }
}

impl<T> Deref for SingleOrArray<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for SingleOrArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Serialize> Serialize for SingleOrArray<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.len() == 1 {
            self.0[0].serialize(serializer)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for SingleOrArray<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_array() {
            let values: Vec<T> = serde_json::from_value(value).map_err(de::Error::custom)?;
            return Ok(SingleOrArray(values));
        }
        let single: T = serde_json::from_value(value).map_err(de::Error::custom)?;
        Ok(SingleOrArray(vec![single]))
    }
}
