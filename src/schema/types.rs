use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Generic attribute map as consumed by the host engine
pub type AttributeMap = BTreeMap<String, AttributeValue>;

/// Element type of a scalar, list or map attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    String,
    Float,
}

/// Declared type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Scalar(ScalarType),
    List(ScalarType),
    Map(ScalarType),
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::Bool => write!(f, "bool"),
            ScalarType::String => write!(f, "string"),
            ScalarType::Float => write!(f, "float"),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Scalar(s) => write!(f, "{}", s),
            AttributeType::List(s) => write!(f, "list<{}>", s),
            AttributeType::Map(s) => write!(f, "map<string,{}>", s),
        }
    }
}

/// Declaration of one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    pub kind: AttributeType,
    /// Must be supplied by the configuration
    pub required: bool,
    /// Filled in by the read
    pub computed: bool,
}

impl AttributeSchema {
    pub fn required(kind: AttributeType) -> Self {
        Self {
            kind,
            required: true,
            computed: false,
        }
    }

    pub fn computed(kind: AttributeType) -> Self {
        Self {
            kind,
            required: false,
            computed: true,
        }
    }
}

/// Attribute declarations of a data source, keyed by attribute name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: BTreeMap<&'static str, AttributeSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, name: &'static str, schema: AttributeSchema) -> Self {
        self.attributes.insert(name, schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttributeSchema)> {
        self.attributes.iter().map(|(name, schema)| (*name, schema))
    }

    pub fn required_attributes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter()
            .filter(|(_, schema)| schema.required)
            .map(|(name, _)| name)
    }
}

/// A loosely typed attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Float(f64),
    String(String),
    List(Vec<AttributeValue>),
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// Short name of the value's shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::List(_) => "list",
            AttributeValue::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn is_scalar(&self, expected: ScalarType) -> bool {
        matches!(
            (self, expected),
            (AttributeValue::Bool(_), ScalarType::Bool)
                | (AttributeValue::Float(_), ScalarType::Float)
                | (AttributeValue::String(_), ScalarType::String)
        )
    }

    /// Check the value against a declared type
    pub(crate) fn check(&self, key: &str, expected: AttributeType) -> Result<(), AttributeError> {
        let mismatch = || AttributeError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: self.kind_name(),
        };

        match (self, expected) {
            (value, AttributeType::Scalar(scalar)) => {
                if value.is_scalar(scalar) {
                    Ok(())
                } else {
                    Err(mismatch())
                }
            }
            (AttributeValue::List(items), AttributeType::List(element)) => {
                match items.iter().position(|item| !item.is_scalar(element)) {
                    Some(index) => Err(AttributeError::ElementTypeMismatch {
                        key: key.to_string(),
                        index: index.to_string(),
                        expected: element,
                    }),
                    None => Ok(()),
                }
            }
            (AttributeValue::Map(entries), AttributeType::Map(element)) => {
                match entries.iter().find(|(_, item)| !item.is_scalar(element)) {
                    Some((entry_key, _)) => Err(AttributeError::ElementTypeMismatch {
                        key: key.to_string(),
                        index: entry_key.clone(),
                        expected: element,
                    }),
                    None => Ok(()),
                }
            }
            _ => Err(mismatch()),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        AttributeValue::List(values.into_iter().map(AttributeValue::String).collect())
    }
}

impl From<BTreeMap<String, String>> for AttributeValue {
    fn from(values: BTreeMap<String, String>) -> Self {
        AttributeValue::Map(
            values
                .into_iter()
                .map(|(k, v)| (k, AttributeValue::String(v)))
                .collect(),
        )
    }
}

/// Failures writing to or reading from a [`ResourceData`](super::ResourceData)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),

    #[error("attribute {key:?} expects {expected}, got {found}")]
    TypeMismatch {
        key: String,
        expected: AttributeType,
        found: &'static str,
    },

    #[error("attribute {key:?} element {index} is not a {expected}")]
    ElementTypeMismatch {
        key: String,
        index: String,
        expected: ScalarType,
    },

    #[error("attribute {0:?} is not computed and cannot be set by a read")]
    NotComputed(String),

    #[error("attribute {0:?} is computed and cannot be supplied as input")]
    NotInput(String),

    #[error("required attribute {0:?} is missing")]
    MissingRequired(String),
}
