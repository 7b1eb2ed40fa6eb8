//! Venue descriptor tree
//!
//! A descriptor is the declarative configuration of one venue: urls, endpoint
//! lists, capability flags, options and the error-code table. Literals are
//! written as `serde_json` values and validated into a [`Descriptor`] once.

mod merge;

pub use merge::{merge, resolve_chain};

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::errors::{CcxtError, CcxtResult};

/// Descriptor node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
    /// Ordered string sequence (endpoint paths, countries, doc links)
    List(Vec<String>),
    Map(BTreeMap<String, Node>),
}

impl Node {
    /// Validates a JSON value into a node. `path` names the field for error messages.
    fn from_value(value: Value, path: &str) -> CcxtResult<Self> {
        match value {
            Value::Bool(b) => Ok(Node::Bool(b)),
            Value::Number(n) => Ok(Node::Number(n)),
            Value::String(s) => Ok(Node::Str(s)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s),
                    other => Err(CcxtError::malformed(
                        format!("{path}[{i}]"),
                        format!("sequence entries must be strings, found {other}"),
                    )),
                })
                .collect::<CcxtResult<Vec<_>>>()
                .map(Node::List),
            Value::Object(fields) => {
                let mut map = BTreeMap::new();
                for (key, value) in fields {
                    let child = join_path(path, &key);
                    map.insert(key, Node::from_value(value, &child)?);
                }
                Ok(Node::Map(map))
            },
            Value::Null => Err(CcxtError::malformed(path, "null is not a descriptor value")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Node::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the node's shape, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::Str(_) => "string",
            Node::List(_) => "sequence",
            Node::Map(_) => "mapping",
        }
    }
}

pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Validated descriptor tree. The root is always a mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Descriptor {
    root: BTreeMap<String, Node>,
}

impl Descriptor {
    /// 빈 디스크립터 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a JSON literal. The root must be an object, `null` is rejected
    /// anywhere and sequences may only hold strings.
    pub fn from_value(value: Value) -> CcxtResult<Self> {
        match Node::from_value(value, "")? {
            Node::Map(root) => Ok(Self { root }),
            other => Err(CcxtError::malformed(
                "<root>",
                format!("descriptor root must be a mapping, found {}", other.type_name()),
            )),
        }
    }

    pub(crate) fn from_map(root: BTreeMap<String, Node>) -> Self {
        Self { root }
    }

    pub(crate) fn fields(&self) -> &BTreeMap<String, Node> {
        &self.root
    }

    /// Looks up a nested field by its segments.
    pub fn lookup(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(*first)?;
        for key in rest {
            node = node.as_map()?.get(*key)?;
        }
        Some(node)
    }

    /// Looks up a nested field by dotted path (`"has.fetchCurrencies"`).
    pub fn get(&self, path: &str) -> Option<&Node> {
        let segments: Vec<&str> = path.split('.').collect();
        self.lookup(&segments)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Node::as_str)
    }

    pub fn get_map(&self, path: &str) -> Option<&BTreeMap<String, Node>> {
        self.get(path).and_then(Node::as_map)
    }

    // === Well-known fields ===

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn hostname(&self) -> Option<&str> {
        self.get_str("hostname")
    }

    pub fn version(&self) -> Option<&str> {
        self.get_str("version")
    }

    pub fn countries(&self) -> Vec<String> {
        self.get("countries")
            .and_then(Node::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// Capability flag from `has`. `true` and string values such as
    /// `"emulated"` read as supported; `false`, `"false"`, empty strings and
    /// absent flags as unsupported.
    pub fn has(&self, capability: &str) -> bool {
        match self.lookup(&["has", capability]) {
            Some(Node::Bool(flag)) => *flag,
            Some(Node::Str(value)) => !value.is_empty() && value != "false",
            _ => false,
        }
    }

    /// String option from `options`
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.lookup(&["options", key]).and_then(Node::as_str)
    }

    /// Canonical name for a venue ticker, falling back to the ticker itself.
    pub fn common_currency_code(&self, code: &str) -> String {
        self.lookup(&["commonCurrencies", code])
            .and_then(Node::as_str)
            .unwrap_or(code)
            .to_string()
    }

    /// Descriptor as a JSON value, for diagnostics
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl TryFrom<Value> for Descriptor {
    type Error = CcxtError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Descriptor::from_value(value)
    }
}
