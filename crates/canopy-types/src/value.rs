use serde::{Deserialize, Serialize};

use crate::key::Key;
use crate::scope::Scope;

/// A value stored in a registry.
///
/// Values are arbitrary: scalars, lists, or nested [`Scope`]s (the tree
/// variant descends through `Value::Scope` entries).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// The absent-but-present value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A nested scope.
    Scope(Scope),
}

impl Value {
    /// The native empty-test applied by `is_empty` registry operations.
    ///
    /// Exactly these values are empty: `Null`, `false`, `0`, `0.0`, `""`,
    /// `"0"`, an empty list, and an empty scope. Note that `"0"` is empty
    /// while other non-empty strings (including `"0.0"` and `"false"`) are
    /// not — this mirrors the loose empty-test of the original contract,
    /// not mere falsiness.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty() || s == "0",
            Value::List(items) => items.is_empty(),
            Value::Scope(scope) => scope.is_empty(),
        }
    }

    /// Returns `true` if this value is a nested scope.
    pub fn is_scope(&self) -> bool {
        matches!(self, Value::Scope(_))
    }

    /// The nested scope, if this value is one.
    pub fn as_scope(&self) -> Option<&Scope> {
        match self {
            Value::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    /// Mutable access to the nested scope, if this value is one.
    pub fn as_scope_mut(&mut self) -> Option<&mut Scope> {
        match self {
            Value::Scope(scope) => Some(scope),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Scope> for Value {
    fn from(scope: Scope) -> Self {
        Value::Scope(scope)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Str(s) => Value::Str(s),
            // Non-negative by construction, so the cast cannot wrap for any
            // key a registry accepts through its public surface.
            Key::Int(n) => Value::Int(n as i64),
        }
    }
}
