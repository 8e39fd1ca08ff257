use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::key::Key;
use crate::value::Value;

/// An insertion-ordered `Key → Value` mapping.
///
/// This is the structure every registry operates over, at every nesting
/// level. Iteration yields entries in insertion order; overwriting an
/// existing key keeps its position; removing an entry preserves the order
/// of the rest.
///
/// Keys are unique. Lookups are linear scans — scopes hold configuration,
/// not bulk data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scope {
    entries: Vec<(Key, Value)>,
}

impl Scope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the scope has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is present, regardless of its value.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// The value at `key`, if present.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Mutable access to the value at `key`, if present.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Insert or overwrite. Returns the displaced value, if any.
    ///
    /// An overwritten key keeps its original position; a new key is
    /// appended.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        for (k, v) in self.entries.iter_mut() {
            if *k == key {
                return Some(std::mem::replace(v, value));
            }
        }
        self.entries.push((key, value));
        None
    }

    /// Remove the entry at `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterate over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl FromIterator<(Key, Value)> for Scope {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (key, value) in iter {
            scope.insert(key, value);
        }
        scope
    }
}

impl Extend<(Key, Value)> for Scope {
    fn extend<I: IntoIterator<Item = (Key, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Scope {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Scope {
    type Item = (&'a Key, &'a Value);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (Key, Value)>,
        fn(&'a (Key, Value)) -> (&'a Key, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        fn entry_refs(entry: &(Key, Value)) -> (&Key, &Value) {
            (&entry.0, &entry.1)
        }
        self.entries.iter().map(entry_refs)
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ScopeVisitor;

impl<'de> Visitor<'de> for ScopeVisitor {
    type Value = Scope;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of registry keys to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Scope, A::Error> {
        let mut scope = Scope::new();
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            scope.insert(key, value);
        }
        Ok(scope)
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ScopeVisitor)
    }
}

/// Build a [`Scope`] literal.
///
/// Keys and values go through [`Key::from`] and [`Value::from`], so plain
/// literals work for both, and nesting is just another `scope!`:
///
/// ```
/// use canopy_types::scope;
///
/// let s = scope! {
///     "key_1" => "value_1",
///     "key_2" => scope! { "key_2_1" => "value_2_1" },
/// };
/// assert_eq!(s.len(), 2);
/// ```
#[macro_export]
macro_rules! scope {
    () => { $crate::Scope::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut scope = $crate::Scope::new();
        $(
            scope.insert($crate::Key::from($key), $crate::Value::from($value));
        )+
        scope
    }};
}
