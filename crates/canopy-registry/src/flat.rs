//! The flat registry: one scope, one namespace.
//!
//! Also home to the shared per-level operation bodies. The tree variant
//! resolves a path down to a terminal scope and then runs these exact
//! functions, so both variants behave identically at the final level.

use canopy_types::{Key, Options, Scope, Value};
use tracing::warn;

use crate::error::{MissingKeyPolicy, RegistryError, Result};
use crate::traits::Registry;

/// A registry over a single flat scope.
///
/// Every operation is a direct wrapper over the underlying [`Scope`]; flat
/// keys are never split on the delimiter, so a key containing `/` is just a
/// key.
#[derive(Clone, Debug, Default)]
pub struct FlatRegistry {
    scope: Scope,
    options: Options,
}

impl FlatRegistry {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `scope` and default options.
    pub fn from_scope(scope: Scope) -> Self {
        Self {
            scope,
            options: Options::default(),
        }
    }

    /// Create a registry seeded with `scope` and explicit options.
    pub fn with_options(scope: Scope, options: Options) -> Self {
        Self { scope, options }
    }
}

impl Registry for FlatRegistry {
    fn set(&mut self, key: Key, value: Value) -> Result<()> {
        self.scope.insert(key, value);
        Ok(())
    }

    fn exists(&mut self, key: &Key) -> Result<bool> {
        Ok(self.scope.contains_key(key))
    }

    fn is_empty(&mut self, key: &Key) -> Result<bool> {
        Ok(is_empty_in(&self.scope, key))
    }

    fn get(
        &mut self,
        key: &Key,
        default: Option<Value>,
        on_missing: MissingKeyPolicy,
    ) -> Result<Option<Value>> {
        get_in(&self.scope, key, default, on_missing, &key.to_string())
    }

    fn delete(&mut self, key: &Key) -> Result<()> {
        self.scope.remove(key);
        Ok(())
    }

    fn override_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn branch(&mut self, key: &Key, options: Option<Options>) -> Result<Self> {
        let options = options.unwrap_or_else(|| self.options.clone());
        branch_in(&self.scope, key, key)
            .map(|scope| Self::with_options(scope, options))
    }
}

// ---------------------------------------------------------------------------
// Shared per-level operation bodies
// ---------------------------------------------------------------------------

/// `get` against one scope level. `reported` is the key name used in the
/// missing-key message — the full original path for tree registries.
pub(crate) fn get_in(
    scope: &Scope,
    key: &Key,
    default: Option<Value>,
    on_missing: MissingKeyPolicy,
    reported: &str,
) -> Result<Option<Value>> {
    if let Some(value) = scope.get(key) {
        return Ok(Some(value.clone()));
    }
    if let Some(default) = default {
        return Ok(Some(default));
    }
    missing(reported, on_missing)
}

/// The missing-key tail of `get`: raise, warn-then-`None`, or silent
/// `None`, per the caller's policy.
pub(crate) fn missing(reported: &str, on_missing: MissingKeyPolicy) -> Result<Option<Value>> {
    match on_missing {
        MissingKeyPolicy::Raise => Err(RegistryError::MissingKey(reported.to_string())),
        MissingKeyPolicy::Warn => {
            warn!("Missing key '{reported}'");
            Ok(None)
        }
        MissingKeyPolicy::Silent => Ok(None),
    }
}

/// `is_empty` against one scope level: absent counts as empty.
pub(crate) fn is_empty_in(scope: &Scope, key: &Key) -> bool {
    scope.get(key).map_or(true, Value::is_empty_value)
}

/// `branch` against one scope level: the value must itself be a scope.
pub(crate) fn branch_in(scope: &Scope, key: &Key, reported: &Key) -> Result<Scope> {
    match scope.get(key) {
        Some(Value::Scope(branch)) => Ok(branch.clone()),
        Some(_) => Err(RegistryError::ComplexPath {
            path: reported.to_string(),
            segment: key.to_string(),
        }),
        None => Err(RegistryError::MissingKey(reported.to_string())),
    }
}
