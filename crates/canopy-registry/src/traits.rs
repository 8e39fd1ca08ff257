//! The [`Registry`] trait defining the shared store contract.
//!
//! Both variants — flat and tree — expose the same capability set through
//! this trait. The flat variant is the base rendition; the tree variant
//! composes path resolution in front of the identical per-level logic.

use canopy_types::{Key, Options, Scope, Value};

use crate::error::{MissingKeyPolicy, Result};

/// Uniform get/set/delete/exists access over a key-value scope.
///
/// Read operations take `&mut self` because tree resolution may dispatch
/// middleware, and middleware is allowed to mutate the registry it
/// observes. A registry has a single logical owner; cross-thread mutation
/// is the embedding application's concern (see the crate docs).
pub trait Registry {
    /// Insert or overwrite the value at `key`.
    ///
    /// The tree variant auto-creates missing intermediate scopes and
    /// replaces scalar intermediates with empty scopes.
    fn set(&mut self, key: Key, value: Value) -> Result<()>;

    /// Returns `true` iff `key` is present, regardless of its value.
    fn exists(&mut self, key: &Key) -> Result<bool>;

    /// Returns `true` iff `key` is absent or holds an empty value per
    /// [`Value::is_empty_value`].
    fn is_empty(&mut self, key: &Key) -> Result<bool>;

    /// The value at `key`.
    ///
    /// A present key returns its value, even when that value equals
    /// `default` or is itself empty or null. An absent key returns
    /// `default` when one is given; otherwise `on_missing` decides between
    /// failing, warning-then-`None`, and silent `None`.
    fn get(
        &mut self,
        key: &Key,
        default: Option<Value>,
        on_missing: MissingKeyPolicy,
    ) -> Result<Option<Value>>;

    /// Remove `key` if present; no-op when absent.
    fn delete(&mut self, key: &Key) -> Result<()>;

    /// Atomically replace the entire root scope.
    fn override_scope(&mut self, scope: Scope);

    /// The whole root scope.
    fn scope(&self) -> &Scope;

    /// The options recorded at construction.
    fn options(&self) -> &Options;

    /// A new registry of the same kind, seeded with an independently-owned
    /// copy of the scope stored at `key`.
    ///
    /// The value at `key` must itself be a scope. The child uses `options`
    /// when given, the parent's options otherwise. Later mutations of the
    /// child never affect the parent.
    fn branch(&mut self, key: &Key, options: Option<Options>) -> Result<Self>
    where
        Self: Sized;
}
