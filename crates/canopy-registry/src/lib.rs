//! In-memory key-value registries with a tree-structured variant.
//!
//! A registry maps string or integer [`Key`](canopy_types::Key)s to
//! arbitrary [`Value`](canopy_types::Value)s behind a uniform
//! get/set/delete/exists contract. Two variants share that contract through
//! the [`Registry`] trait:
//!
//! - [`FlatRegistry`] — a single flat namespace over one
//!   [`Scope`](canopy_types::Scope).
//! - [`TreeRegistry`] — the same contract over delimiter-separated
//!   hierarchical keys (`"a/b/c"`), descending nested scopes one segment at
//!   a time, auto-creating intermediate levels on write, and invoking
//!   registered [`Middleware`] observers per intermediate segment.
//!
//! # Modules
//!
//! - [`error`] — [`RegistryError`] and the missing-key severity policy
//! - [`traits`] — The [`Registry`] trait both variants implement
//! - [`flat`] — [`FlatRegistry`] and the shared per-level operations
//! - [`middleware`] — Observer trait, lifecycle events, and dispatch chain
//! - [`path`] — Delimited-path resolution over nested scopes
//! - [`tree`] — [`TreeRegistry`]
//!
//! # Example
//!
//! ```
//! use canopy_registry::{MissingKeyPolicy, Registry, TreeRegistry};
//! use canopy_types::{scope, Key, Value};
//!
//! let mut registry = TreeRegistry::from_scope(scope! {
//!     "key_2" => scope! { "key_2_1" => "value_2_1" },
//! });
//!
//! let key = Key::from("key_2/key_2_1");
//! let value = registry.get(&key, None, MissingKeyPolicy::Raise).unwrap();
//! assert_eq!(value, Some(Value::from("value_2_1")));
//!
//! registry
//!     .set(Key::from("key_1/key_1_1"), Value::from("x"))
//!     .unwrap();
//! assert!(registry.exists(&Key::from("key_1/key_1_1")).unwrap());
//! ```

pub mod error;
pub mod flat;
pub mod middleware;
pub mod path;
pub mod traits;
pub mod tree;

pub use error::{MissingKeyPolicy, RegistryError, Result};
pub use flat::FlatRegistry;
pub use middleware::{Envelope, LifecycleEvent, Middleware, MiddlewareChain};
pub use traits::Registry;
pub use tree::TreeRegistry;
