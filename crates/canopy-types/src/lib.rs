//! Foundation types for the canopy registry.
//!
//! This crate provides the value model shared by every canopy crate: the
//! key and value enums, the ordered scope mapping, and the construction
//! options struct.
//!
//! # Key Types
//!
//! - [`Key`] — A registry key: a string or a non-negative integer
//! - [`Value`] — A stored value, including nested [`Scope`]s for the tree
//!   variant
//! - [`Scope`] — An insertion-ordered `Key → Value` mapping
//! - [`Options`] — Construction-time configuration (path delimiter plus
//!   opaque passthrough entries)
//!
//! The [`scope!`] macro builds scope literals:
//!
//! ```
//! use canopy_types::scope;
//!
//! let config = scope! {
//!     "host" => "localhost",
//!     "port" => 8080_i64,
//!     "tls" => scope! { "enabled" => false },
//! };
//! assert_eq!(config.len(), 3);
//! ```

pub mod key;
pub mod options;
pub mod scope;
pub mod value;

pub use key::Key;
pub use options::{Options, DEFAULT_DELIMITER};
pub use scope::Scope;
pub use value::Value;
