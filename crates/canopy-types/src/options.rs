use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// The path delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = "/";

/// Construction-time configuration for a registry.
///
/// Recorded when the registry is created and immutable afterwards. The
/// core only consumes `delimiter` (and only in the tree variant); `extra`
/// carries any further entries opaquely so embedders can stash their own
/// settings and read them back through the options accessor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Separator between path segments of a hierarchical key.
    pub delimiter: String,
    /// Uninterpreted passthrough entries.
    pub extra: Scope,
}

impl Options {
    /// Options with the given delimiter and no extra entries.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            extra: Scope::new(),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            extra: Scope::new(),
        }
    }
}
