/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A structurally invalid key was supplied: an empty path, or a
    /// delimited path containing an empty segment.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey {
        key: String,
        reason: String,
    },

    /// `get` found no value, no default was supplied, and the caller chose
    /// [`MissingKeyPolicy::Raise`]. For tree registries the reported key is
    /// the full original path, not the terminal segment.
    #[error("Missing key '{0}'")]
    MissingKey(String),

    /// An intermediate path segment (or a branch target) exists but is not
    /// a nested scope. Never downgraded to a warning.
    #[error("complex path '{path}': segment '{segment}' is not a nested scope")]
    ComplexPath {
        path: String,
        segment: String,
    },
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// What `get` does when the key is absent and no default was supplied.
///
/// Only the missing-key condition has caller-selectable severity; the same
/// code path serves both "crash on misconfiguration" and "tolerate absence
/// and continue" deployments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Fail with [`RegistryError::MissingKey`].
    #[default]
    Raise,
    /// Emit one `tracing` warning carrying the same message and return
    /// `None`; execution continues.
    Warn,
    /// Return `None` without emitting anything.
    Silent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_message_is_exact() {
        let err = RegistryError::MissingKey("key_5/key_5_1".to_string());
        assert_eq!(err.to_string(), "Missing key 'key_5/key_5_1'");
    }

    #[test]
    fn complex_path_message_names_path_and_segment() {
        let err = RegistryError::ComplexPath {
            path: "a/b/c".to_string(),
            segment: "b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "complex path 'a/b/c': segment 'b' is not a nested scope"
        );
    }

    #[test]
    fn invalid_key_message() {
        let err = RegistryError::InvalidKey {
            key: "a//b".to_string(),
            reason: "empty path segment".to_string(),
        };
        assert_eq!(err.to_string(), "invalid key 'a//b': empty path segment");
    }

    #[test]
    fn default_policy_is_raise() {
        assert_eq!(MissingKeyPolicy::default(), MissingKeyPolicy::Raise);
    }
}
