//! Delimited-path resolution over nested scopes.
//!
//! A tree key like `"a/b/c"` is resolved top-down per call: every segment
//! before the last names an intermediate scope to descend through, the last
//! is the terminal key handed to the flat per-level operations. Descent
//! tracks the walked key path and re-resolves it from the root at each
//! step, so mutations made by middleware mid-descent are honored — the
//! moral equivalent of the by-reference aliasing the contract was born
//! with, under ownership rules.

use canopy_types::{Key, Scope, Value};
use tracing::trace;

use crate::error::{RegistryError, Result};
use crate::middleware::{Envelope, LifecycleEvent};
use crate::tree::TreeRegistry;

/// Whether resolution may create missing intermediate scopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ResolveMode {
    /// Auto-vivify absent intermediates and replace scalar ones with empty
    /// scopes. Used by `set`.
    Create,
    /// Never create anything. Absent intermediates soft-abort; scalar
    /// intermediates are an error. Used by everything else.
    Probe,
}

/// Outcome of resolving a path key.
pub(crate) enum Resolved {
    /// The key contains no delimiter (or is an integer key): operate on the
    /// root scope with the key as-is. No middleware dispatch happens on
    /// this fast path.
    Root,
    /// Descent completed. `walked` is the chain of intermediate keys from
    /// the root; `terminal` is the final-level key.
    At { walked: Vec<Key>, terminal: Key },
    /// Probe mode hit an absent intermediate segment; the path cannot
    /// exist. Callers map this to their soft outcome (`exists` → false,
    /// `is_empty` → true, `delete` → no-op, `get` → missing-key handling
    /// with the full path).
    Missing,
}

/// Split a delimited path into segments, rejecting empty ones (`"a//b"`,
/// `"/a"`, `"a/"`).
pub(crate) fn split_segments<'a>(path: &'a str, delimiter: &str) -> Result<Vec<&'a str>> {
    let segments: Vec<&str> = path.split(delimiter).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(RegistryError::InvalidKey {
            key: path.to_string(),
            reason: "empty path segment".to_string(),
        });
    }
    Ok(segments)
}

/// Walk `root` along `walked`, expecting a nested scope at every step.
///
/// Fails with `ComplexPath` when the walk breaks — which can only happen
/// when middleware severed a previously validated path mid-descent.
pub(crate) fn scope_at_mut<'a>(
    root: &'a mut Scope,
    walked: &[Key],
    path: &str,
) -> Result<&'a mut Scope> {
    let mut current = root;
    for key in walked {
        current = match current.get_mut(key) {
            Some(Value::Scope(scope)) => scope,
            _ => {
                return Err(RegistryError::ComplexPath {
                    path: path.to_string(),
                    segment: key.to_string(),
                })
            }
        };
    }
    Ok(current)
}

impl TreeRegistry {
    /// Resolve `key` against the root scope.
    ///
    /// Dispatches [`LifecycleEvent::BeforeDescend`] once per intermediate
    /// segment, after the segment has been validated or created, before
    /// descending into it.
    pub(crate) fn resolve(&mut self, key: &Key, mode: ResolveMode) -> Result<Resolved> {
        let path = match key {
            Key::Int(_) => return Ok(Resolved::Root),
            Key::Str(s) => {
                if !s.contains(self.options.delimiter.as_str()) {
                    return Ok(Resolved::Root);
                }
                s.clone()
            }
        };
        let delimiter = self.options.delimiter.clone();
        let segments = split_segments(&path, &delimiter)?;
        let Some((terminal, intermediate)) = segments.split_last() else {
            // Unreachable: the path contains the delimiter, so splitting
            // produced at least two segments.
            return Ok(Resolved::Root);
        };

        let mut walked: Vec<Key> = Vec::with_capacity(intermediate.len());
        for segment in intermediate {
            let segment_key = Key::from(*segment);
            let level = scope_at_mut(&mut self.root, &walked, &path)?;
            match level.get(&segment_key) {
                Some(Value::Scope(_)) => {}
                Some(_) => match mode {
                    ResolveMode::Create => {
                        trace!(path = %path, segment = %segment_key, "replacing scalar intermediate with empty scope");
                        level.insert(segment_key.clone(), Value::Scope(Scope::new()));
                    }
                    ResolveMode::Probe => {
                        return Err(RegistryError::ComplexPath {
                            path,
                            segment: segment_key.to_string(),
                        });
                    }
                },
                None => match mode {
                    ResolveMode::Create => {
                        trace!(path = %path, segment = %segment_key, "auto-vivifying intermediate scope");
                        level.insert(segment_key.clone(), Value::Scope(Scope::new()));
                    }
                    ResolveMode::Probe => return Ok(Resolved::Missing),
                },
            }
            self.dispatch_before_descend(&segment_key, &walked, &path)?;
            walked.push(segment_key);
        }

        Ok(Resolved::At {
            walked,
            terminal: Key::from(*terminal),
        })
    }

    /// Run the middleware chain for one intermediate segment.
    ///
    /// The chain is moved out of the registry for the duration of the
    /// dispatch so observers can receive the registry itself as
    /// `&mut dyn Registry`. A handler that resolves another complex path
    /// therefore runs against an empty chain; dispatch never recurses.
    fn dispatch_before_descend(&mut self, segment: &Key, walked: &[Key], path: &str) -> Result<()> {
        if self.middleware.is_empty() {
            return Ok(());
        }
        let level = scope_at_mut(&mut self.root, walked, path)?.clone();
        let mut env = Envelope::new(segment.clone(), level);
        let mut chain = std::mem::take(&mut self.middleware);
        chain.dispatch(LifecycleEvent::BeforeDescend, &mut env, self);
        self.middleware = chain;
        Ok(())
    }
}
