//! The tree registry: the flat contract over hierarchical keys.

use canopy_types::{Key, Options, Scope, Value};

use crate::error::{MissingKeyPolicy, RegistryError, Result};
use crate::flat;
use crate::middleware::{Middleware, MiddlewareChain};
use crate::path::{scope_at_mut, Resolved, ResolveMode};
use crate::traits::Registry;

/// A registry over nested scopes, addressed by delimiter-separated keys.
///
/// Every operation resolves the path first (create mode for `set`, probe
/// mode for everything else) and then runs the shared flat per-level logic
/// against the resolved terminal scope. Middleware observers registered
/// via [`add_middleware`](TreeRegistry::add_middleware) are invoked per
/// intermediate segment during descent.
#[derive(Debug, Default)]
pub struct TreeRegistry {
    pub(crate) root: Scope,
    pub(crate) options: Options,
    pub(crate) middleware: MiddlewareChain,
}

impl TreeRegistry {
    /// Create an empty registry with default options (delimiter `"/"`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `scope` and default options.
    pub fn from_scope(scope: Scope) -> Self {
        Self {
            root: scope,
            options: Options::default(),
            middleware: MiddlewareChain::new(),
        }
    }

    /// Create a registry seeded with `scope` and explicit options.
    pub fn with_options(scope: Scope, options: Options) -> Self {
        Self {
            root: scope,
            options,
            middleware: MiddlewareChain::new(),
        }
    }

    /// Append an observer to the middleware chain.
    ///
    /// Observers are invoked in registration order, once per intermediate
    /// segment of every subsequent path resolution. There is no removal.
    pub fn add_middleware(&mut self, observer: Box<dyn Middleware>) {
        self.middleware.register(observer);
    }
}

impl Registry for TreeRegistry {
    fn set(&mut self, key: Key, value: Value) -> Result<()> {
        match self.resolve(&key, ResolveMode::Create)? {
            Resolved::Root => {
                self.root.insert(key, value);
                Ok(())
            }
            Resolved::At { walked, terminal } => {
                let level = scope_at_mut(&mut self.root, &walked, &key.to_string())?;
                level.insert(terminal, value);
                Ok(())
            }
            // Probe-only outcome; create mode never produces it.
            Resolved::Missing => Ok(()),
        }
    }

    fn exists(&mut self, key: &Key) -> Result<bool> {
        match self.resolve(key, ResolveMode::Probe)? {
            Resolved::Root => Ok(self.root.contains_key(key)),
            Resolved::At { walked, terminal } => {
                let level = scope_at_mut(&mut self.root, &walked, &key.to_string())?;
                Ok(level.contains_key(&terminal))
            }
            Resolved::Missing => Ok(false),
        }
    }

    fn is_empty(&mut self, key: &Key) -> Result<bool> {
        match self.resolve(key, ResolveMode::Probe)? {
            Resolved::Root => Ok(flat::is_empty_in(&self.root, key)),
            Resolved::At { walked, terminal } => {
                let level = scope_at_mut(&mut self.root, &walked, &key.to_string())?;
                Ok(flat::is_empty_in(level, &terminal))
            }
            Resolved::Missing => Ok(true),
        }
    }

    fn get(
        &mut self,
        key: &Key,
        default: Option<Value>,
        on_missing: MissingKeyPolicy,
    ) -> Result<Option<Value>> {
        // Failures always quote the full original path, not the terminal
        // segment.
        let reported = key.to_string();
        match self.resolve(key, ResolveMode::Probe)? {
            Resolved::Root => flat::get_in(&self.root, key, default, on_missing, &reported),
            Resolved::At { walked, terminal } => {
                let level = scope_at_mut(&mut self.root, &walked, &reported)?;
                flat::get_in(level, &terminal, default, on_missing, &reported)
            }
            Resolved::Missing => {
                if let Some(default) = default {
                    return Ok(Some(default));
                }
                flat::missing(&reported, on_missing)
            }
        }
    }

    fn delete(&mut self, key: &Key) -> Result<()> {
        match self.resolve(key, ResolveMode::Probe)? {
            Resolved::Root => {
                self.root.remove(key);
                Ok(())
            }
            Resolved::At { walked, terminal } => {
                let level = scope_at_mut(&mut self.root, &walked, &key.to_string())?;
                level.remove(&terminal);
                Ok(())
            }
            Resolved::Missing => Ok(()),
        }
    }

    fn override_scope(&mut self, scope: Scope) {
        self.root = scope;
    }

    fn scope(&self) -> &Scope {
        &self.root
    }

    fn options(&self) -> &Options {
        &self.options
    }

    fn branch(&mut self, key: &Key, options: Option<Options>) -> Result<Self> {
        let child_options = options.unwrap_or_else(|| self.options.clone());
        let reported = key.to_string();
        let scope = match self.resolve(key, ResolveMode::Probe)? {
            Resolved::Root => flat::branch_in(&self.root, key, key)?,
            Resolved::At { walked, terminal } => {
                let level = scope_at_mut(&mut self.root, &walked, &reported)?;
                flat::branch_in(level, &terminal, key)?
            }
            Resolved::Missing => return Err(RegistryError::MissingKey(reported)),
        };
        Ok(Self::with_options(scope, child_options))
    }
}
