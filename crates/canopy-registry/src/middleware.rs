//! Middleware: observers invoked at lifecycle points during tree path
//! resolution.
//!
//! Observers register on a [`TreeRegistry`](crate::TreeRegistry) and are
//! invoked per intermediate path segment while it descends. The chain
//! itself performs no mutation; side effects are entirely up to the
//! observer, which receives the outer registry and may call get/set/exists
//! on it from inside a handler.

use canopy_types::{Key, Scope, Value};

use crate::flat::FlatRegistry;
use crate::traits::Registry;

/// A point during path resolution at which observers are invoked.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Dispatched once per intermediate segment, after the segment has been
    /// validated or auto-created, before descending into it. Zero-segment
    /// lookups (keys without a delimiter) never dispatch.
    BeforeDescend,
}

/// Throwaway context handed to observers, one per segment dispatch.
///
/// `level` is a flat registry seeded with a copy of the scope containing
/// the segment, so an observer can probe the current nesting level through
/// the ordinary registry API. It is a copy: mutations stay inside the
/// envelope and are discarded after dispatch. To mutate the real store, go
/// through the registry handle the handler also receives.
pub struct Envelope {
    /// The intermediate segment about to be descended into.
    pub segment: Key,
    /// A flat view over a copy of the current nesting level.
    pub level: FlatRegistry,
}

impl Envelope {
    pub(crate) fn new(segment: Key, level: Scope) -> Self {
        Self {
            segment,
            level: FlatRegistry::from_scope(level),
        }
    }

    /// The segment key as a stored value, convenient for observers that
    /// record which segments they saw.
    pub fn segment_value(&self) -> Value {
        Value::from(self.segment.clone())
    }
}

/// An observer of registry lifecycle events.
///
/// Implement the handlers you care about; the rest default to no-ops, so
/// an observer that only handles one event declares exactly one method.
pub trait Middleware {
    /// Dispatch skips this observer while it returns `false`.
    ///
    /// An observer that mutates the registry from inside a handler can flip
    /// its own flag around the mutation to suppress reentrant dispatch; the
    /// flag defaults to enabled.
    fn enabled(&self) -> bool {
        true
    }

    /// Handler for [`LifecycleEvent::BeforeDescend`].
    fn before_descend(&mut self, env: &mut Envelope, registry: &mut dyn Registry) {
        let _ = (env, registry);
    }
}

/// An ordered chain of observers.
///
/// Registration order is invocation order. There is no removal; the chain
/// lives as long as the registry that owns it.
#[derive(Default)]
pub struct MiddlewareChain {
    observers: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer.
    pub fn register(&mut self, observer: Box<dyn Middleware>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Invoke each enabled observer's handler for `event`, in registration
    /// order.
    pub fn dispatch(
        &mut self,
        event: LifecycleEvent,
        env: &mut Envelope,
        registry: &mut dyn Registry,
    ) {
        for observer in self.observers.iter_mut() {
            if !observer.enabled() {
                continue;
            }
            match event {
                LifecycleEvent::BeforeDescend => observer.before_descend(env, registry),
            }
        }
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("observer_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MissingKeyPolicy;
    use canopy_types::scope;

    /// Records its own invocations on the registry it is handed.
    struct Recorder {
        tag: &'static str,
        enabled: bool,
    }

    impl Middleware for Recorder {
        fn enabled(&self) -> bool {
            self.enabled
        }

        fn before_descend(&mut self, _env: &mut Envelope, registry: &mut dyn Registry) {
            let order_key = Key::from("order");
            let seen = registry
                .get(&order_key, Some(Value::from("")), MissingKeyPolicy::Silent)
                .expect("flat get with default cannot fail");
            let seen = match seen {
                Some(Value::Str(s)) => s,
                _ => String::new(),
            };
            registry
                .set(order_key, Value::from(format!("{seen}{}", self.tag)))
                .expect("flat set cannot fail");
        }
    }

    /// An observer that relies on the default no-op handler.
    struct Inert;

    impl Middleware for Inert {}

    fn dispatch_once(chain: &mut MiddlewareChain, target: &mut FlatRegistry) {
        let mut env = Envelope::new(Key::from("segment"), scope! { "k" => "v" });
        chain.dispatch(LifecycleEvent::BeforeDescend, &mut env, target);
    }

    #[test]
    fn observers_run_in_registration_order() {
        let mut chain = MiddlewareChain::new();
        chain.register(Box::new(Recorder { tag: "a", enabled: true }));
        chain.register(Box::new(Recorder { tag: "b", enabled: true }));
        chain.register(Box::new(Recorder { tag: "c", enabled: true }));

        let mut target = FlatRegistry::new();
        dispatch_once(&mut chain, &mut target);

        assert_eq!(
            target
                .get(&Key::from("order"), None, MissingKeyPolicy::Raise)
                .unwrap(),
            Some(Value::from("abc"))
        );
    }

    #[test]
    fn disabled_observers_are_skipped() {
        let mut chain = MiddlewareChain::new();
        chain.register(Box::new(Recorder { tag: "a", enabled: true }));
        chain.register(Box::new(Recorder { tag: "b", enabled: false }));

        let mut target = FlatRegistry::new();
        dispatch_once(&mut chain, &mut target);

        assert_eq!(
            target
                .get(&Key::from("order"), None, MissingKeyPolicy::Raise)
                .unwrap(),
            Some(Value::from("a"))
        );
    }

    #[test]
    fn default_handler_is_a_noop() {
        let mut chain = MiddlewareChain::new();
        chain.register(Box::new(Inert));

        let mut target = FlatRegistry::new();
        dispatch_once(&mut chain, &mut target);
        assert!(target.scope().is_empty());
    }

    #[test]
    fn envelope_exposes_segment_and_level_copy() {
        let mut env = Envelope::new(Key::from("seg"), scope! { "k" => "v" });
        assert_eq!(env.segment, Key::from("seg"));
        assert_eq!(env.segment_value(), Value::from("seg"));
        assert!(env.level.exists(&Key::from("k")).unwrap());

        // Envelope mutations are confined to the envelope.
        env.level.set(Key::from("k2"), Value::Int(2)).unwrap();
        assert_eq!(env.level.scope().len(), 2);
    }

    #[test]
    fn chain_debug_reports_observer_count() {
        let mut chain = MiddlewareChain::new();
        chain.register(Box::new(Inert));
        let debug = format!("{chain:?}");
        assert!(debug.contains("MiddlewareChain"));
        assert!(debug.contains("observer_count"));
    }
}
