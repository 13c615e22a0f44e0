//! Name to component lookup consumed by the resolver.

use crate::holder::StringResourceHolder;
use arc_swap::ArcSwap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry name under which the resolver looks up its holder
pub const STRING_RESOURCE_HOLDER_NAME: &str = "stringResourceHolder";

/// A type-erased registered component
pub type Component = Arc<dyn Any + Send + Sync>;

/// Looks up application components by name
pub trait ComponentRegistry: Send + Sync {
    /// Component registered under `name`, if any
    fn get_object(&self, name: &str) -> Option<Component>;
}

/// Thread-safe registry with lock-free reads.
///
/// Writers swap in a new map, so lookups racing a registration see either the
/// old or the new set, never a partial one.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    components: ArcSwap<HashMap<String, Component>>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `holder` under [`STRING_RESOURCE_HOLDER_NAME`]
    pub fn with_holder(holder: StringResourceHolder) -> Self {
        let registry = Self::new();
        registry.register(STRING_RESOURCE_HOLDER_NAME, Arc::new(holder));
        registry
    }

    /// Register `component` under `name`, replacing any previous one
    pub fn register(&self, name: impl Into<String>, component: Component) {
        let name = name.into();
        debug!("Registering component '{}'", name);
        self.components.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(name.clone(), Arc::clone(&component));
            next
        });
    }

    /// Remove and return the component registered under `name`
    pub fn remove(&self, name: &str) -> Option<Component> {
        let mut removed = None;
        self.components.rcu(|current| {
            let mut next = HashMap::clone(current);
            removed = next.remove(name);
            next
        });
        removed
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.components.store(Arc::new(HashMap::new()));
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.components.load().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.components.load().is_empty()
    }
}

impl ComponentRegistry for InMemoryRegistry {
    fn get_object(&self, name: &str) -> Option<Component> {
        self.components.load().get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = InMemoryRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_object("answer").is_none());

        registry.register("answer", Arc::new(42_u32));
        let component = registry.get_object("answer").unwrap();
        assert_eq!(component.downcast_ref::<u32>(), Some(&42));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_replaces() {
        let registry = InMemoryRegistry::new();
        registry.register("name", Arc::new("first"));
        registry.register("name", Arc::new("second"));

        let component = registry.get_object("name").unwrap();
        assert_eq!(component.downcast_ref::<&str>(), Some(&"second"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let registry = InMemoryRegistry::new();
        registry.register("a", Arc::new(1_i32));
        registry.register("b", Arc::new(2_i32));

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
    }
}
