use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

struct Binding {
    name: String,
    bean: Box<dyn Any + Send + Sync>,
}

/// Type-indexed registry of shared collaborators.
///
/// Beans are bound as `Arc<T>` where `T` may be a trait object, and are
/// looked up by that same `T`. Within a type, lookups return beans in bind
/// order and names are unique.
#[derive(Default)]
pub struct Registry {
    beans: DashMap<TypeId, Vec<Binding>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            beans: DashMap::new(),
        }
    }

    /// Binds `bean` under `name`, replacing any bean of the same type bound to that name.
    pub fn bind<T>(&self, name: &str, bean: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut bindings = self.beans.entry(TypeId::of::<T>()).or_default();
        match bindings.iter_mut().find(|b| b.name == name) {
            Some(existing) => {
                debug!(name, "Replacing bound bean");
                existing.bean = Box::new(bean);
            }
            None => bindings.push(Binding {
                name: name.to_string(),
                bean: Box::new(bean),
            }),
        }
    }

    /// Removes every bean bound under `name`. Returns whether anything was removed.
    pub fn unbind(&self, name: &str) -> bool {
        let mut removed = false;
        for mut bindings in self.beans.iter_mut() {
            let before = bindings.len();
            bindings.retain(|b| b.name != name);
            removed |= bindings.len() != before;
        }
        removed
    }

    pub fn lookup_by_name<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let bindings = self.beans.get(&TypeId::of::<T>())?;
        let bean = bindings
            .iter()
            .find(|b| b.name == name)?
            .bean
            .downcast_ref::<Arc<T>>()?;
        Some(Arc::clone(bean))
    }

    pub fn find_by_type<T>(&self) -> Vec<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.beans.get(&TypeId::of::<T>()) {
            Some(bindings) => bindings
                .iter()
                .filter_map(|b| b.bean.downcast_ref::<Arc<T>>())
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the bean of type `T` only when exactly one is bound.
    pub fn find_single_by_type<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut found = self.find_by_type::<T>();
        if found.len() == 1 {
            found.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.beans.iter().map(|b| b.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("beans", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Hello(&'static str);

    impl Greeter for Hello {
        fn greet(&self) -> String {
            format!("hello {}", self.0)
        }
    }

    #[test]
    fn test_bind_and_find_trait_objects() {
        let registry = Registry::new();
        registry.bind::<dyn Greeter>("a", Arc::new(Hello("a")));
        registry.bind::<dyn Greeter>("b", Arc::new(Hello("b")));

        let found: Vec<String> = registry
            .find_by_type::<dyn Greeter>()
            .iter()
            .map(|g| g.greet())
            .collect();
        assert_eq!(found, vec!["hello a", "hello b"]);

        let b = registry.lookup_by_name::<dyn Greeter>("b").unwrap();
        assert_eq!(b.greet(), "hello b");
        assert!(registry.lookup_by_name::<dyn Greeter>("c").is_none());
    }

    #[test]
    fn test_find_single_by_type_requires_exactly_one() {
        let registry = Registry::new();
        assert!(registry.find_single_by_type::<dyn Greeter>().is_none());

        registry.bind::<dyn Greeter>("a", Arc::new(Hello("a")));
        assert!(registry.find_single_by_type::<dyn Greeter>().is_some());

        registry.bind::<dyn Greeter>("b", Arc::new(Hello("b")));
        assert!(registry.find_single_by_type::<dyn Greeter>().is_none());
    }

    #[test]
    fn test_types_are_kept_apart() {
        let registry = Registry::new();
        registry.bind::<String>("name", Arc::new("value".to_string()));
        registry.bind::<dyn Greeter>("name", Arc::new(Hello("x")));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.lookup_by_name::<String>("name").as_deref(),
            Some(&"value".to_string())
        );
        assert!(registry.find_by_type::<u64>().is_empty());
    }

    #[test]
    fn test_rebind_replaces_in_place() {
        let registry = Registry::new();
        registry.bind::<dyn Greeter>("a", Arc::new(Hello("first")));
        registry.bind::<dyn Greeter>("b", Arc::new(Hello("b")));
        registry.bind::<dyn Greeter>("a", Arc::new(Hello("second")));

        let found: Vec<String> = registry
            .find_by_type::<dyn Greeter>()
            .iter()
            .map(|g| g.greet())
            .collect();
        assert_eq!(found, vec!["hello second", "hello b"]);
    }

    #[test]
    fn test_unbind() {
        let registry = Registry::new();
        registry.bind::<dyn Greeter>("a", Arc::new(Hello("a")));
        assert!(registry.unbind("a"));
        assert!(!registry.unbind("a"));
        assert!(registry.is_empty());
    }
}
