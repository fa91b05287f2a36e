use internals::RelayContext;
use tracing::debug;

use crate::traits::{ContextCustomizer, ModelineTrait, Resource};

/// Notified about every dependency declared through a modeline.
pub trait DependencyStrategy: Send + Sync {
    fn on_dependency(&self, dependency: &str);
}

/// The `dependency` trait. Forwards the declared value to every
/// [`DependencyStrategy`] bound in the context registry.
#[deprecated(
    since = "0.1.0",
    note = "bind a DependencyStrategy and notify it directly instead"
)]
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyTrait;

#[allow(deprecated)]
impl ModelineTrait for DependencyTrait {
    fn name(&self) -> &str {
        "dependency"
    }

    fn parse_trait(&self, _resource: &Resource, value: &str) -> Box<dyn ContextCustomizer> {
        Box::new(DependencyCustomizer {
            dependency: value.to_string(),
        })
    }
}

struct DependencyCustomizer {
    dependency: String,
}

impl ContextCustomizer for DependencyCustomizer {
    fn configure(&self, context: &RelayContext) {
        let strategies = context.registry().find_by_type::<dyn DependencyStrategy>();
        debug!(
            dependency = %self.dependency,
            strategies = strategies.len(),
            "Notifying dependency strategies"
        );
        for strategy in strategies {
            strategy.on_dependency(&self.dependency);
        }
    }
}
