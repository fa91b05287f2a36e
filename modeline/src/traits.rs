use internals::RelayContext;

/// Where a modeline was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    location: String,
}

impl Resource {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

pub trait ContextCustomizer: Send + Sync {
    fn configure(&self, context: &RelayContext);
}

/// A named modeline declaration such as `dependency`.
pub trait ModelineTrait: Send + Sync {
    fn name(&self) -> &str;

    /// Turns the raw declared value into a customizer for the context.
    fn parse_trait(&self, resource: &Resource, value: &str) -> Box<dyn ContextCustomizer>;
}
