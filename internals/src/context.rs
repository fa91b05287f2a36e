use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::conversions::{DefaultTypeConverter, TypeConverter};
use crate::errors::RelayError;
use crate::registry::Registry;

/// Context-wide string options, e.g. [`crate::keys::LOG_DEBUG_BODY_MAX_CHARS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobalOptions {
    options: HashMap<String, String>,
}

impl GlobalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a flat JSON object of string values.
    pub fn from_json_str(json: &str) -> Result<Self, RelayError> {
        serde_json::from_str(json)
            .map_err(|e| RelayError::InvalidConfiguration(format!("global options: {}", e)))
    }

    pub fn from_path(path: &Path) -> Result<Self, RelayError> {
        let file = File::open(path).map_err(|e| {
            RelayError::InvalidConfiguration(format!("cannot open {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            RelayError::InvalidConfiguration(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.options.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Shared state exchanges are created against: the registry, the global
/// options and the type converter.
pub struct RelayContext {
    registry: Registry,
    global_options: GlobalOptions,
    type_converter: Arc<dyn TypeConverter>,
}

impl RelayContext {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> RelayContextBuilder {
        RelayContextBuilder::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn global_options(&self) -> &GlobalOptions {
        &self.global_options
    }

    pub fn global_option(&self, key: &str) -> Option<&str> {
        self.global_options.get(key)
    }

    pub fn type_converter(&self) -> &dyn TypeConverter {
        self.type_converter.as_ref()
    }
}

impl Default for RelayContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RelayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayContext")
            .field("registry", &self.registry)
            .field("global_options", &self.global_options)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct RelayContextBuilder {
    global_options: GlobalOptions,
    type_converter: Option<Arc<dyn TypeConverter>>,
}

impl RelayContextBuilder {
    pub fn with_global_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.global_options.insert(key, value);
        self
    }

    pub fn with_global_options(mut self, options: GlobalOptions) -> Self {
        self.global_options = options;
        self
    }

    pub fn with_type_converter(mut self, converter: Arc<dyn TypeConverter>) -> Self {
        self.type_converter = Some(converter);
        self
    }

    pub fn build(self) -> RelayContext {
        let type_converter: Arc<dyn TypeConverter> = match self.type_converter {
            Some(converter) => converter,
            None => Arc::new(DefaultTypeConverter),
        };
        RelayContext {
            registry: Registry::new(),
            global_options: self.global_options,
            type_converter,
        }
    }
}
