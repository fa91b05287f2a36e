use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

#[allow(deprecated)]
use crate::dependency::DependencyTrait;
use crate::traits::{ContextCustomizer, ModelineTrait, Resource};

/// Marker that follows the comment prefix of a modeline.
pub const MODELINE_START: &str = "relay:";

const COMMENT_PREFIXES: [&str; 2] = ["//", "#"];

/// Dispatches modeline declarations to the registered traits by name.
/// Names are matched case-insensitively.
#[derive(Default)]
pub struct ModelineParser {
    traits: HashMap<String, Arc<dyn ModelineTrait>>,
}

impl ModelineParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that knows the built-in traits.
    #[allow(deprecated)]
    pub fn with_default_traits() -> Self {
        Self::new().with_trait(Arc::new(DependencyTrait))
    }

    pub fn with_trait(mut self, modeline_trait: Arc<dyn ModelineTrait>) -> Self {
        self.add_trait(modeline_trait);
        self
    }

    pub fn add_trait(&mut self, modeline_trait: Arc<dyn ModelineTrait>) {
        self.traits
            .insert(modeline_trait.name().to_lowercase(), modeline_trait);
    }

    pub fn is_modeline(line: &str) -> bool {
        Self::declarations(line).is_some()
    }

    /// Parses one line. Lines that are not modelines yield nothing.
    pub fn parse(&self, resource: &Resource, line: &str) -> Vec<Box<dyn ContextCustomizer>> {
        let declarations = match Self::declarations(line) {
            Some(declarations) => declarations,
            None => return Vec::new(),
        };

        declarations
            .split_whitespace()
            .filter_map(|part| {
                let (key, value) = match part.split_once('=') {
                    Some(kv) => kv,
                    None => {
                        debug!(location = resource.location(), part, "Ignoring modeline part without '='");
                        return None;
                    }
                };
                match self.traits.get(&key.to_lowercase()) {
                    Some(modeline_trait) => {
                        trace!(location = resource.location(), key, value, "Parsing modeline trait");
                        Some(modeline_trait.parse_trait(resource, value))
                    }
                    None => {
                        debug!(location = resource.location(), key, "Unknown modeline trait");
                        None
                    }
                }
            })
            .collect()
    }

    /// Parses every line of a source.
    pub fn parse_source(&self, resource: &Resource, source: &str) -> Vec<Box<dyn ContextCustomizer>> {
        source
            .lines()
            .flat_map(|line| self.parse(resource, line))
            .collect()
    }

    fn declarations(line: &str) -> Option<&str> {
        let line = line.trim_start();
        let comment = COMMENT_PREFIXES
            .iter()
            .find_map(|prefix| line.strip_prefix(*prefix))?;
        comment.trim_start().strip_prefix(MODELINE_START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use internals::RelayContext;
    use std::sync::Mutex;

    struct Recording {
        name: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    struct Push(String, Arc<Mutex<Vec<String>>>);

    impl ContextCustomizer for Push {
        fn configure(&self, _context: &RelayContext) {
            self.1.lock().unwrap().push(self.0.clone());
        }
    }

    impl ModelineTrait for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn parse_trait(&self, resource: &Resource, value: &str) -> Box<dyn ContextCustomizer> {
            Box::new(Push(
                format!("{}@{}={}", self.name, resource.location(), value),
                Arc::clone(&self.seen),
            ))
        }
    }

    fn parser(seen: &Arc<Mutex<Vec<String>>>) -> ModelineParser {
        ModelineParser::new()
            .with_trait(Arc::new(Recording {
                name: "name",
                seen: Arc::clone(seen),
            }))
            .with_trait(Arc::new(Recording {
                name: "Env",
                seen: Arc::clone(seen),
            }))
    }

    #[test]
    fn test_is_modeline() {
        assert!(ModelineParser::is_modeline("// relay: name=x"));
        assert!(ModelineParser::is_modeline("   #relay: name=x"));
        assert!(!ModelineParser::is_modeline("relay: name=x"));
        assert!(!ModelineParser::is_modeline("// a regular comment"));
    }

    #[test]
    fn test_parse_dispatches_by_name() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let parser = parser(&seen);
        let resource = Resource::new("route.rs");

        let customizers = parser.parse(&resource, "// relay: name=orders env=PROD=1 unknown=x bare");
        assert_eq!(customizers.len(), 2);

        let context = RelayContext::new();
        for customizer in &customizers {
            customizer.configure(&context);
        }
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["name@route.rs=orders", "Env@route.rs=PROD=1"]
        );
    }

    #[test]
    fn test_non_modeline_yields_nothing() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let parser = parser(&seen);
        assert!(parser
            .parse(&Resource::new("route.rs"), "let name = \"x\";")
            .is_empty());
    }

    #[test]
    fn test_parse_source() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let parser = parser(&seen);
        let source = "// relay: name=a\nfn main() {}\n# relay: name=b env=c\n";

        let customizers = parser.parse_source(&Resource::new("route.rs"), source);
        assert_eq!(customizers.len(), 3);
    }

    #[test]
    fn test_default_traits_include_dependency() {
        let parser = ModelineParser::with_default_traits();
        let customizers = parser.parse(&Resource::new("r"), "// relay: dependency=mvn:a:b:1");
        assert_eq!(customizers.len(), 1);
    }
}
