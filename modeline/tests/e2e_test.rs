use std::sync::{Arc, Mutex};

use internals::RelayContext;
use modeline::{DependencyStrategy, ModelineParser, Resource};

#[derive(Default)]
struct CollectingStrategy {
    dependencies: Mutex<Vec<String>>,
}

impl DependencyStrategy for CollectingStrategy {
    fn on_dependency(&self, dependency: &str) {
        self.dependencies.lock().unwrap().push(dependency.to_string());
    }
}

const ROUTE_SOURCE: &str = r#"
// relay: dependency=mvn:org.example:client:1.2
// relay: dependency=mvn:org.example:codec:0.9 name=orders
fn configure() {
    // not a modeline: dependency=ignored
}
"#;

#[test]
fn test_dependencies_reach_every_strategy() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let context = RelayContext::new();
    let first = Arc::new(CollectingStrategy::default());
    let second = Arc::new(CollectingStrategy::default());
    context
        .registry()
        .bind::<dyn DependencyStrategy>("first", Arc::clone(&first) as Arc<dyn DependencyStrategy>);
    context
        .registry()
        .bind::<dyn DependencyStrategy>("second", Arc::clone(&second) as Arc<dyn DependencyStrategy>);

    let parser = ModelineParser::with_default_traits();
    let customizers = parser.parse_source(&Resource::new("routes/orders.rs"), ROUTE_SOURCE);
    assert_eq!(customizers.len(), 2);

    for customizer in &customizers {
        customizer.configure(&context);
    }

    let expected = vec![
        "mvn:org.example:client:1.2".to_string(),
        "mvn:org.example:codec:0.9".to_string(),
    ];
    assert_eq!(*first.dependencies.lock().unwrap(), expected);
    assert_eq!(*second.dependencies.lock().unwrap(), expected);
}
