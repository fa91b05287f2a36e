use std::sync::{Arc, Once};

use internals::{Exchange, RelayContext};
use tracing_subscriber::EnvFilter;

static ONCE: Once = Once::new();

pub fn init_tracing() {
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn new_exchange() -> Exchange {
    init_tracing();
    Exchange::new(Arc::new(RelayContext::new()))
}
