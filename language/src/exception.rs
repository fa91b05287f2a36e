use internals::{keys, Exchange, Failure};

/// Finds the failure associated with an exchange.
///
/// The exchange's own exception wins; otherwise the
/// [`EXCEPTION_CAUGHT`](keys::EXCEPTION_CAUGHT) property is converted to a
/// failure. A property that does not convert counts as no failure.
pub fn exception(exchange: &Exchange) -> Option<Failure> {
    if let Some(failure) = exchange.exception() {
        return Some(failure.clone());
    }
    exchange
        .property(keys::EXCEPTION_CAUGHT)
        .and_then(|value| exchange.context().type_converter().to_failure(value))
}

pub fn exception_message(exchange: &Exchange) -> Option<String> {
    exception(exchange).and_then(|failure| failure.message())
}

/// Renders the failure, its backtrace (when captured) and its causes.
pub fn exception_stacktrace(exchange: &Exchange) -> Option<String> {
    let failure = exception(exchange)?;
    let mut out = String::new();
    failure.write_stack_trace(&mut out).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_utils::new_exchange;

    #[test]
    fn test_no_failure() {
        let exchange = new_exchange().with_body("hello");
        assert!(exception(&exchange).is_none());
        assert!(exception_message(&exchange).is_none());
        assert!(exception_stacktrace(&exchange).is_none());
    }

    #[test]
    fn test_failure_from_exception_slot() {
        let failure = Failure::from_message("connection reset");
        let exchange = new_exchange().with_exception(failure.clone());

        assert_eq!(exception(&exchange), Some(failure));
        assert_eq!(exception_message(&exchange).as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_failure_from_caught_property() {
        let caught = Failure::from_message("handled upstream");
        let exchange = new_exchange().with_property(keys::EXCEPTION_CAUGHT, caught.clone());

        assert_eq!(exception(&exchange), Some(caught));
        assert_eq!(exception_message(&exchange).as_deref(), Some("handled upstream"));
    }

    #[test]
    fn test_exception_slot_takes_precedence() {
        let primary = Failure::from_message("primary");
        let caught = Failure::from_message("caught");
        let exchange = new_exchange()
            .with_exception(primary.clone())
            .with_property(keys::EXCEPTION_CAUGHT, caught);

        assert_eq!(exception(&exchange), Some(primary));
    }

    #[test]
    fn test_unconvertible_caught_property_is_absent() {
        let exchange = new_exchange().with_property(keys::EXCEPTION_CAUGHT, "not an error");
        assert!(exception(&exchange).is_none());
        assert!(exception_stacktrace(&exchange).is_none());
    }

    #[test]
    fn test_failure_with_empty_message() {
        let exchange = new_exchange().with_exception(Failure::from_message(""));
        assert!(exception(&exchange).is_some());
        assert!(exception_message(&exchange).is_none());
    }

    #[test]
    fn test_stacktrace_starts_with_failure() {
        let exchange = new_exchange().with_exception(Failure::from_message("boom"));
        let trace = exception_stacktrace(&exchange).unwrap();
        let first = trace.lines().next().unwrap();
        assert!(first.ends_with("MessageError: boom"), "unexpected first line: {first}");
    }

    #[test]
    fn test_lookups_are_idempotent() {
        let exchange = new_exchange().with_exception(Failure::from_message("boom"));
        assert_eq!(exception(&exchange), exception(&exchange));
        assert_eq!(exception_message(&exchange), exception_message(&exchange));
        assert_eq!(exception_stacktrace(&exchange), exception_stacktrace(&exchange));
    }
}
