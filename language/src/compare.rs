//! Prefix and suffix predicates over arbitrary values.
//!
//! Both sides are converted to text with the exchange's type converter.
//! Two absent values are considered equal and therefore match; a single
//! absent value never matches. `Value::Null` counts as absent.

use internals::{Exchange, Value};

pub fn starts_with(exchange: &Exchange, left: Option<&Value>, right: Option<&Value>) -> bool {
    compare_text(exchange, left, right, |l, r| l.starts_with(r))
}

pub fn ends_with(exchange: &Exchange, left: Option<&Value>, right: Option<&Value>) -> bool {
    compare_text(exchange, left, right, |l, r| l.ends_with(r))
}

fn compare_text<F>(exchange: &Exchange, left: Option<&Value>, right: Option<&Value>, test: F) -> bool
where
    F: Fn(&str, &str) -> bool,
{
    let left = left.filter(|v| !v.is_null());
    let right = right.filter(|v| !v.is_null());

    let (left, right) = match (left, right) {
        (None, None) => return true,
        (Some(l), Some(r)) => (l, r),
        _ => return false,
    };

    let converter = exchange.context().type_converter();
    match (converter.to_text(left), converter.to_text(right)) {
        (Some(l), Some(r)) => test(&l, &r),
        _ => false,
    }
}
