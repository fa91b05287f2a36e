use internals::{RelayContext, RelayError};

use crate::env::sysenv;

/// Parses an optional option value as an `i32`.
///
/// A value of the form `{{name}}` is first resolved against the context's
/// global options, and `{{env:NAME}}` against the environment.
pub fn parse_integer(context: &RelayContext, text: Option<&str>) -> Result<Option<i32>, RelayError> {
    let text = match text {
        Some(text) => text,
        None => return Ok(None),
    };

    let resolved = resolve_placeholder(context, text.trim())?;
    resolved
        .trim()
        .parse::<i32>()
        .map(Some)
        .map_err(|_| RelayError::InvalidConfiguration(format!("Error parsing [{}] as an Integer.", text)))
}

fn resolve_placeholder(context: &RelayContext, text: &str) -> Result<String, RelayError> {
    let name = match text.strip_prefix("{{").and_then(|t| t.strip_suffix("}}")) {
        Some(name) => name.trim(),
        None => return Ok(text.to_string()),
    };

    let resolved = match name.strip_prefix("env:") {
        Some(variable) => sysenv(variable),
        None => context.global_option(name).map(str::to_string),
    };
    resolved.ok_or_else(|| {
        RelayError::InvalidConfiguration(format!("Property with key [{}] not found", name))
    })
}
