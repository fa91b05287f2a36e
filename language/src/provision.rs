use std::sync::Arc;

use internals::{keys, RelayContext, RelayError};
use tracing::debug;

use crate::context_helper::parse_integer;
use crate::formatter::{DefaultExchangeFormatter, ExchangeFormatter, OutputStyle};

/// Returns `formatter` when given, else the single formatter bound in the
/// registry, else a new multiline [`DefaultExchangeFormatter`] showing the
/// exchange id and headers in the fixed style.
///
/// The new formatter takes its body limit from the
/// [`LOG_DEBUG_BODY_MAX_CHARS`](keys::LOG_DEBUG_BODY_MAX_CHARS) global
/// option. A malformed limit fails the call with [`RelayError::Runtime`].
pub fn get_or_create_exchange_formatter(
    context: &RelayContext,
    formatter: Option<Arc<dyn ExchangeFormatter>>,
) -> Result<Arc<dyn ExchangeFormatter>, RelayError> {
    if let Some(formatter) = formatter {
        return Ok(formatter);
    }

    if let Some(formatter) = context
        .registry()
        .find_single_by_type::<dyn ExchangeFormatter>()
    {
        debug!("Using exchange formatter from registry");
        return Ok(formatter);
    }

    let mut formatter = DefaultExchangeFormatter::new()
        .with_show_exchange_id(true)
        .with_multiline(true)
        .with_show_headers(true)
        .with_style(OutputStyle::Fixed);

    let max_chars = parse_integer(context, context.global_option(keys::LOG_DEBUG_BODY_MAX_CHARS))
        .map_err(RelayError::into_runtime)?;
    if let Some(max_chars) = max_chars {
        formatter = formatter.with_max_chars(max_chars);
    }

    debug!(max_chars = formatter.max_chars(), "Created default exchange formatter");
    Ok(Arc::new(formatter))
}
