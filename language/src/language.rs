//! Helpers used by expression languages, loggers and predicates to inspect
//! an [`Exchange`](internals::Exchange): the captured failure, prefix and
//! suffix tests, dates taken from headers or properties, environment
//! lookups and the exchange formatter.

pub mod compare;
pub mod context_helper;
pub mod dates;
pub mod env;
pub mod exception;
pub mod formatter;
pub mod provision;
pub mod text;

#[cfg(test)]
mod tests_utils;

pub use compare::{ends_with, starts_with};
pub use context_helper::parse_integer;
pub use dates::{
    command_key, date_from_exchange_created, date_from_exchange_property, date_from_file_last_modified,
    date_from_header, DateFallback,
};
pub use env::sysenv;
pub use exception::{exception, exception_message, exception_stacktrace};
pub use formatter::{DefaultExchangeFormatter, ExchangeFormatter, OutputStyle};
pub use provision::get_or_create_exchange_formatter;
pub use text::escape_quotes;
