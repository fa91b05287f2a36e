//! Core types shared by the exchange helpers.
//!
//! - [`Exchange`] - the unit of work inspected by the helpers
//! - [`Value`] - dynamically typed payload, header and property values
//! - [`Failure`] - a captured error with its backtrace
//! - [`TypeConverter`] - the conversion seam used for lenient coercion
//! - [`RelayContext`] - registry, global options and converter shared by exchanges

pub mod context;
pub mod conversions;
pub mod errors;
pub mod failure;
pub mod keys;
pub mod registry;
pub mod structs;

pub use context::{GlobalOptions, RelayContext, RelayContextBuilder};
pub use conversions::{DefaultTypeConverter, TypeConverter};
pub use errors::RelayError;
pub use failure::Failure;
pub use registry::Registry;
pub use structs::{Exchange, Headers, Message, Value};
