//! Modeline support: `key=value` trait declarations written in a comment
//! line of a route source, e.g.
//!
//! ```text
//! // relay: dependency=mvn:org.example:client:1.2
//! ```
//!
//! Each recognised declaration becomes a [`ContextCustomizer`] that is
//! applied when the owning context is configured.

mod dependency;
mod parser;
mod traits;

#[allow(deprecated)]
pub use dependency::{DependencyStrategy, DependencyTrait};
pub use parser::{ModelineParser, MODELINE_START};
pub use traits::{ContextCustomizer, ModelineTrait, Resource};
