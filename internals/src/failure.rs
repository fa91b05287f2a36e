//! Captured errors carried by an exchange.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

type DynError = dyn Error + Send + Sync + 'static;

/// Plain message error used by [`Failure::from_message`].
#[derive(Error, Debug)]
#[error("{0}")]
pub struct MessageError(String);

/// A shared handle on an error captured while processing an exchange.
///
/// Cloning is cheap and clones compare equal: equality is identity of the
/// underlying error, not structural equality of its message.
#[derive(Clone)]
pub struct Failure {
    error: Arc<DynError>,
    type_name: &'static str,
    backtrace: Arc<Backtrace>,
}

impl Failure {
    /// Wraps `error`, capturing a backtrace when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` allow it.
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            error: Arc::new(error),
            type_name: std::any::type_name::<E>(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Human readable message, `None` when the error renders as an empty string.
    pub fn message(&self) -> Option<String> {
        let message = self.error.to_string();
        if message.is_empty() {
            None
        } else {
            Some(message)
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn error(&self) -> &DynError {
        self.error.as_ref()
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Writes the error, its captured frames and its cause chain to `out`.
    ///
    /// ```text
    /// my_crate::ParseError: unexpected token
    ///     0: my_crate::parse
    ///        at ./src/lib.rs:10:5
    /// Caused by: invalid digit found in string
    /// ```
    pub fn write_stack_trace<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "{self}")?;

        if self.backtrace.status() == BacktraceStatus::Captured {
            for line in self.backtrace.to_string().lines() {
                writeln!(out, "    {line}")?;
            }
        }

        let mut cause = self.error.source();
        while let Some(err) = cause {
            writeln!(out, "Caused by: {err}")?;
            cause = err.source();
        }
        Ok(())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {}", self.type_name, message),
            None => write!(f, "{}", self.type_name),
        }
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("type_name", &self.type_name)
            .field("message", &self.message())
            .finish()
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }
}
