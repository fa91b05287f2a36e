use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("No type conversion from {from} to {to}")]
    NoTypeConversion { from: String, to: &'static str },

    #[error("Runtime error: {0}")]
    Runtime(#[source] Box<RelayError>),
}

impl RelayError {
    /// Wraps the error as a runtime error unless it already is one.
    pub fn into_runtime(self) -> Self {
        match self {
            RelayError::Runtime(_) => self,
            other => RelayError::Runtime(Box::new(other)),
        }
    }
}
