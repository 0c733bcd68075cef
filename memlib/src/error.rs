use thiserror::Error;

/// Errors raised by the engine.
///
/// All of them are local and synchronous; nothing is retried.
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration field was malformed or out of range. Raised before any level is built.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An argument to an engine operation was out of range, e.g. an empty address space
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A workload name the pattern generator doesn't recognise
    #[error("unknown access pattern `{0}`, expected one of Sequential, Random, Locality (Real)")]
    UnknownPattern(String),

    /// A trace line which is neither an address, a comment, nor blank
    #[error("couldn't parse trace line {line}: `{content}`")]
    Trace { line: usize, content: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shorthand for results carrying a [`SimError`]
pub type Result<T> = std::result::Result<T, SimError>;
