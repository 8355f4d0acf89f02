use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all cratewalk operations.
#[derive(Debug, Error, Diagnostic)]
pub enum CratewalkError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line input or configuration file.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Run `cratewalk graph --help` for the accepted options"))]
    Config { message: String },

    /// The registry could not produce a dependency list (unknown crate or version,
    /// malformed response).
    #[error("Registry lookup failed: {message}")]
    Registry { message: String },

    /// Network request failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Offline fixture data could not be read, parsed or written.
    #[error("Fixture error: {message}")]
    #[diagnostic(help("Delete the offending fixture file to have it regenerated"))]
    Fixture { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type CratewalkResult<T> = miette::Result<T>;
