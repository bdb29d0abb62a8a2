//! Error handling for numgraph-rs
//!
//! This module defines the crate-level error type and a Result alias.
//! Subsystem errors ([`CompileError`], [`RuntimeError`]) convert into it.

use crate::compiler::CompileError;
use crate::runtime::RuntimeError;
use thiserror::Error;

/// Main error type for numgraph-rs operations
#[derive(Error, Debug)]
pub enum NumGraphError {
    /// Graph compilation failed
    #[error("Compile error: {0}")]
    Compile(#[from] CompileError),

    /// Program execution failed
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<NumGraphError>,
    },
}

impl NumGraphError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        NumGraphError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

/// Result type alias for numgraph-rs operations
pub type Result<T> = std::result::Result<T, NumGraphError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<NumGraphError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
