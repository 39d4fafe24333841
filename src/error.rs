// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the evolution engine.

use std::fmt;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types.
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Config(String),
    /// Model selection or construction error
    Model(ModelError),
    /// Validation error
    Validation(ValidationError),
    /// Numerical failure inside a matrix routine
    Numerical(String),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Model(e) => write!(f, "Model error: {}", e),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::Numerical(msg) => write!(f, "Numerical error: {}", msg),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Model(e) => Some(e),
            Error::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ModelError> for Error {
    fn from(e: ModelError) -> Self {
        Error::Model(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Hamiltonian model errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Model name or experiment index not recognized
    UnsupportedModel(String),
    /// Parameter tuple length does not match the model
    InvalidParameterArity {
        model: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnsupportedModel(name) => write!(f, "Unsupported model: {}", name),
            ModelError::InvalidParameterArity {
                model,
                expected,
                actual,
            } => write!(
                f,
                "Model '{}' expects {} parameters, got {}",
                model, expected, actual
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// Validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field validation failed
    Field { field: String, message: String },
    /// Shape of an input is inconsistent with the model or configured dimension
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::DimensionMismatch {
                what,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Dimension mismatch for {}: expected {}, got {}",
                    what, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
