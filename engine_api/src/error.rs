//! Engine error types

use thiserror::Error;

/// Errors that can occur when talking to the native engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The native side refused to create an engine instance
    #[error("Engine creation failed: {0}")]
    CreateFailed(String),

    /// The native side returned the null token from `create`
    #[error("Engine returned a null handle")]
    NullHandle,
}
