//! Host error types

use core_types::Permission;
use thiserror::Error;

/// Recoverable failures reported by the host
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Failed to set environment variable {key}: {reason}")]
    SetEnv { key: String, reason: String },

    #[error("Native library not found: {0}")]
    LibraryNotFound(String),

    #[error("Failed to load native library {name}: {reason}")]
    LibraryLoad { name: String, reason: String },
}

/// Conditions that end the process
///
/// There is no recovery path from any of these; the host terminates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FatalError {
    #[error("Permission {permission} denied; grant it with `{hint}`")]
    PermissionDenied { permission: Permission, hint: String },

    #[error("Unsupported host architecture: [{0}]")]
    UnsupportedArch(String),

    /// The engine's own native library could not be loaded
    #[error("Native library {name} could not be loaded: {reason}")]
    NativeLibrary { name: String, reason: String },
}
