//! Launch parameters handed to the native engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Command-line style parameter string passed to the engine at create
///
/// Immutable once built. The engine does its own argument splitting, so the
/// string is kept exactly as resolved (including a trailing separator when it
/// came from an override file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchParameters(String);

impl LaunchParameters {
    pub fn new(params: impl Into<String>) -> Self {
        Self(params.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for LaunchParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LaunchParameters {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LaunchParameters {
    fn from(s: String) -> Self {
        Self(s)
    }
}
