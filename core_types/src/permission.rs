//! Required host permissions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A permission the engine cannot run without
///
/// The host maps these onto its own identifiers; only the abstract names
/// live here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Read access to shared storage
    StorageRead,
    /// Write access to shared storage
    StorageWrite,
}

impl Permission {
    /// Every permission the bridge knows about
    pub const ALL: [Permission; 2] = [Permission::StorageRead, Permission::StorageWrite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::StorageRead => "storage-read",
            Permission::StorageWrite => "storage-write",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown permission: {0}")]
pub struct PermissionParseError(pub String);

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "storage-read" => Ok(Permission::StorageRead),
            "storage-write" => Ok(Permission::StorageWrite),
            other => Err(PermissionParseError(other.to_string())),
        }
    }
}

/// Outcome of a permission as far as the bridge knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PermissionState {
    /// Not yet answered by the host
    #[default]
    Unknown,
    /// Granted by the host
    Granted,
    /// Refused by the host; the only way out is process exit
    Denied,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }

    /// Checks if the state can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, PermissionState::Denied)
    }
}
