//! Identifiers for engine-side and session-side entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use uuid::Uuid;

use crate::new_uuid;

/// Opaque token naming the native engine instance
///
/// The native side hands back a raw numeric token from `create`. A zero token
/// means creation did not produce an engine, so it can never be turned into an
/// `EngineHandle`: holding a handle is proof the engine was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngineHandle(NonZeroU64);

impl EngineHandle {
    /// Wraps a raw token returned by the native side
    ///
    /// Returns `None` for the null token.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw token for passing back across the native boundary
    pub fn raw(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Engine({:#x})", self.0.get())
    }
}

/// Opaque reference to a host rendering surface
///
/// The host owns the surface; the bridge only forwards the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceRef(u64);

impl SurfaceRef {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Surface({})", self.0)
    }
}

/// Identifier for one bootstrap run
///
/// A relaunch inside the same process gets a new session id, which keeps log
/// lines from different runs apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID
    pub fn new() -> Self {
        Self(new_uuid())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_token_is_not_a_handle() {
        assert!(EngineHandle::from_raw(0).is_none());
    }

    #[test]
    fn test_handle_round_trips_raw_token() {
        let handle = EngineHandle::from_raw(0xdead_beef).unwrap();
        assert_eq!(handle.raw(), 0xdead_beef);
    }

    #[test]
    fn test_handle_display() {
        let handle = EngineHandle::from_raw(16).unwrap();
        assert_eq!(handle.to_string(), "Engine(0x10)");
    }

    #[test]
    fn test_surface_ref() {
        let surface = SurfaceRef::new(7);
        assert_eq!(surface.id(), 7);
        assert_eq!(format!("{}", surface), "Surface(7)");
    }

    #[test]
    fn test_session_id_creation() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("Session("));
    }

    #[test]
    fn test_handle_serde() {
        let handle = EngineHandle::from_raw(42).unwrap();
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, "42");
        let back: EngineHandle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, handle);
        assert!(serde_json::from_str::<EngineHandle>("0").is_err());
    }
}
