//! # Core Types
//!
//! This crate defines the fundamental types shared by the DotQuest bootstrap
//! bridge.
//!
//! ## Philosophy
//!
//! Core types are designed with these principles:
//! - **Explicit over implicit**: A native handle is a typed token, never a bare integer.
//! - **Type safety first**: Permissions, surfaces and handles cannot be confused.
//! - **No ambient state**: Everything process-wide lives in an explicit session value.
//!
//! ## Key Types
//!
//! - [`EngineHandle`]: Opaque token naming the single native engine instance
//! - [`SurfaceRef`]: Opaque reference to a host rendering surface
//! - [`SessionId`]: Identifier for one bootstrap run inside a process
//! - [`Permission`] / [`PermissionState`]: Required host permissions and their outcome
//! - [`LaunchParameters`]: Command-line style string handed to the engine at create

pub mod ids;
pub mod params;
pub mod permission;
pub mod uuid_tools;

pub use ids::{EngineHandle, SessionId, SurfaceRef};
pub use params::LaunchParameters;
pub use permission::{Permission, PermissionParseError, PermissionState};
pub use uuid_tools::new_uuid;
