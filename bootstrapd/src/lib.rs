//! # DotQuest Bootstrap Daemon
//!
//! This crate orchestrates bringing the native engine up and keeping it in
//! step with the host.
//!
//! ## Philosophy
//!
//! - **Host owns the process**: The bootstrapper reacts to host callbacks, it never drives them
//! - **Order is the contract**: platform check → library load → staging →
//!   parameters → permissions → create, each step before the next
//! - **One session value**: Every piece of process-wide state lives in
//!   [`ProcessSession`], never in statics
//! - **Deterministic mode is first-class**: A scripted host replays callback
//!   sequences for tests and dry runs
//!
//! ## Responsibilities
//!
//! The bootstrapper:
//! - Rejects unsupported host architectures
//! - Loads the native library once per process
//! - Stages bundled resources and resolves launch parameters
//! - Waits for the permission gate, then creates the engine exactly once
//! - Forwards every later lifecycle and surface callback to the bridge
//!
//! ## Non-Responsibilities
//!
//! The bootstrapper does NOT:
//! - Render, mix audio or simulate anything
//! - Show permission dialogs (the host does)
//! - Run more than one engine instance

pub mod bootstrapper;
pub mod config;
pub mod host_script;
pub mod scripted_host;
pub mod session;

pub use bootstrapper::{BootstrapError, Bootstrapper, HostEvent};
pub use config::{ArchLibrary, BootstrapConfig, ConfigError, ResourceSpec};
pub use host_script::{run_script, HostScript, HostScriptError, RunSummary, ScriptStep};
pub use scripted_host::ScriptedHost;
pub use session::ProcessSession;
