//! # Host Abstraction Layer
//!
//! This crate defines the traits through which the bootstrap bridge reaches
//! the host application shell.
//!
//! ## Philosophy
//!
//! **The host is a collaborator, not a dependency.**
//!
//! Permission dialogs, bundled assets, native library loading and process
//! exit all belong to the host. The bridge consumes them only through the
//! traits here, so every bootstrap path runs under `cargo test` with an
//! in-memory host.
//!
//! ## Design Principles
//!
//! 1. **Trait-based**: All host operations go through [`HostPlatform`] and [`AssetSource`]
//! 2. **Signals, not UI**: Permissions are consumed as grant/deny answers
//! 3. **Fatal is explicit**: Terminating the process is a host call carrying a [`FatalError`]

pub mod arch;
pub mod assets;
pub mod error;
pub mod platform;

pub use arch::Arch;
pub use assets::{AssetSource, DirAssets, MemoryAssets};
pub use error::{FatalError, HostError};
pub use platform::HostPlatform;
