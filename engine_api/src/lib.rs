//! # Engine API
//!
//! This crate defines the interface between the bootstrap bridge and the
//! native engine module.
//!
//! ## Philosophy
//!
//! The native engine is an opaque component. The bridge only ever talks to
//! it through a fixed, handle-based set of entry points:
//! - `create(context, parameters) -> handle`
//! - `start`, `resume`, `pause`, `stop`, `destroy` on a handle
//! - `surface_created`, `surface_changed`, `surface_destroyed` on a handle
//!
//! ## Design Goals
//!
//! 1. **Testability**: The whole contract can be replaced by a recording double
//! 2. **Explicitness**: Every call is named by an [`EngineCall`] value
//! 3. **Type safety**: Handles and surfaces are strongly typed
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - The engine itself (rendering, audio, simulation)
//! - A specific binding mechanism (JNI, C ABI, in-process)

pub mod call;
pub mod engine;
pub mod error;

pub use call::EngineCall;
pub use engine::{EngineContext, NativeEngine, RawHandle};
pub use error::EngineError;
