//! # Lifecycle
//!
//! The bridge between host lifecycle callbacks and the native engine handle.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: Host callbacks become [`LifecycleEvent`] values
//! - **Testability first**: The transition function runs against any [`NativeEngine`],
//!   so event sequences are unit-testable with a recording engine
//! - **One-shot forwarding**: Each event produces at most one burst of engine
//!   calls; nothing is retried here
//! - **Drop, don't crash**: Events the engine cannot receive yet are ignored
//!
//! ## Core Concepts
//!
//! - `LifecycleBridge`: Owns the engine handle and the surface attachment
//! - `EnginePhase`: `Uninitialized → Created → {Started, Stopped} → Destroyed`
//! - `Transition`: What a single event did to the engine
//!
//! [`NativeEngine`]: engine_api::NativeEngine

pub mod bridge;
pub mod event;

pub use bridge::{EnginePhase, LifecycleBridge};
pub use event::{IgnoreReason, LifecycleEvent, Transition};
