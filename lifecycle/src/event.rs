//! Host events and their outcomes

use core_types::{LaunchParameters, SurfaceRef};
use engine_api::{EngineCall, EngineContext, EngineError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A host lifecycle or surface callback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Allocate the engine with resolved parameters
    Create {
        context: EngineContext,
        params: LaunchParameters,
    },
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
    /// A surface appeared, or the attached one changed
    SurfaceAttach(SurfaceRef),
    /// The attached surface is going away
    SurfaceDetach,
}

impl LifecycleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Create { .. } => "create",
            LifecycleEvent::Start => "start",
            LifecycleEvent::Resume => "resume",
            LifecycleEvent::Pause => "pause",
            LifecycleEvent::Stop => "stop",
            LifecycleEvent::Destroy => "destroy",
            LifecycleEvent::SurfaceAttach(_) => "surface-attach",
            LifecycleEvent::SurfaceDetach => "surface-detach",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an event produced no engine call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The engine has not been created (or was destroyed)
    NoHandle,
    /// `create` arrived while an engine already exists
    AlreadyCreated,
    /// `detach` arrived with no surface attached
    NotAttached,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NoHandle => write!(f, "no engine handle"),
            IgnoreReason::AlreadyCreated => write!(f, "engine already created"),
            IgnoreReason::NotAttached => write!(f, "no surface attached"),
        }
    }
}

/// Outcome of dispatching one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The engine received these calls, in this order
    Forwarded(Vec<EngineCall>),
    /// Dropped without touching the engine
    Ignored(IgnoreReason),
    /// `create` was forwarded but produced no engine
    Failed(EngineError),
}

impl Transition {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Transition::Forwarded(_))
    }

    /// Engine calls made, empty unless forwarded
    pub fn calls(&self) -> &[EngineCall] {
        match self {
            Transition::Forwarded(calls) => calls,
            _ => &[],
        }
    }
}
