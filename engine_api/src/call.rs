//! Named record of a single call into the engine

use core_types::{EngineHandle, LaunchParameters, SurfaceRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One call across the native boundary
///
/// The bridge reports what it forwarded as a list of these, and test doubles
/// record them in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCall {
    Create { params: LaunchParameters },
    Start(EngineHandle),
    Resume(EngineHandle),
    Pause(EngineHandle),
    Stop(EngineHandle),
    Destroy(EngineHandle),
    SurfaceCreated(EngineHandle, SurfaceRef),
    SurfaceChanged(EngineHandle, SurfaceRef),
    SurfaceDestroyed(EngineHandle),
}

impl EngineCall {
    /// Entry point name, as the native side spells it
    pub fn name(&self) -> &'static str {
        match self {
            EngineCall::Create { .. } => "create",
            EngineCall::Start(_) => "start",
            EngineCall::Resume(_) => "resume",
            EngineCall::Pause(_) => "pause",
            EngineCall::Stop(_) => "stop",
            EngineCall::Destroy(_) => "destroy",
            EngineCall::SurfaceCreated(..) => "surfaceCreated",
            EngineCall::SurfaceChanged(..) => "surfaceChanged",
            EngineCall::SurfaceDestroyed(_) => "surfaceDestroyed",
        }
    }

    /// The handle the call was addressed to, if any
    pub fn handle(&self) -> Option<EngineHandle> {
        match self {
            EngineCall::Create { .. } => None,
            EngineCall::Start(h)
            | EngineCall::Resume(h)
            | EngineCall::Pause(h)
            | EngineCall::Stop(h)
            | EngineCall::Destroy(h)
            | EngineCall::SurfaceCreated(h, _)
            | EngineCall::SurfaceChanged(h, _)
            | EngineCall::SurfaceDestroyed(h) => Some(*h),
        }
    }
}

impl fmt::Display for EngineCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineCall::Create { params } => write!(f, "create({:?})", params.as_str()),
            EngineCall::SurfaceCreated(h, s) | EngineCall::SurfaceChanged(h, s) => {
                write!(f, "{}({}, {})", self.name(), h, s)
            }
            other => match other.handle() {
                Some(h) => write!(f, "{}({})", other.name(), h),
                None => write!(f, "{}()", other.name()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_names() {
        let h = EngineHandle::from_raw(1).unwrap();
        assert_eq!(EngineCall::Pause(h).name(), "pause");
        assert_eq!(EngineCall::SurfaceDestroyed(h).name(), "surfaceDestroyed");
        assert_eq!(
            EngineCall::Create {
                params: LaunchParameters::from("quest")
            }
            .name(),
            "create"
        );
    }

    #[test]
    fn test_call_handle() {
        let h = EngineHandle::from_raw(3).unwrap();
        assert_eq!(EngineCall::Stop(h).handle(), Some(h));
        assert_eq!(
            EngineCall::Create {
                params: LaunchParameters::from("")
            }
            .handle(),
            None
        );
    }

    #[test]
    fn test_call_display() {
        let h = EngineHandle::from_raw(2).unwrap();
        let s = SurfaceRef::new(9);
        assert_eq!(
            EngineCall::SurfaceCreated(h, s).to_string(),
            "surfaceCreated(Engine(0x2), Surface(9))"
        );
        assert_eq!(EngineCall::Start(h).to_string(), "start(Engine(0x2))");
    }
}
