//! The lifecycle state machine

use crate::{IgnoreReason, LifecycleEvent, Transition};
use core_types::{EngineHandle, LaunchParameters, SurfaceRef};
use engine_api::{EngineCall, EngineContext, EngineError, NativeEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Where the engine is in its lifecycle
///
/// `Started` carries the resumed/paused sub-state, which only exists while
/// started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No engine yet
    #[default]
    Uninitialized,
    /// Engine allocated, not started
    Created,
    /// Engine started; `resumed` is false until the first resume and after pause
    Started { resumed: bool },
    Stopped,
    /// Engine destroyed; no handle
    Destroyed,
}

impl EnginePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnginePhase::Uninitialized => "uninitialized",
            EnginePhase::Created => "created",
            EnginePhase::Started { resumed: true } => "resumed",
            EnginePhase::Started { resumed: false } => "started",
            EnginePhase::Stopped => "stopped",
            EnginePhase::Destroyed => "destroyed",
        }
    }

    /// Checks if the engine exists in this phase
    pub fn has_engine(&self) -> bool {
        !matches!(self, EnginePhase::Uninitialized | EnginePhase::Destroyed)
    }
}

/// Owner of the native engine handle
///
/// No other component creates, replaces or destroys the handle. The bridge
/// holds no reference to the engine itself; the caller passes it to
/// [`dispatch`](Self::dispatch), the same way every event passes through one
/// transition function.
#[derive(Debug, Clone, Default)]
pub struct LifecycleBridge {
    handle: Option<EngineHandle>,
    surface: Option<SurfaceRef>,
    phase: EnginePhase,
}

impl LifecycleBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live engine handle, if one has been created
    pub fn handle(&self) -> Option<EngineHandle> {
        self.handle
    }

    pub fn is_created(&self) -> bool {
        self.handle.is_some()
    }

    /// The attached surface, if any
    pub fn surface(&self) -> Option<SurfaceRef> {
        self.surface
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Restores the initial state
    ///
    /// Used on relaunch inside the same process so nothing from the previous
    /// run leaks into the next one. Makes no engine calls.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies one host event
    pub fn dispatch<E: NativeEngine>(
        &mut self,
        engine: &mut E,
        event: LifecycleEvent,
    ) -> Transition {
        debug!(%event, phase = self.phase.as_str(), "lifecycle event");

        let transition = match event {
            LifecycleEvent::Create { context, params } => self.create(engine, &context, params),
            LifecycleEvent::Start => self.forward(engine, |engine, h| {
                engine.start(h);
                EngineCall::Start(h)
            }),
            LifecycleEvent::Resume => self.forward(engine, |engine, h| {
                engine.resume(h);
                EngineCall::Resume(h)
            }),
            LifecycleEvent::Pause => self.forward(engine, |engine, h| {
                engine.pause(h);
                EngineCall::Pause(h)
            }),
            LifecycleEvent::Stop => self.forward(engine, |engine, h| {
                engine.stop(h);
                EngineCall::Stop(h)
            }),
            LifecycleEvent::Destroy => self.destroy(engine),
            LifecycleEvent::SurfaceAttach(surface) => self.attach(engine, surface),
            LifecycleEvent::SurfaceDetach => self.detach(engine),
        };

        match &transition {
            Transition::Forwarded(calls) => {
                for call in calls {
                    debug!(%call, "forwarded");
                }
                self.advance_phase(calls);
            }
            Transition::Ignored(reason) => debug!(%reason, "event ignored"),
            Transition::Failed(err) => error!(error = %err, "engine create failed"),
        }

        transition
    }

    fn create<E: NativeEngine>(
        &mut self,
        engine: &mut E,
        context: &EngineContext,
        params: LaunchParameters,
    ) -> Transition {
        if self.handle.is_some() {
            return Transition::Ignored(IgnoreReason::AlreadyCreated);
        }

        let raw = match engine.create(context, &params) {
            Ok(raw) => raw,
            Err(err) => return Transition::Failed(err),
        };

        match EngineHandle::from_raw(raw) {
            Some(handle) => {
                info!(%handle, params = params.as_str(), "engine created");
                self.handle = Some(handle);
                Transition::Forwarded(vec![EngineCall::Create { params }])
            }
            None => Transition::Failed(EngineError::NullHandle),
        }
    }

    fn forward<E, F>(&mut self, engine: &mut E, call: F) -> Transition
    where
        E: NativeEngine,
        F: FnOnce(&mut E, EngineHandle) -> EngineCall,
    {
        match self.handle {
            Some(handle) => Transition::Forwarded(vec![call(engine, handle)]),
            None => Transition::Ignored(IgnoreReason::NoHandle),
        }
    }

    fn attach<E: NativeEngine>(&mut self, engine: &mut E, surface: SurfaceRef) -> Transition {
        let Some(handle) = self.handle else {
            return Transition::Ignored(IgnoreReason::NoHandle);
        };

        // A second attach is an update of the one surface, never a second attachment.
        let call = if self.surface.is_some() {
            engine.surface_changed(handle, surface);
            EngineCall::SurfaceChanged(handle, surface)
        } else {
            engine.surface_created(handle, surface);
            EngineCall::SurfaceCreated(handle, surface)
        };
        self.surface = Some(surface);
        Transition::Forwarded(vec![call])
    }

    fn detach<E: NativeEngine>(&mut self, engine: &mut E) -> Transition {
        let Some(handle) = self.handle else {
            return Transition::Ignored(IgnoreReason::NoHandle);
        };
        if self.surface.take().is_none() {
            return Transition::Ignored(IgnoreReason::NotAttached);
        }

        engine.surface_destroyed(handle);
        Transition::Forwarded(vec![EngineCall::SurfaceDestroyed(handle)])
    }

    fn destroy<E: NativeEngine>(&mut self, engine: &mut E) -> Transition {
        let Some(handle) = self.handle.take() else {
            return Transition::Ignored(IgnoreReason::NoHandle);
        };

        let mut calls = Vec::with_capacity(2);
        // Surface teardown strictly before engine teardown.
        if self.surface.take().is_some() {
            engine.surface_destroyed(handle);
            calls.push(EngineCall::SurfaceDestroyed(handle));
        }
        engine.destroy(handle);
        calls.push(EngineCall::Destroy(handle));

        info!(%handle, "engine destroyed");
        Transition::Forwarded(calls)
    }

    fn advance_phase(&mut self, calls: &[EngineCall]) {
        for call in calls {
            self.phase = match call {
                EngineCall::Create { .. } => EnginePhase::Created,
                EngineCall::Start(_) => EnginePhase::Started { resumed: false },
                EngineCall::Resume(_) => EnginePhase::Started { resumed: true },
                EngineCall::Pause(_) => EnginePhase::Started { resumed: false },
                EngineCall::Stop(_) => EnginePhase::Stopped,
                EngineCall::Destroy(_) => EnginePhase::Destroyed,
                EngineCall::SurfaceCreated(..)
                | EngineCall::SurfaceChanged(..)
                | EngineCall::SurfaceDestroyed(_) => self.phase,
            };
        }
    }
}
