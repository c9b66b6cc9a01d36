//! # Simulated Engine
//!
//! A recording stand-in for the native engine module.
//!
//! ## Philosophy
//!
//! - **Deterministic**: Handles come from a monotonic counter, never from addresses
//! - **Observable**: Every call is recorded in arrival order
//! - **Faithful to the contract**: Calls addressed to a handle it does not own
//!   are accepted as no-ops and counted as stale
//!
//! It backs the dry-run mode of `bootstrapd` and every ordering test in the
//! workspace.

pub mod fault_injection;

use core_types::{EngineHandle, LaunchParameters, SurfaceRef};
use engine_api::{EngineCall, EngineContext, EngineError, NativeEngine, RawHandle};
use fault_injection::{EngineFault, FaultPlan};
use tracing::{debug, warn};

/// Recording engine double
#[derive(Debug)]
pub struct SimEngine {
    next_token: RawHandle,
    live: Option<EngineHandle>,
    calls: Vec<EngineCall>,
    stale_calls: usize,
    last_context: Option<EngineContext>,
    faults: FaultPlan,
}

impl SimEngine {
    pub fn new() -> Self {
        Self {
            next_token: 1,
            live: None,
            calls: Vec::new(),
            stale_calls: 0,
            last_context: None,
            faults: FaultPlan::new(),
        }
    }

    /// Installs a fault plan consulted on every `create`
    pub fn with_fault_plan(mut self, plan: FaultPlan) -> Self {
        self.faults = plan;
        self
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Entry point names received so far, in order
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.iter().map(EngineCall::name).collect()
    }

    /// Number of recorded calls to the named entry point
    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| c.name() == name).count()
    }

    /// The instance currently alive, if any
    pub fn live_handle(&self) -> Option<EngineHandle> {
        self.live
    }

    /// Calls that named a handle other than the live one
    pub fn stale_calls(&self) -> usize {
        self.stale_calls
    }

    /// Context passed to the most recent `create`
    pub fn last_context(&self) -> Option<&EngineContext> {
        self.last_context.as_ref()
    }

    fn record(&mut self, call: EngineCall) {
        if let Some(handle) = call.handle() {
            if self.live != Some(handle) {
                warn!(%handle, call = call.name(), "call on stale engine handle");
                self.stale_calls += 1;
            }
        }
        debug!(%call, "engine call");
        self.calls.push(call);
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEngine for SimEngine {
    fn create(
        &mut self,
        context: &EngineContext,
        params: &LaunchParameters,
    ) -> Result<RawHandle, EngineError> {
        self.calls.push(EngineCall::Create {
            params: params.clone(),
        });
        self.last_context = Some(context.clone());

        match self.faults.next_create_fault() {
            Some(EngineFault::FailCreate { reason }) => {
                return Err(EngineError::CreateFailed(reason));
            }
            Some(EngineFault::NullHandle) => return Ok(0),
            None => {}
        }

        let token = self.next_token;
        self.next_token += 1;
        self.live = EngineHandle::from_raw(token);
        Ok(token)
    }

    fn start(&mut self, handle: EngineHandle) {
        self.record(EngineCall::Start(handle));
    }

    fn resume(&mut self, handle: EngineHandle) {
        self.record(EngineCall::Resume(handle));
    }

    fn pause(&mut self, handle: EngineHandle) {
        self.record(EngineCall::Pause(handle));
    }

    fn stop(&mut self, handle: EngineHandle) {
        self.record(EngineCall::Stop(handle));
    }

    fn destroy(&mut self, handle: EngineHandle) {
        self.record(EngineCall::Destroy(handle));
        if self.live == Some(handle) {
            self.live = None;
        }
    }

    fn surface_created(&mut self, handle: EngineHandle, surface: SurfaceRef) {
        self.record(EngineCall::SurfaceCreated(handle, surface));
    }

    fn surface_changed(&mut self, handle: EngineHandle, surface: SurfaceRef) {
        self.record(EngineCall::SurfaceChanged(handle, surface));
    }

    fn surface_destroyed(&mut self, handle: EngineHandle) {
        self.record(EngineCall::SurfaceDestroyed(handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EngineContext {
        EngineContext::new("/tmp/dotquest")
    }

    #[test]
    fn test_create_issues_monotonic_tokens() {
        let mut engine = SimEngine::new();
        let params = LaunchParameters::from("quest");

        let first = engine.create(&ctx(), &params).unwrap();
        engine.destroy(EngineHandle::from_raw(first).unwrap());
        let second = engine.create(&ctx(), &params).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(engine.stale_calls(), 0);
    }

    #[test]
    fn test_calls_recorded_in_order() {
        let mut engine = SimEngine::new();
        let raw = engine
            .create(&ctx(), &LaunchParameters::from("quest"))
            .unwrap();
        let h = EngineHandle::from_raw(raw).unwrap();

        engine.start(h);
        engine.resume(h);
        engine.surface_created(h, SurfaceRef::new(1));
        engine.pause(h);

        assert_eq!(
            engine.call_names(),
            vec!["create", "start", "resume", "surfaceCreated", "pause"]
        );
        assert_eq!(engine.count("pause"), 1);
        assert_eq!(engine.last_context(), Some(&ctx()));
    }

    #[test]
    fn test_stale_handle_is_counted_not_fatal() {
        let mut engine = SimEngine::new();
        let bogus = EngineHandle::from_raw(99).unwrap();

        engine.pause(bogus);

        assert_eq!(engine.stale_calls(), 1);
        assert_eq!(engine.count("pause"), 1);
    }

    #[test]
    fn test_destroy_clears_live_handle() {
        let mut engine = SimEngine::new();
        let raw = engine.create(&ctx(), &LaunchParameters::from("")).unwrap();
        let h = EngineHandle::from_raw(raw).unwrap();
        assert_eq!(engine.live_handle(), Some(h));

        engine.destroy(h);
        assert_eq!(engine.live_handle(), None);
    }
}
