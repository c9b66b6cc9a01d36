//! Native engine trait and create-time context

use crate::EngineError;
use core_types::{EngineHandle, LaunchParameters, SurfaceRef};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw token as produced by the native side; zero means "no engine"
pub type RawHandle = u64;

/// Host context handed to the engine at create
///
/// Tells the engine where its writable data lives and where the native
/// libraries were unpacked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineContext {
    /// Writable application root
    pub app_root: PathBuf,
    /// Directory containing the native libraries, if the host exposes one
    pub native_lib_dir: Option<PathBuf>,
}

impl EngineContext {
    pub fn new(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            native_lib_dir: None,
        }
    }

    pub fn with_native_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.native_lib_dir = Some(dir.into());
        self
    }
}

/// The native engine entry points
///
/// Every call except `create` takes the handle `create` produced. Implementations
/// must treat calls with a handle they do not recognise as no-ops; the bridge
/// itself never makes such calls.
pub trait NativeEngine {
    /// Allocates the engine instance and returns its raw token
    fn create(
        &mut self,
        context: &EngineContext,
        params: &LaunchParameters,
    ) -> Result<RawHandle, EngineError>;

    fn start(&mut self, handle: EngineHandle);

    fn resume(&mut self, handle: EngineHandle);

    /// Called before the host fully suspends
    fn pause(&mut self, handle: EngineHandle);

    fn stop(&mut self, handle: EngineHandle);

    fn destroy(&mut self, handle: EngineHandle);

    /// A surface became available for rendering
    fn surface_created(&mut self, handle: EngineHandle, surface: SurfaceRef);

    /// The attached surface changed size or format
    fn surface_changed(&mut self, handle: EngineHandle, surface: SurfaceRef);

    /// The attached surface is going away
    fn surface_destroyed(&mut self, handle: EngineHandle);
}

impl<E: NativeEngine + ?Sized> NativeEngine for Box<E> {
    fn create(
        &mut self,
        context: &EngineContext,
        params: &LaunchParameters,
    ) -> Result<RawHandle, EngineError> {
        (**self).create(context, params)
    }

    fn start(&mut self, handle: EngineHandle) {
        (**self).start(handle)
    }

    fn resume(&mut self, handle: EngineHandle) {
        (**self).resume(handle)
    }

    fn pause(&mut self, handle: EngineHandle) {
        (**self).pause(handle)
    }

    fn stop(&mut self, handle: EngineHandle) {
        (**self).stop(handle)
    }

    fn destroy(&mut self, handle: EngineHandle) {
        (**self).destroy(handle)
    }

    fn surface_created(&mut self, handle: EngineHandle, surface: SurfaceRef) {
        (**self).surface_created(handle, surface)
    }

    fn surface_changed(&mut self, handle: EngineHandle, surface: SurfaceRef) {
        (**self).surface_changed(handle, surface)
    }

    fn surface_destroyed(&mut self, handle: EngineHandle) {
        (**self).surface_destroyed(handle)
    }
}
