//! # Process Bootstrapper
//!
//! Runs the launch sequence and forwards host callbacks afterwards.

use crate::config::BootstrapConfig;
use crate::session::ProcessSession;
use core_types::{Permission, SurfaceRef};
use engine_api::{EngineContext, EngineError, NativeEngine};
use host_api::{Arch, AssetSource, FatalError, HostPlatform};
use launch_params::LaunchParameterResolver;
use lifecycle::{LifecycleEvent, Transition};
use services_permissions::Readiness;
use services_staging::{list_tree, ResourceStager};
use std::fs;
use thiserror::Error;
use tracing::{debug, error, info, warn, Level};

/// Bootstrap error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BootstrapError {
    /// The process has been told to terminate
    #[error("Fatal: {0}")]
    Fatal(FatalError),

    /// The engine could not be created; later events are ignored
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A fatal error already ended this process
    #[error("Process terminated")]
    Terminated,
}

/// Host callbacks that arrive after launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
    /// Surface created, or changed while attached
    SurfaceAttach(SurfaceRef),
    SurfaceDetach,
}

impl From<HostEvent> for LifecycleEvent {
    fn from(event: HostEvent) -> Self {
        match event {
            HostEvent::Start => LifecycleEvent::Start,
            HostEvent::Resume => LifecycleEvent::Resume,
            HostEvent::Pause => LifecycleEvent::Pause,
            HostEvent::Stop => LifecycleEvent::Stop,
            HostEvent::Destroy => LifecycleEvent::Destroy,
            HostEvent::SurfaceAttach(surface) => LifecycleEvent::SurfaceAttach(surface),
            HostEvent::SurfaceDetach => LifecycleEvent::SurfaceDetach,
        }
    }
}

/// Drives one engine through the host's lifecycle
///
/// Generic over the host, the bundled asset source and the engine so the
/// whole sequence runs against in-memory doubles.
pub struct Bootstrapper<H, A, E> {
    config: BootstrapConfig,
    host: H,
    assets: A,
    engine: E,
    session: ProcessSession,
}

impl<H, A, E> Bootstrapper<H, A, E>
where
    H: HostPlatform,
    A: AssetSource,
    E: NativeEngine,
{
    pub fn new(config: BootstrapConfig, host: H, assets: A, engine: E) -> Self {
        let session = ProcessSession::new(config.required_permissions.iter().copied());
        Self {
            config,
            host,
            assets,
            engine,
            session,
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn session(&self) -> &ProcessSession {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Runs the launch sequence (the host's create callback)
    ///
    /// Returns once permissions are requested. If every permission is already
    /// held the engine is created before this returns; otherwise creation
    /// waits for [`on_permission_result`](Self::on_permission_result).
    pub fn launch(&mut self) -> Result<(), BootstrapError> {
        self.ensure_running()?;

        if self.session.launches > 0 {
            self.prepare_relaunch();
        }
        self.session.launches += 1;
        info!(session = %self.session.id(), launch = self.session.launches, "launch");

        let arch = self.check_platform()?;
        self.load_native_libraries(arch)?;
        self.prepare();
        self.session.awaiting_create = true;

        let readiness = self.session.gate.request_missing(&mut self.host);
        self.on_readiness(readiness)
    }

    /// Same as [`launch`](Self::launch), named for the host relaunching
    /// inside one process
    pub fn relaunch(&mut self) -> Result<(), BootstrapError> {
        self.launch()
    }

    /// Records the host's answer to a permission request
    pub fn on_permission_result(
        &mut self,
        permission: Permission,
        granted: bool,
    ) -> Result<(), BootstrapError> {
        self.ensure_running()?;
        let readiness = self.session.gate.on_result(permission, granted);
        self.on_readiness(readiness)
    }

    /// Forwards a host callback to the lifecycle bridge
    ///
    /// `Destroy` also ends the run: nothing prepared for it survives, and only
    /// a new launch creates an engine again.
    pub fn handle(&mut self, event: HostEvent) -> Result<Transition, BootstrapError> {
        self.ensure_running()?;
        info!(?event, "host event");
        let transition = self
            .session
            .bridge
            .dispatch(&mut self.engine, LifecycleEvent::from(event));
        if event == HostEvent::Destroy {
            self.session.end_run();
        }
        Ok(transition)
    }

    fn ensure_running(&self) -> Result<(), BootstrapError> {
        match self.session.terminated {
            Some(_) => Err(BootstrapError::Terminated),
            None => Ok(()),
        }
    }

    fn prepare_relaunch(&mut self) {
        if self.session.bridge.is_created() {
            warn!("relaunch with a live engine, destroying it first");
            let transition = self
                .session
                .bridge
                .dispatch(&mut self.engine, LifecycleEvent::Destroy);
            if let Transition::Failed(err) = transition {
                error!(error = %err, "destroy before relaunch failed");
            }
        }
        self.session.reset();
    }

    fn check_platform(&mut self) -> Result<Arch, BootstrapError> {
        let arch = self.host.arch();
        match arch.parse::<Arch>() {
            Ok(known) if self.config.supported_arches.contains(&known) => {
                debug!(arch = %known, "platform supported");
                Ok(known)
            }
            _ => Err(self.fatal(FatalError::UnsupportedArch(arch))),
        }
    }

    /// Stages and loads the helper libraries for `arch`, then the engine's
    /// own library, once per process
    ///
    /// A helper that fails is skipped. The engine cannot run without its own
    /// library, so that failure is fatal.
    fn load_native_libraries(&mut self, arch: Arch) -> Result<(), BootstrapError> {
        if self.session.library_loaded {
            return Ok(());
        }

        let stager = ResourceStager::new(&self.assets, self.config.library_root());
        for library in self.config.libraries_for(arch) {
            if let Err(err) = stager.stage_and_load(&mut self.host, &library.name, library.force) {
                warn!(library = %library.name, error = %err, "helper library skipped");
            }
        }

        match self.host.load_library(&self.config.native_library) {
            Ok(()) => {
                info!(library = %self.config.native_library, "native library loaded");
                self.session.library_loaded = true;
                Ok(())
            }
            Err(err) => {
                let fatal = FatalError::NativeLibrary {
                    name: self.config.native_library.clone(),
                    reason: err.to_string(),
                };
                Err(self.fatal(fatal))
            }
        }
    }

    /// Directories, staging and parameters; nothing here is fatal
    fn prepare(&mut self) {
        let root = self.config.writable_root();
        if let Err(err) = fs::create_dir_all(&root) {
            warn!(path = %root.display(), error = %err, "failed to create writable root");
        }

        let stager = ResourceStager::new(&self.assets, &root);
        self.session.staged = self
            .config
            .resources
            .iter()
            .map(|spec| stager.stage_into(&spec.name, spec.force))
            .collect();

        if tracing::enabled!(Level::DEBUG) {
            list_tree(&root);
        }

        let resolver = LaunchParameterResolver::new(self.config.override_path());
        self.session.launch_params = Some(resolver.resolve(&self.config.default_params));
    }

    fn on_readiness(&mut self, readiness: Readiness) -> Result<(), BootstrapError> {
        match readiness {
            Readiness::Pending => {
                debug!(
                    granted = self.session.gate.granted_count(),
                    "waiting for permissions"
                );
                Ok(())
            }
            Readiness::Denied(permission) => {
                let hint = format!("pm grant {} {}", self.host.package_name(), permission);
                error!("{}", hint);
                Err(self.fatal(FatalError::PermissionDenied { permission, hint }))
            }
            // Every answer re-evaluates the gate; only the first Ready of a
            // prepared launch creates.
            Readiness::Ready if !self.session.awaiting_create => {
                debug!(
                    created = self.session.bridge.is_created(),
                    "permissions ready, no launch waiting to create"
                );
                Ok(())
            }
            Readiness::Ready => self.create(),
        }
    }

    fn create(&mut self) -> Result<(), BootstrapError> {
        self.session.awaiting_create = false;
        let Some(params) = self.session.launch_params.clone() else {
            warn!("launch prepared no parameters, engine not created");
            return Ok(());
        };

        let lib_dir = self.host.native_library_dir();
        match &lib_dir {
            Some(dir) => {
                if let Err(err) = self.host.set_env(&self.config.lib_dir_env, dir) {
                    warn!(error = %err, "continuing without library dir variable");
                }
            }
            None => debug!("host exposes no native library dir"),
        }

        let mut context = EngineContext::new(&self.config.app_root);
        context.native_lib_dir = lib_dir;

        match self
            .session
            .bridge
            .dispatch(&mut self.engine, LifecycleEvent::Create { context, params })
        {
            Transition::Failed(err) => Err(BootstrapError::Engine(err)),
            _ => Ok(()),
        }
    }

    fn fatal(&mut self, fatal: FatalError) -> BootstrapError {
        error!(error = %fatal, "fatal bootstrap condition, terminating");
        self.host.terminate(&fatal);
        self.session.terminated = Some(fatal.clone());
        BootstrapError::Fatal(fatal)
    }
}
