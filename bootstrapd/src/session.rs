//! Process-wide bootstrap state

use core_types::{LaunchParameters, Permission, SessionId};
use host_api::FatalError;
use lifecycle::LifecycleBridge;
use services_permissions::PermissionGate;
use services_staging::StagedResource;

/// Everything the bootstrap keeps for the lifetime of the process
///
/// Owned by the [`Bootstrapper`](crate::Bootstrapper). On relaunch inside the
/// same process [`reset`](Self::reset) restores engine-facing state, while
/// permission answers and the library-loaded flag are kept, as they are facts
/// about the process rather than about one run.
#[derive(Debug)]
pub struct ProcessSession {
    id: SessionId,
    pub(crate) gate: PermissionGate,
    pub(crate) bridge: LifecycleBridge,
    pub(crate) library_loaded: bool,
    pub(crate) launch_params: Option<LaunchParameters>,
    /// Set once a launch has prepared everything `create` needs
    pub(crate) awaiting_create: bool,
    pub(crate) staged: Vec<StagedResource>,
    pub(crate) launches: u32,
    pub(crate) terminated: Option<FatalError>,
}

impl ProcessSession {
    pub fn new(required: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id: SessionId::new(),
            gate: PermissionGate::new(required),
            bridge: LifecycleBridge::new(),
            library_loaded: false,
            launch_params: None,
            awaiting_create: false,
            staged: Vec::new(),
            launches: 0,
            terminated: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn bridge(&self) -> &LifecycleBridge {
        &self.bridge
    }

    pub fn library_loaded(&self) -> bool {
        self.library_loaded
    }

    /// Parameters resolved for the current run
    pub fn launch_params(&self) -> Option<&LaunchParameters> {
        self.launch_params.as_ref()
    }

    /// Whether the current launch still waits to create the engine
    pub fn awaiting_create(&self) -> bool {
        self.awaiting_create
    }

    /// Resources staged during the current run
    pub fn staged(&self) -> &[StagedResource] {
        &self.staged
    }

    /// Number of launches in this process, relaunches included
    pub fn launches(&self) -> u32 {
        self.launches
    }

    /// The fatal condition that ended the process, if any
    pub fn terminated(&self) -> Option<&FatalError> {
        self.terminated.as_ref()
    }

    /// Drops what one run prepared; only a new launch can create again
    pub fn end_run(&mut self) {
        self.awaiting_create = false;
        self.launch_params = None;
        self.staged.clear();
    }

    /// Restores per-run state to its initial values
    pub fn reset(&mut self) {
        self.id = SessionId::new();
        self.bridge.reset();
        self.end_run();
    }
}
