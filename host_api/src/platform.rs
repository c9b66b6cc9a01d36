//! The host platform trait

use crate::{FatalError, HostError};
use core_types::Permission;
use std::path::{Path, PathBuf};

/// Services the host application shell provides to the bridge
///
/// Host callbacks are serialized, so implementations never see concurrent
/// calls.
///
/// # Examples
///
/// ```
/// use core_types::Permission;
/// use host_api::HostPlatform;
///
/// fn missing<H: HostPlatform>(host: &H, required: &[Permission]) -> Vec<Permission> {
///     required.iter().copied().filter(|p| !host.is_granted(*p)).collect()
/// }
/// ```
pub trait HostPlatform {
    /// Architecture identifier as the host reports it (e.g. `aarch64`)
    fn arch(&self) -> String;

    /// Package name, used in operator hints
    fn package_name(&self) -> &str;

    /// Whether the host already holds the permission
    fn is_granted(&self, permission: Permission) -> bool;

    /// Asks the host to prompt for a permission
    ///
    /// Fire-and-forget: the answer arrives later through the bootstrapper's
    /// permission-result callback.
    fn request_permission(&mut self, permission: Permission);

    /// Directory holding the unpacked native libraries
    fn native_library_dir(&self) -> Option<PathBuf>;

    fn set_env(&mut self, key: &str, value: &Path) -> Result<(), HostError>;

    fn load_library(&mut self, name: &str) -> Result<(), HostError>;

    /// Ends the process
    ///
    /// Real hosts do not return from this. Test hosts record the error and
    /// return, and the bridge stops reacting to further events.
    fn terminate(&mut self, fatal: &FatalError);
}
