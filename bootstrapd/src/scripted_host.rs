//! In-process host used by the daemon and by tests
//!
//! Holds permissions in memory, records prompts, and captures the
//! environment variables and libraries the bootstrapper asks for.

use core_types::Permission;
use host_api::{FatalError, HostError, HostPlatform};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A host shell driven by script or test code
#[derive(Debug, Clone)]
pub struct ScriptedHost {
    arch: String,
    package: String,
    held: BTreeSet<Permission>,
    prompts: Vec<Permission>,
    native_lib_dir: Option<PathBuf>,
    env: BTreeMap<String, PathBuf>,
    loaded: Vec<String>,
    missing_libraries: BTreeSet<String>,
    terminated: Option<FatalError>,
    fail_env: bool,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            arch: "aarch64".to_string(),
            package: "com.dotquest.quest".to_string(),
            held: BTreeSet::new(),
            prompts: Vec::new(),
            native_lib_dir: None,
            env: BTreeMap::new(),
            loaded: Vec::new(),
            missing_libraries: BTreeSet::new(),
            terminated: None,
            fail_env: false,
        }
    }

    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Permission held before launch
    pub fn with_held(mut self, permission: Permission) -> Self {
        self.held.insert(permission);
        self
    }

    pub fn with_native_lib_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.native_lib_dir = Some(dir.into());
        self
    }

    /// Makes `set_env` fail
    pub fn with_failing_env(mut self) -> Self {
        self.fail_env = true;
        self
    }

    /// Makes `load_library` fail for `name`
    pub fn with_missing_library(mut self, name: impl Into<String>) -> Self {
        self.missing_libraries.insert(name.into());
        self
    }

    pub fn prompts(&self) -> &[Permission] {
        &self.prompts
    }

    pub fn env(&self, key: &str) -> Option<&Path> {
        self.env.get(key).map(PathBuf::as_path)
    }

    pub fn loaded_libraries(&self) -> &[String] {
        &self.loaded
    }

    pub fn terminated(&self) -> Option<&FatalError> {
        self.terminated.as_ref()
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPlatform for ScriptedHost {
    fn arch(&self) -> String {
        self.arch.clone()
    }

    fn package_name(&self) -> &str {
        &self.package
    }

    fn is_granted(&self, permission: Permission) -> bool {
        self.held.contains(&permission)
    }

    fn request_permission(&mut self, permission: Permission) {
        info!(%permission, "permission prompt");
        self.prompts.push(permission);
    }

    fn native_library_dir(&self) -> Option<PathBuf> {
        self.native_lib_dir.clone()
    }

    fn set_env(&mut self, key: &str, value: &Path) -> Result<(), HostError> {
        if self.fail_env {
            return Err(HostError::SetEnv {
                key: key.to_string(),
                reason: "environment is read-only".to_string(),
            });
        }
        self.env.insert(key.to_string(), value.to_path_buf());
        Ok(())
    }

    fn load_library(&mut self, name: &str) -> Result<(), HostError> {
        if self.missing_libraries.contains(name) {
            return Err(HostError::LibraryNotFound(name.to_string()));
        }
        self.loaded.push(name.to_string());
        Ok(())
    }

    fn terminate(&mut self, fatal: &FatalError) {
        warn!(error = %fatal, "host terminating");
        self.terminated = Some(fatal.clone());
    }
}
