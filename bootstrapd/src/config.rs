//! Bootstrap configuration

use core_types::Permission;
use host_api::Arch;
use serde::{Deserialize, Serialize};
use services_logger::LogLevel;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// A bundled resource to stage under the writable root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub name: String,
    /// Re-copy even when the destination exists
    #[serde(default)]
    pub force: bool,
}

impl ResourceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            force: false,
        }
    }

    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

/// A bundled helper library staged and loaded on one architecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchLibrary {
    pub arch: Arch,
    /// Asset name, also the path under the library dir
    pub name: String,
    #[serde(default)]
    pub force: bool,
}

impl ArchLibrary {
    pub fn new(arch: Arch, name: impl Into<String>) -> Self {
        Self {
            arch,
            name: name.into(),
            force: false,
        }
    }
}

/// Bootstrap configuration
///
/// Defaults reproduce the fixed on-device layout: `<app_root>/Main/main.cfg`
/// staged from the bundle and `<app_root>/commandline.txt` as the override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Application root on shared storage
    pub app_root: PathBuf,
    /// Writable root for staged resources, relative to `app_root`
    pub main_dir: PathBuf,
    /// Bundled resources staged at every launch
    pub resources: Vec<ResourceSpec>,
    /// Parameters used when no override file is present
    pub default_params: String,
    /// Override file, relative to `app_root`
    pub override_file: PathBuf,
    /// Environment variable naming the native library directory
    pub lib_dir_env: String,
    /// Permissions the engine cannot run without
    pub required_permissions: Vec<Permission>,
    /// Architectures with bundled native libraries
    pub supported_arches: Vec<Arch>,
    /// Native library loaded once per process
    pub native_library: String,
    /// Staging dir for helper libraries, relative to `app_root`
    pub library_dir: PathBuf,
    /// Helper libraries loaded ahead of the native library
    pub arch_libraries: Vec<ArchLibrary>,
    pub log_level: LogLevel,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            app_root: PathBuf::from("/sdcard/DotQuest"),
            main_dir: PathBuf::from("Main"),
            resources: vec![ResourceSpec::new("main.cfg")],
            default_params: "quest".to_string(),
            override_file: PathBuf::from("commandline.txt"),
            lib_dir_env: "DOTQUEST_LIBDIR".to_string(),
            required_permissions: vec![Permission::StorageWrite, Permission::StorageRead],
            supported_arches: vec![Arch::Aarch64, Arch::X86_64],
            native_library: "DotQuest".to_string(),
            library_dir: PathBuf::from("app_lib"),
            arch_libraries: Vec::new(),
            log_level: LogLevel::Info,
        }
    }
}

impl BootstrapConfig {
    /// Defaults rooted somewhere else
    pub fn with_app_root(app_root: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            ..Self::default()
        }
    }

    /// Directory receiving staged resources
    pub fn writable_root(&self) -> PathBuf {
        self.app_root.join(&self.main_dir)
    }

    /// Directory receiving staged helper libraries
    pub fn library_root(&self) -> PathBuf {
        self.app_root.join(&self.library_dir)
    }

    /// Helper libraries for `arch`, in load order
    pub fn libraries_for(&self, arch: Arch) -> impl Iterator<Item = &ArchLibrary> + '_ {
        self.arch_libraries.iter().filter(move |lib| lib.arch == arch)
    }

    pub fn override_path(&self) -> PathBuf {
        self.app_root.join(&self.override_file)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Loads the config file at `path`, or the defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = BootstrapConfig::default();
        assert_eq!(config.writable_root(), PathBuf::from("/sdcard/DotQuest/Main"));
        assert_eq!(
            config.override_path(),
            PathBuf::from("/sdcard/DotQuest/commandline.txt")
        );
        assert_eq!(config.resources, vec![ResourceSpec::new("main.cfg")]);
        assert_eq!(config.default_params, "quest");
        assert_eq!(config.lib_dir_env, "DOTQUEST_LIBDIR");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BootstrapConfig::from_json(
            r#"{
                "app_root": "/tmp/dq",
                "resources": [{ "name": "main.cfg" }, { "name": "autoexec.cfg", "force": true }],
                "required_permissions": ["storage-read"],
                "log_level": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.writable_root(), PathBuf::from("/tmp/dq/Main"));
        assert_eq!(config.resources[1], ResourceSpec::new("autoexec.cfg").forced());
        assert_eq!(config.required_permissions, vec![Permission::StorageRead]);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.supported_arches, vec![Arch::Aarch64, Arch::X86_64]);
    }

    #[test]
    fn test_arch_libraries_filtered_in_order() {
        let config = BootstrapConfig::from_json(
            r#"{
                "arch_libraries": [
                    { "arch": "aarch64", "name": "aarch64/ld-musl-aarch64.so.1" },
                    { "arch": "x86_64", "name": "x86_64/libgcc_s.so.1" },
                    { "arch": "aarch64", "name": "aarch64/libgcc_s.so.1", "force": true }
                ]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = config
            .libraries_for(Arch::Aarch64)
            .map(|lib| lib.name.as_str())
            .collect();
        assert_eq!(names, vec!["aarch64/ld-musl-aarch64.so.1", "aarch64/libgcc_s.so.1"]);
        assert!(config.arch_libraries[2].force);
        assert_eq!(config.library_root(), PathBuf::from("/sdcard/DotQuest/app_lib"));
        assert!(BootstrapConfig::default().arch_libraries.is_empty());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig::load(&dir.path().join("bootstrap.json")).unwrap();
        assert_eq!(config, BootstrapConfig::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bootstrap.json");
        fs::write(&path, "{ not json").unwrap();

        let err = BootstrapConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unknown_permission_rejected() {
        assert!(BootstrapConfig::from_json(r#"{ "required_permissions": ["camera"] }"#).is_err());
    }
}
