//! Resource stager

use host_api::{AssetSource, HostError, HostPlatform};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StageError {
    #[error("Failed to open bundled resource {name}: {source}")]
    OpenAsset { name: String, source: io::Error },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to copy into {}: {source}", path.display())]
    Copy { path: PathBuf, source: io::Error },

    #[error("Failed to load staged library: {0}")]
    Load(#[from] HostError),
}

/// What a staging call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Destination already existed and the copy was not forced
    AlreadyPresent,
    /// Resource copied in full
    Copied { bytes: u64 },
}

/// Record of one staged resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedResource {
    pub name: String,
    pub destination: PathBuf,
    /// Whether the destination holds the resource after the call
    pub staged: bool,
}

/// Copies every byte from `reader` into `writer` until the source is exhausted
pub fn copy_stream<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let copied = io::copy(reader, writer)?;
    writer.flush()?;
    Ok(copied)
}

/// Stages bundled resources under a writable root
#[derive(Debug)]
pub struct ResourceStager<'a, A: AssetSource> {
    assets: &'a A,
    root: PathBuf,
}

impl<'a, A: AssetSource> ResourceStager<'a, A> {
    pub fn new(assets: &'a A, root: impl Into<PathBuf>) -> Self {
        Self {
            assets,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copies the bundled resource `name` to `destination`
    ///
    /// Without `force`, an existing destination makes this a no-op. Otherwise
    /// missing parent directories are created and the destination is
    /// overwritten.
    pub fn stage(
        &self,
        name: &str,
        destination: &Path,
        force: bool,
    ) -> Result<StageOutcome, StageError> {
        if !force && destination.exists() {
            debug!(name, path = %destination.display(), "resource already staged");
            return Ok(StageOutcome::AlreadyPresent);
        }

        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|source| StageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;

        let mut reader = self.assets.open(name).map_err(|source| StageError::OpenAsset {
            name: name.to_string(),
            source,
        })?;
        let copy_err = |source: io::Error| StageError::Copy {
            path: destination.to_path_buf(),
            source,
        };
        // The destination only ever holds a complete copy; a failed copy
        // drops the temp file and leaves any previous content in place.
        let mut staging = NamedTempFile::new_in(parent).map_err(copy_err)?;
        let bytes = copy_stream(&mut reader, staging.as_file_mut()).map_err(copy_err)?;
        staging
            .persist(destination)
            .map_err(|err| copy_err(err.error))?;

        info!(name, bytes, path = %destination.display(), "resource staged");
        Ok(StageOutcome::Copied { bytes })
    }

    /// Stages `name` to the same relative path under the root, logging failures
    pub fn stage_into(&self, name: &str, force: bool) -> StagedResource {
        let destination = self.root.join(name);
        let staged = match self.stage(name, &destination, force) {
            Ok(_) => true,
            Err(err) => {
                warn!(name, error = %err, "staging failed, continuing");
                false
            }
        };
        StagedResource {
            name: name.to_string(),
            destination,
            staged,
        }
    }

    /// Stages a bundled native library, then asks the host to load it
    pub fn stage_and_load<H: HostPlatform>(
        &self,
        host: &mut H,
        name: &str,
        force: bool,
    ) -> Result<PathBuf, StageError> {
        let destination = self.root.join(name);
        self.stage(name, &destination, force)?;
        host.load_library(&destination.to_string_lossy())?;
        info!(name, "staged library loaded");
        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Permission;
    use host_api::{FatalError, MemoryAssets};
    use std::fs::read;
    use tempfile::TempDir;

    fn assets() -> MemoryAssets {
        MemoryAssets::new()
            .with_asset("main.cfg", b"seta r_mode 3\n".to_vec())
            .with_asset("aarch64/libgcc_s.so.1", vec![0x7f, b'E', b'L', b'F', 0x00, 0xff])
    }

    #[test]
    fn test_stage_creates_parents_and_copies() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());
        let dest = dir.path().join("Main").join("nested").join("main.cfg");

        let outcome = stager.stage("main.cfg", &dest, false).unwrap();

        assert_eq!(outcome, StageOutcome::Copied { bytes: 14 });
        assert_eq!(read(&dest).unwrap(), b"seta r_mode 3\n");
    }

    #[test]
    fn test_stage_is_idempotent_without_force() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());
        let dest = dir.path().join("main.cfg");
        fs::write(&dest, b"user edited").unwrap();

        let outcome = stager.stage("main.cfg", &dest, false).unwrap();

        assert_eq!(outcome, StageOutcome::AlreadyPresent);
        assert_eq!(read(&dest).unwrap(), b"user edited");
    }

    #[test]
    fn test_force_recopies() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());
        let dest = dir.path().join("main.cfg");
        fs::write(&dest, b"user edited, and longer than the bundled file").unwrap();

        stager.stage("main.cfg", &dest, true).unwrap();

        assert_eq!(read(&dest).unwrap(), b"seta r_mode 3\n");
    }

    /// Yields a few bytes of every asset, then fails
    struct TruncatingAssets;

    impl AssetSource for TruncatingAssets {
        fn open(&self, _name: &str) -> io::Result<Box<dyn Read + '_>> {
            let broken = io::Error::new(io::ErrorKind::UnexpectedEof, "asset truncated");
            Ok(Box::new((&b"HALF"[..]).chain(FailingReader(Some(broken)))))
        }
    }

    struct FailingReader(Option<io::Error>);

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            match self.0.take() {
                Some(err) => Err(err),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_failed_copy_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("Main").join("main.cfg");

        let err = ResourceStager::new(&TruncatingAssets, dir.path())
            .stage("main.cfg", &dest, false)
            .unwrap_err();
        assert!(matches!(err, StageError::Copy { .. }));
        assert!(!dest.exists());
        assert_eq!(fs::read_dir(dest.parent().unwrap()).unwrap().count(), 0);

        let assets = assets();
        let outcome = ResourceStager::new(&assets, dir.path())
            .stage("main.cfg", &dest, false)
            .unwrap();
        assert_eq!(outcome, StageOutcome::Copied { bytes: 14 });
        assert_eq!(read(&dest).unwrap(), b"seta r_mode 3\n");
    }

    #[test]
    fn test_failed_forced_copy_keeps_previous_content() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("main.cfg");
        fs::write(&dest, b"user edited").unwrap();

        assert!(ResourceStager::new(&TruncatingAssets, dir.path())
            .stage("main.cfg", &dest, true)
            .is_err());

        assert_eq!(read(&dest).unwrap(), b"user edited");
    }

    #[test]
    fn test_binary_content_copied_verbatim() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());

        let record = stager.stage_into("aarch64/libgcc_s.so.1", false);

        assert!(record.staged);
        assert_eq!(
            read(&record.destination).unwrap(),
            vec![0x7f, b'E', b'L', b'F', 0x00, 0xff]
        );
    }

    #[test]
    fn test_missing_asset_is_error() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());

        let err = stager
            .stage("absent.cfg", &dir.path().join("absent.cfg"), false)
            .unwrap_err();
        assert!(matches!(err, StageError::OpenAsset { .. }));
    }

    #[test]
    fn test_stage_into_logs_and_continues() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());

        let failed = stager.stage_into("absent.cfg", false);
        let ok = stager.stage_into("main.cfg", false);

        assert!(!failed.staged);
        assert!(ok.staged);
        assert_eq!(ok.destination, dir.path().join("main.cfg"));
    }

    #[test]
    fn test_copy_stream_exhausts_source() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let mut reader = data.as_slice();
        let mut out = Vec::new();

        let copied = copy_stream(&mut reader, &mut out).unwrap();

        assert_eq!(copied, 10_000);
        assert_eq!(out, data);
        assert!(reader.is_empty());
    }

    #[derive(Default)]
    struct LoadingHost {
        loaded: Vec<String>,
    }

    impl HostPlatform for LoadingHost {
        fn arch(&self) -> String {
            "aarch64".to_string()
        }
        fn package_name(&self) -> &str {
            "com.dotquest.test"
        }
        fn is_granted(&self, _permission: Permission) -> bool {
            true
        }
        fn request_permission(&mut self, _permission: Permission) {}
        fn native_library_dir(&self) -> Option<PathBuf> {
            None
        }
        fn set_env(&mut self, _key: &str, _value: &Path) -> Result<(), HostError> {
            Ok(())
        }
        fn load_library(&mut self, name: &str) -> Result<(), HostError> {
            self.loaded.push(name.to_string());
            Ok(())
        }
        fn terminate(&mut self, _fatal: &FatalError) {}
    }

    #[test]
    fn test_stage_and_load() {
        let dir = TempDir::new().unwrap();
        let assets = assets();
        let stager = ResourceStager::new(&assets, dir.path());
        let mut host = LoadingHost::default();

        let path = stager
            .stage_and_load(&mut host, "aarch64/libgcc_s.so.1", false)
            .unwrap();

        assert!(path.exists());
        assert_eq!(host.loaded, vec![path.to_string_lossy().to_string()]);
    }
}
