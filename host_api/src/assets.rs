//! Read-only bundled resources

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

/// Source of named read-only resources bundled with the application
pub trait AssetSource {
    /// Opens a resource as a byte stream
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Bundled resources unpacked into a directory on disk
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssets {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.root.join(name))?;
        Ok(Box::new(file))
    }
}

/// In-memory bundle, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }
}

impl AssetSource for MemoryAssets {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        match self.entries.get(name) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("asset not bundled: {}", name),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn read_all(source: &dyn AssetSource, name: &str) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        source.open(name)?.read_to_end(&mut out)?;
        Ok(out)
    }

    #[test]
    fn test_memory_assets() {
        let assets = MemoryAssets::new().with_asset("main.cfg", b"bind x quit\n".to_vec());
        assert_eq!(read_all(&assets, "main.cfg").unwrap(), b"bind x quit\n");

        let err = read_all(&assets, "missing.cfg").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_dir_assets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.cfg"), b"\x00\x01\xff").unwrap();

        let assets = DirAssets::new(dir.path());
        assert_eq!(read_all(&assets, "main.cfg").unwrap(), vec![0x00, 0x01, 0xff]);
        assert!(read_all(&assets, "other.cfg").is_err());
    }
}
