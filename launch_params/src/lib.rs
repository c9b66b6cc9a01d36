//! # Launch Parameters
//!
//! Resolves the parameter string handed to the engine at create.
//!
//! An operator can drop an override file next to the writable root to change
//! engine arguments without rebuilding the package. The file is read line by
//! line and the lines are joined with single spaces (each line is followed by
//! one, so the result carries a trailing space). Without a readable override
//! the built-in default is used unchanged.

use core_types::LaunchParameters;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to read override file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Joins every line of `reader`, each followed by a single space
pub fn join_lines<R: BufRead>(reader: R) -> io::Result<String> {
    let mut joined = String::new();
    for line in reader.lines() {
        joined.push_str(&line?);
        joined.push(' ');
    }
    Ok(joined)
}

/// Resolver bound to one well-known override file
#[derive(Debug, Clone)]
pub struct LaunchParameterResolver {
    override_path: PathBuf,
}

impl LaunchParameterResolver {
    pub fn new(override_path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: override_path.into(),
        }
    }

    pub fn override_path(&self) -> &Path {
        &self.override_path
    }

    /// Reads the override file if there is one
    ///
    /// `Ok(None)` when the file does not exist.
    pub fn read_override(&self) -> Result<Option<LaunchParameters>, ResolveError> {
        if !self.override_path.exists() {
            return Ok(None);
        }
        let read_err = |source: io::Error| ResolveError::Read {
            path: self.override_path.clone(),
            source,
        };
        let file = File::open(&self.override_path).map_err(read_err)?;
        let joined = join_lines(BufReader::new(file)).map_err(read_err)?;
        Ok(Some(LaunchParameters::new(joined)))
    }

    /// Override contents if present and readable, otherwise `default`
    pub fn resolve(&self, default: &str) -> LaunchParameters {
        match self.read_override() {
            Ok(Some(params)) => {
                info!(
                    path = %self.override_path.display(),
                    params = params.as_str(),
                    "using launch parameter override"
                );
                params
            }
            Ok(None) => LaunchParameters::new(default),
            Err(err) => {
                warn!(error = %err, "falling back to default launch parameters");
                LaunchParameters::new(default)
            }
        }
    }
}
