//! Diagnostic listing of the writable root

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walks `root` depth-first and returns every entry below it
///
/// Each path is logged at debug level. Unreadable directories are skipped,
/// as is a missing root. Entries within a directory come back sorted.
pub fn list_tree(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
    paths.sort();

    for path in paths {
        debug!(path = %path.display(), "tree");
        let is_dir = path.is_dir();
        out.push(path.clone());
        if is_dir {
            walk(&path, out);
        }
    }
}
