//! Lifecycle Test Utilities
//!
//! Shared setup for the cross-crate ordering tests.
//!
//! ## Test Philosophy
//!
//! - **Ordering is the contract**: assertions are on the exact engine call sequence
//! - **Every interleaving**: permission answers are tried in all orders
//! - **Real filesystem**: staging and overrides run against a temp app root

use bootstrapd::{BootstrapConfig, Bootstrapper, ScriptedHost};
use core_types::Permission;
use host_api::MemoryAssets;
use sim_engine::SimEngine;
use tempfile::TempDir;

/// Bootstrapper wired to in-memory doubles
pub type TestBootstrapper = Bootstrapper<ScriptedHost, MemoryAssets, SimEngine>;

/// Contents of the bundled `main.cfg` used by every test
pub const MAIN_CFG: &[u8] = b"seta com_hunkmegs \"256\"\n";

/// Bundled assets holding `main.cfg`
pub fn bundled_assets() -> MemoryAssets {
    MemoryAssets::new().with_asset("main.cfg", MAIN_CFG.to_vec())
}

/// Creates a bootstrapper rooted in a fresh temp dir
///
/// The dir must outlive the bootstrapper, so both are returned.
pub fn test_bootstrap(host: ScriptedHost) -> (TempDir, TestBootstrapper) {
    let dir = TempDir::new().expect("Failed to create app root");
    let boot = Bootstrapper::new(
        BootstrapConfig::with_app_root(dir.path()),
        host,
        bundled_assets(),
        SimEngine::new(),
    );
    (dir, boot)
}

/// Host that already holds every permission the default config requires
pub fn granted_host() -> ScriptedHost {
    Permission::ALL
        .iter()
        .fold(ScriptedHost::new(), |host, p| host.with_held(*p))
}

/// Launched bootstrapper with a live engine
pub fn running_bootstrap() -> (TempDir, TestBootstrapper) {
    let (dir, mut boot) = test_bootstrap(granted_host());
    boot.launch().expect("Launch should succeed");
    assert!(boot.session().bridge().is_created());
    (dir, boot)
}

/// Every ordering of `items`
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}
