//! Daemon Flow Tests
//!
//! Runs the bootstrapper the way the daemon binary does: bundled assets on
//! disk, a host script, and the dry-run engine.

use bootstrapd::{run_script, BootstrapConfig, Bootstrapper, HostScript, ScriptedHost};
use core_types::Permission;
use host_api::DirAssets;
use sim_engine::SimEngine;
use std::fs;
use tempfile::TempDir;

fn bundled_assets() -> TempDir {
    let dir = TempDir::new().expect("Failed to create asset dir");
    fs::write(dir.path().join("main.cfg"), "seta com_hunkmegs \"256\"\n")
        .expect("Failed to write asset");
    dir
}

#[test]
fn test_demo_script_runs_to_completion() {
    let assets = bundled_assets();
    let root = TempDir::new().expect("Failed to create app root");
    let script = HostScript::from_text(include_str!("../../demos/foreground.dqhost"))
        .expect("Demo script should parse");

    let mut boot = Bootstrapper::new(
        BootstrapConfig::with_app_root(root.path()),
        ScriptedHost::new(),
        DirAssets::new(assets.path()),
        SimEngine::new(),
    );
    boot.launch().expect("Launch should succeed");
    let summary = run_script(&mut boot, &script);

    assert_eq!(summary.fatal, None);
    assert_eq!(summary.steps, script.len());
    assert_eq!(
        boot.engine().call_names(),
        vec![
            "create",
            "start",
            "resume",
            "surfaceCreated",
            "surfaceChanged",
            "pause",
            "surfaceDestroyed",
            "stop",
            "destroy",
            "create",
            "start",
            "destroy",
        ]
    );
    assert_eq!(boot.engine().stale_calls(), 0);
    assert_eq!(
        fs::read_to_string(root.path().join("Main/main.cfg")).expect("Staged file missing"),
        "seta com_hunkmegs \"256\"\n"
    );
}

#[test]
fn test_config_file_drives_bootstrap() {
    let assets = bundled_assets();
    fs::write(assets.path().join("autoexec.cfg"), "exec main.cfg\n").expect("write");
    let root = TempDir::new().expect("Failed to create app root");
    let config_path = root.path().join("bootstrap.json");
    fs::write(
        &config_path,
        format!(
            r#"{{
                "app_root": {:?},
                "resources": [{{ "name": "main.cfg" }}, {{ "name": "autoexec.cfg", "force": true }}],
                "default_params": "quest +set developer 1",
                "required_permissions": ["storage-read"]
            }}"#,
            root.path()
        ),
    )
    .expect("Failed to write config");

    let config = BootstrapConfig::load(&config_path).expect("Config should load");
    let mut boot = Bootstrapper::new(
        config,
        ScriptedHost::new().with_held(Permission::StorageRead),
        DirAssets::new(assets.path()),
        SimEngine::new(),
    );
    boot.launch().expect("Launch should succeed");

    assert!(root.path().join("Main/autoexec.cfg").exists());
    assert_eq!(
        boot.session().launch_params().map(|p| p.as_str()),
        Some("quest +set developer 1")
    );
    assert_eq!(boot.engine().count("create"), 1);
}
