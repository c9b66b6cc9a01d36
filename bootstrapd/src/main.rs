//! # DotQuest Bootstrap Daemon
//!
//! Runs the bootstrap sequence against the dry-run engine on a desktop host.

use bootstrapd::{run_script, BootstrapConfig, Bootstrapper, HostScript, ScriptedHost};
use host_api::DirAssets;
use services_logger::{init_logging, LogLevel};
use sim_engine::SimEngine;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Command line options layered over the config file
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    app_root: Option<PathBuf>,
    assets: Option<PathBuf>,
    script: Option<String>,
    log_level: Option<LogLevel>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    let mut config = match &options.config {
        Some(path) => BootstrapConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {}", e);
            process::exit(1);
        }),
        None => BootstrapConfig::default(),
    };
    if let Some(root) = options.app_root {
        config.app_root = root;
    }
    if let Some(level) = options.log_level {
        config.log_level = level;
    }

    if let Err(e) = init_logging(config.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let script = match &options.script {
        Some(text) => HostScript::from_text(text).unwrap_or_else(|e| {
            eprintln!("Invalid host script: {}", e);
            process::exit(1);
        }),
        None => HostScript::default_session(&config.required_permissions),
    };

    let mut host = ScriptedHost::new().with_arch(env::consts::ARCH);
    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
    {
        host = host.with_native_lib_dir(dir);
    }
    let assets = DirAssets::new(options.assets.unwrap_or_else(|| PathBuf::from("assets")));

    let mut bootstrapper = Bootstrapper::new(config, host, assets, SimEngine::new());
    if let Err(e) = bootstrapper.launch() {
        eprintln!("Launch failed: {}", e);
        if bootstrapper.session().terminated().is_some() {
            process::exit(1);
        }
    }

    let summary = run_script(&mut bootstrapper, &script);

    println!("Session: {}", bootstrapper.session().id());
    println!("Steps:   {}", summary.steps);
    println!("Engine calls:");
    for call in bootstrapper.engine().calls() {
        println!("  {}", call);
    }

    if let Some(fatal) = summary.fatal {
        eprintln!("Terminated: {}", fatal);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                options.config = Some(PathBuf::from(&args[i]));
            }
            "--app-root" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --app-root".to_string());
                }
                options.app_root = Some(PathBuf::from(&args[i]));
            }
            "--assets" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --assets".to_string());
                }
                options.assets = Some(PathBuf::from(&args[i]));
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                let script_text = fs::read_to_string(&args[i])
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                options.script = Some(script_text);
            }
            "--log-level" | "-l" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --log-level".to_string());
                }
                options.log_level = Some(args[i].parse().map_err(|e| format!("{}", e))?);
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(options)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <FILE>      JSON bootstrap config");
    eprintln!("  --app-root <DIR>         Writable app root (default /sdcard/DotQuest)");
    eprintln!("  --assets <DIR>           Bundled asset directory (default ./assets)");
    eprintln!("  -s, --script <FILE>      Host event script");
    eprintln!("  -l, --log-level <LEVEL>  debug, info, warn or error (RUST_LOG overrides)");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --app-root /tmp/dq --assets demos/assets", program);
    eprintln!("  {} --script demos/foreground.dqhost --log-level debug", program);
}
