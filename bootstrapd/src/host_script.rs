//! # Host Event Scripts
//!
//! Line-based scripts that stand in for the host shell's callbacks.
//!
//! ## Format
//!
//! One step per line:
//! - Permission answers: `grant storage-read`, `deny storage-write`
//! - Lifecycle callbacks: `start`, `resume`, `pause`, `stop`, `destroy`
//! - Surfaces: `surface 7` (attach or change), `surface-lost`
//! - `relaunch`: the host re-runs the create callback in the same process
//! - Comments: `# ...`, on their own line or after a step
//!
//! ## Example
//!
//! ```text
//! grant storage-write
//! grant storage-read   # engine is created here
//! start
//! resume
//! surface 1
//! ```

use crate::bootstrapper::{BootstrapError, Bootstrapper, HostEvent};
use core_types::{Permission, SurfaceRef};
use engine_api::NativeEngine;
use host_api::{AssetSource, FatalError, HostPlatform};
use thiserror::Error;
use tracing::{debug, warn};

/// Host script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostScriptError {
    #[error("Unknown command at line {line}: {command}")]
    UnknownCommand { line: usize, command: String },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// A single scripted host action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Grant(Permission),
    Deny(Permission),
    Host(HostEvent),
    Relaunch,
}

/// Parsed host script
#[derive(Debug, Clone, Default)]
pub struct HostScript {
    steps: Vec<ScriptStep>,
}

impl HostScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, HostScriptError> {
        let mut steps = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = match raw.split_once('#') {
                Some((before, _)) => before,
                None => raw,
            }
            .trim();
            if line.is_empty() {
                continue;
            }
            steps.push(Self::parse_line(line, index + 1)?);
        }

        if steps.is_empty() {
            return Err(HostScriptError::EmptyScript);
        }

        Ok(Self { steps })
    }

    /// Grants every required permission, then walks one full foreground cycle
    pub fn default_session(required: &[Permission]) -> Self {
        let mut steps: Vec<ScriptStep> = required.iter().copied().map(ScriptStep::Grant).collect();
        steps.extend(
            [
                HostEvent::Start,
                HostEvent::Resume,
                HostEvent::SurfaceAttach(SurfaceRef::new(1)),
                HostEvent::Pause,
                HostEvent::SurfaceDetach,
                HostEvent::Stop,
                HostEvent::Destroy,
            ]
            .into_iter()
            .map(ScriptStep::Host),
        );
        Self { steps }
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn parse_line(line: &str, line_num: usize) -> Result<ScriptStep, HostScriptError> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();
        let argument = words.next();

        let step = match (command.as_str(), argument) {
            ("grant", Some(arg)) => ScriptStep::Grant(Self::parse_permission(arg, line_num)?),
            ("deny", Some(arg)) => ScriptStep::Deny(Self::parse_permission(arg, line_num)?),
            ("surface", Some(arg)) => {
                let id = arg.parse::<u64>().map_err(|e| HostScriptError::ParseError {
                    line: line_num,
                    message: format!("invalid surface id {:?}: {}", arg, e),
                })?;
                ScriptStep::Host(HostEvent::SurfaceAttach(SurfaceRef::new(id)))
            }
            ("grant" | "deny" | "surface", None) => {
                return Err(HostScriptError::ParseError {
                    line: line_num,
                    message: format!("`{}` needs an argument", command),
                })
            }
            ("start", None) => ScriptStep::Host(HostEvent::Start),
            ("resume", None) => ScriptStep::Host(HostEvent::Resume),
            ("pause", None) => ScriptStep::Host(HostEvent::Pause),
            ("stop", None) => ScriptStep::Host(HostEvent::Stop),
            ("destroy", None) => ScriptStep::Host(HostEvent::Destroy),
            ("surface-lost", None) => ScriptStep::Host(HostEvent::SurfaceDetach),
            ("relaunch", None) => ScriptStep::Relaunch,
            _ => {
                return Err(HostScriptError::UnknownCommand {
                    line: line_num,
                    command: line.to_string(),
                })
            }
        };

        if words.next().is_some() {
            return Err(HostScriptError::ParseError {
                line: line_num,
                message: format!("trailing input after `{}`", command),
            });
        }

        Ok(step)
    }

    fn parse_permission(arg: &str, line_num: usize) -> Result<Permission, HostScriptError> {
        arg.parse::<Permission>()
            .map_err(|e| HostScriptError::ParseError {
                line: line_num,
                message: e.to_string(),
            })
    }
}

/// What happened while a script ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps delivered to the bootstrapper
    pub steps: usize,
    /// Fatal condition that stopped the run, if any
    pub fatal: Option<FatalError>,
}

/// Delivers each step to the bootstrapper in order
///
/// Stops at the first fatal condition. Engine creation failures are logged
/// and the run continues, as the host would keep sending callbacks.
pub fn run_script<H, A, E>(
    bootstrapper: &mut Bootstrapper<H, A, E>,
    script: &HostScript,
) -> RunSummary
where
    H: HostPlatform,
    A: AssetSource,
    E: NativeEngine,
{
    let mut summary = RunSummary::default();

    for step in script.steps() {
        debug!(?step, "script step");
        let result = match *step {
            ScriptStep::Grant(permission) => bootstrapper.on_permission_result(permission, true),
            ScriptStep::Deny(permission) => bootstrapper.on_permission_result(permission, false),
            ScriptStep::Host(event) => bootstrapper.handle(event).map(|_| ()),
            ScriptStep::Relaunch => bootstrapper.relaunch(),
        };

        match result {
            Ok(()) => summary.steps += 1,
            Err(BootstrapError::Engine(err)) => {
                warn!(error = %err, "engine error, continuing");
                summary.steps += 1;
            }
            Err(BootstrapError::Fatal(fatal)) => {
                summary.steps += 1;
                summary.fatal = Some(fatal);
                break;
            }
            Err(BootstrapError::Terminated) => {
                summary.fatal = bootstrapper.session().terminated().cloned();
                break;
            }
        }
    }

    summary
}
