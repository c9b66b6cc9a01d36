//! # Permission Gate
//!
//! Tracks the fixed set of host permissions the engine needs and decides
//! when the bridge may proceed to engine creation.
//!
//! ## Philosophy
//!
//! - **All or nothing**: Ready only when every required permission is granted
//! - **Denial is terminal**: A denied permission never recovers; the process exits
//! - **Request/response**: Requests are fire-and-forget; answers arrive later and
//!   are correlated by [`Permission`]
//! - **Re-entrant**: Readiness can be recomputed after every answer
//!
//! The gate only reports readiness. Whoever acts on it must also check that
//! the engine does not exist yet, which is what makes creation happen once no
//! matter how many answers arrive.

use core_types::{Permission, PermissionState};
use host_api::HostPlatform;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Result of evaluating the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// At least one permission is still unanswered
    Pending,
    /// Every required permission is granted
    Ready,
    /// This permission was refused
    Denied(Permission),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Gate over a fixed set of required permissions
///
/// The set is fixed at construction. Gate state survives a relaunch within
/// the same process; only engine state is reset.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    states: BTreeMap<Permission, PermissionState>,
    requested: BTreeSet<Permission>,
}

impl PermissionGate {
    pub fn new(required: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            states: required
                .into_iter()
                .map(|p| (p, PermissionState::Unknown))
                .collect(),
            requested: BTreeSet::new(),
        }
    }

    /// The required permissions, in a stable order
    pub fn required(&self) -> impl Iterator<Item = Permission> + '_ {
        self.states.keys().copied()
    }

    pub fn state(&self, permission: Permission) -> Option<PermissionState> {
        self.states.get(&permission).copied()
    }

    /// Asks the host for one permission unless it is already settled
    ///
    /// A permission the host already holds is recorded as granted without a
    /// prompt. A permission already asked for is not asked again.
    pub fn request<H: HostPlatform>(&mut self, host: &mut H, permission: Permission) {
        let Some(state) = self.states.get_mut(&permission) else {
            warn!(%permission, "request for permission outside the required set");
            return;
        };
        if *state != PermissionState::Unknown {
            return;
        }

        if host.is_granted(permission) {
            debug!(%permission, "permission already held");
            *state = PermissionState::Granted;
        } else if self.requested.insert(permission) {
            info!(%permission, "requesting permission");
            host.request_permission(permission);
        }
    }

    /// Requests every required permission that is not yet granted
    pub fn request_missing<H: HostPlatform>(&mut self, host: &mut H) -> Readiness {
        let required: Vec<Permission> = self.required().collect();
        for permission in required {
            self.request(host, permission);
        }
        self.check_ready()
    }

    /// Records the host's answer for a permission
    pub fn on_result(&mut self, permission: Permission, granted: bool) -> Readiness {
        match self.states.get_mut(&permission) {
            Some(state) if state.is_terminal() => {
                debug!(%permission, "answer after denial ignored");
            }
            Some(state) => {
                *state = if granted {
                    PermissionState::Granted
                } else {
                    PermissionState::Denied
                };
                self.requested.remove(&permission);
                info!(%permission, granted, "permission answered");
            }
            None => debug!(%permission, "answer for permission outside the required set"),
        }
        self.check_ready()
    }

    /// Recomputes readiness
    ///
    /// A denial anywhere wins over everything else. Otherwise the result is a
    /// short-circuit AND over the required permissions.
    pub fn check_ready(&self) -> Readiness {
        if let Some((permission, _)) = self.states.iter().find(|(_, s)| s.is_terminal()) {
            return Readiness::Denied(*permission);
        }
        if self.states.values().all(PermissionState::is_granted) {
            Readiness::Ready
        } else {
            Readiness::Pending
        }
    }

    pub fn is_ready(&self) -> bool {
        self.check_ready().is_ready()
    }

    /// Number of required permissions granted so far
    pub fn granted_count(&self) -> usize {
        self.states.values().filter(|s| s.is_granted()).count()
    }
}
