//! Deterministic fault injection for engine creation
//!
//! ## Example
//!
//! ```
//! use sim_engine::fault_injection::{EngineFault, FaultPlan};
//!
//! let plan = FaultPlan::new()
//!     .with_create_fault(EngineFault::NullHandle)
//!     .with_create_fault(EngineFault::FailCreate { reason: "no gpu".to_string() });
//! assert_eq!(plan.pending(), 2);
//! ```

use std::collections::VecDeque;

/// A fault applied to one `create` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineFault {
    /// Report an error from the native side
    FailCreate { reason: String },
    /// Succeed but hand back the null token
    NullHandle,
}

/// Queue of faults, consumed one per `create`
#[derive(Debug, Clone, Default)]
pub struct FaultPlan {
    create_faults: VecDeque<EngineFault>,
}

impl FaultPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_fault(mut self, fault: EngineFault) -> Self {
        self.create_faults.push_back(fault);
        self
    }

    /// Faults not yet consumed
    pub fn pending(&self) -> usize {
        self.create_faults.len()
    }

    pub(crate) fn next_create_fault(&mut self) -> Option<EngineFault> {
        self.create_faults.pop_front()
    }
}
