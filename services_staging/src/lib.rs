//! # Staging Service
//!
//! Materializes read-only bundled resources into the writable application
//! root.
//!
//! ## Philosophy
//!
//! - **Once per installation**: A resource already on disk is left alone
//!   unless a re-copy is forced
//! - **Bytes in, bytes out**: Copies are raw stream copies, no decoding
//! - **Best effort**: A failed resource is logged and skipped; the rest of
//!   the bootstrap carries on

pub mod stager;
pub mod tree;

pub use stager::{copy_stream, ResourceStager, StageError, StageOutcome, StagedResource};
pub use tree::list_tree;
