//! ALGOLAB Core Types
//!
//! Steps, traces and the speed dial shared by every other crate.
//! Everything here is pure data with no I/O and no clock.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod error;
pub mod snapshot;
pub mod speed;
pub mod step;
pub mod trace;

// Re-exports
pub use algorithm::{Algorithm, AlgorithmFamily};
pub use error::{CoreError, CoreResult};
pub use snapshot::{
    ArraySnapshot, Lane, ListArenaNode, ListNodeId, ListSnapshot, Placement, SearchOutcome,
    SearchSnapshot, SelectionSnapshot, Snapshot, TableSnapshot, TraversalSnapshot,
};
pub use speed::SpeedDial;
pub use step::{Highlight, HighlightRole, Step, StructRef};
pub use trace::{Trace, TraceBuilder};
