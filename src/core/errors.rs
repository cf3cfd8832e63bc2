/*!
 * Error Types
 * Centralized error handling with thiserror
 */

use serde::Serialize;
use thiserror::Error;

/// A bounded queue was asked to hold more entries than its fixed capacity.
///
/// Queue capacities are sized from the process table, so an overflow is a
/// configuration bug: fatal during boot, a logged no-op afterwards.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("queue overflow: fixed capacity {capacity} exceeded")]
pub struct QueueOverflow {
    pub capacity: usize,
}

/// Admission outcomes for a single program descriptor
///
/// Recovered locally by the long-term scheduler: each failure is logged and
/// the pass continues with the next descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AdmissionError {
    #[error("no free entry in the process table")]
    NoFreeEntry,

    #[error("program {0} does not exist")]
    ProgramDoesNotExist(String),

    #[error("program {0} is not valid: invalid priority or size")]
    ProgramNotValid(String),

    #[error("program {0} is too big for a memory section")]
    TooBigProcess(String),
}

/// Fatal boot-time errors: the simulator must not reach its first dispatch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootError {
    #[error("missing operating system image")]
    MissingOperatingSystemImage,

    #[error("operating system image does not fit its memory region ({size} > {region})")]
    OversizedOperatingSystemImage { size: usize, region: usize },

    #[error("missing system idle program")]
    MissingIdleProgram,

    #[error(transparent)]
    QueueOverflow(#[from] QueueOverflow),
}

/// Program image resolution and parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("program {0} not found")]
    NotFound(String),

    #[error("program {name}: line {line}: {reason}")]
    Malformed {
        name: String,
        line: usize,
        reason: String,
    },
}
