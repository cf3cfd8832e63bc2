/*!
 * Core Module
 * Shared types, limits, errors, and the bounded heap
 */

pub mod errors;
pub mod heap;
pub mod limits;
pub mod types;

// Re-export public API
pub use errors::{AdmissionError, BootError, LoadError, QueueOverflow};
pub use heap::BoundedHeap;
pub use types::{Address, Pid, Priority, Psw, Size, Tick, TrapCause};
