/*!
 * Process Module
 * Process control blocks, descriptors, and the process table
 */

pub mod table;
pub mod types;

// Re-export public API
pub use table::ProcessTable;
pub use types::{Pcb, ProcessState, ProgramDescriptor, ProgramKind, QueueClass};
