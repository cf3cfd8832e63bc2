/*!
 * Process Execution
 * OS-level process spawning, execution, and preemption
 */

pub mod executor;
pub mod preemption;
mod validation;

// Re-export public types
pub use executor::{ExecutingProcess, ProcessExecutor};
pub use preemption::PreemptionController;

