/*!
 * OS Simulator Kernel Library
 * Core scheduling and trap handling for a single-CPU teaching simulator
 */

pub mod core;
pub mod hardware;
pub mod kernel;
pub mod loader;
pub mod process;
pub mod sched;

// Re-exports
pub use crate::core::{AdmissionError, BootError, LoadError, Pid, Priority, Tick, TrapCause};
pub use crate::hardware::{Hardware, Machine, Word};
pub use crate::kernel::{Kernel, Syscall};
pub use crate::loader::{ProgramImage, ProgramLibrary, IDLE_PROGRAM_NAME, OS_IMAGE_NAME};
pub use crate::process::{ProcessState, ProgramDescriptor, ProgramKind, QueueClass};

use tracing_subscriber::EnvFilter;

/// Initialize structured tracing from `RUST_LOG` (defaulting to info)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
