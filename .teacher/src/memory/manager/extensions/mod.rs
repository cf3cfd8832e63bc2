/*!
 * Memory Manager Extensions
 * RAII guards, counters, and utility functionality
 */

pub mod flat_counter;
pub mod guard_ext;

pub use guard_ext::MemoryGuardExt;

