/*!
 * Simulator Limits
 * Compile-time capacities shared by the kernel and the hardware simulation
 */

use crate::core::types::{Address, Size};

/// Maximum number of process table entries (and of pids per run)
pub const PROCESS_TABLE_MAX_SIZE: usize = 4;

/// Size of the per-process main-memory window
pub const MAIN_MEMORY_SECTION_SIZE: Size = 60;

/// Maximum length of the initial program list (user programs plus daemons)
pub const PROGRAMS_MAX_NUMBER: usize = 10;

/// Base address of the operating-system image, above all process windows
pub const OS_ADDRESS_BASE: Address = PROCESS_TABLE_MAX_SIZE * MAIN_MEMORY_SECTION_SIZE;

/// Total simulated main memory: one window per table entry plus the OS region
pub const MAIN_MEMORY_SIZE: Size = OS_ADDRESS_BASE + MAIN_MEMORY_SECTION_SIZE;

/// Instruction cycles between consecutive clock interrupts
pub const DEFAULT_CLOCK_INTERVAL: u64 = 5;
