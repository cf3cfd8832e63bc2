/*!
 * Hardware Module
 * Simulated CPU context, MMU, main memory, clock, and the machine loop
 */

pub mod clock;
pub mod cpu;
pub mod machine;
pub mod memory;
pub mod mmu;

// Re-export public API
pub use clock::Clock;
pub use cpu::Cpu;
pub use machine::Machine;
pub use memory::{MainMemory, Word};
pub use mmu::Mmu;

use crate::core::limits::MAIN_MEMORY_SIZE;

/// The simulated hardware handed to the kernel at every trap
#[derive(Debug)]
pub struct Hardware {
    pub cpu: Cpu,
    pub mmu: Mmu,
    pub memory: MainMemory,
    pub clock: Clock,
}

impl Hardware {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            mmu: Mmu::new(),
            memory: MainMemory::with_size(MAIN_MEMORY_SIZE),
            clock: Clock::new(),
        }
    }
}

impl Default for Hardware {
    fn default() -> Self {
        Self::new()
    }
}
