/*!
 * Core Types
 * Common types shared across the simulator
 */

use serde::Serialize;
use std::fmt;

/// Process ID type: a stable index into the process table
pub type Pid = usize;

/// Priority level (non-negative, lower is more urgent)
pub type Priority = i64;

/// Clock-interrupt counter
pub type Tick = u64;

/// Address type for simulated main memory
pub type Address = usize;

/// Size type for memory windows
pub type Size = usize;

/// Privileged execution mode (set inside traps and for daemons)
pub const EXECUTION_MODE_BIT: u32 = 7;

/// Set when the simulated machine must stop its instruction cycle
pub const POWER_OFF_BIT: u32 = 11;

/// Processor status word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Psw(u32);

impl Psw {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// PSW with the privileged-mode bit already set (daemon creation value)
    #[must_use]
    pub const fn privileged_mode() -> Self {
        Self(1 << EXECUTION_MODE_BIT)
    }

    #[must_use]
    pub const fn is_set(self, bit: u32) -> bool {
        self.0 & (1 << bit) != 0
    }

    #[must_use]
    pub const fn with_bit(self, bit: u32) -> Self {
        Self(self.0 | (1 << bit))
    }

    #[must_use]
    pub const fn without_bit(self, bit: u32) -> Self {
        Self(self.0 & !(1 << bit))
    }

    /// Check the privileged-mode bit
    #[inline(always)]
    #[must_use]
    pub const fn privileged(self) -> bool {
        self.is_set(EXECUTION_MODE_BIT)
    }
}

impl fmt::Display for Psw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Trap entry points raised by the simulated hardware
///
/// The discriminants are the interrupt-vector entry codes shared with the
/// processor simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum TrapCause {
    SystemCall = 2,
    Exception = 6,
    ClockTick = 9,
}

impl fmt::Display for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrapCause::SystemCall => "system call",
            TrapCause::Exception => "exception",
            TrapCause::ClockTick => "clock tick",
        };
        f.write_str(name)
    }
}
