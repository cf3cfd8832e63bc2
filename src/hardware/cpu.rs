/*!
 * Simulated CPU Context
 * Registers, status word, and the system-stack scratch slots used to pass
 * the trapped PC/PSW across the trap boundary
 */

use crate::core::types::{Address, Psw, EXECUTION_MODE_BIT, POWER_OFF_BIT};

#[derive(Debug)]
pub struct Cpu {
    reg_a: i64,
    accumulator: i64,
    pc: Address,
    psw: Psw,
    // System-stack scratch slots
    stack_pc: Address,
    stack_psw: Psw,
    interrupt_vector_base: Address,
}

impl Cpu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            reg_a: 0,
            accumulator: 0,
            pc: 0,
            psw: Psw::new(),
            stack_pc: 0,
            stack_psw: Psw::new(),
            interrupt_vector_base: 0,
        }
    }

    /// General-purpose A register, carrying syscall and argument codes
    #[must_use]
    pub fn reg_a(&self) -> i64 {
        self.reg_a
    }

    pub fn set_reg_a(&mut self, value: i64) {
        self.reg_a = value;
    }

    #[must_use]
    pub fn accumulator(&self) -> i64 {
        self.accumulator
    }

    pub fn set_accumulator(&mut self, value: i64) {
        self.accumulator = value;
    }

    #[must_use]
    pub fn pc(&self) -> Address {
        self.pc
    }

    pub fn set_pc(&mut self, pc: Address) {
        self.pc = pc;
    }

    #[must_use]
    pub fn psw(&self) -> Psw {
        self.psw
    }

    pub fn activate_psw_bit(&mut self, bit: u32) {
        self.psw = self.psw.with_bit(bit);
    }

    pub fn deactivate_psw_bit(&mut self, bit: u32) {
        self.psw = self.psw.without_bit(bit);
    }

    /// Stop the instruction cycle. Set on the saved frame as well so a
    /// power-off raised inside a trap survives the trap return.
    pub fn power_off(&mut self) {
        self.psw = self.psw.with_bit(POWER_OFF_BIT);
        self.stack_psw = self.stack_psw.with_bit(POWER_OFF_BIT);
    }

    #[must_use]
    pub fn is_powered_off(&self) -> bool {
        self.psw.is_set(POWER_OFF_BIT)
    }

    pub fn init_interrupt_vector(&mut self, base: Address) {
        self.interrupt_vector_base = base;
    }

    /// Write a saved context into the system-stack scratch slots
    /// (the dispatcher's restore path)
    pub fn write_stack_frame(&mut self, pc: Address, psw: Psw) {
        self.stack_pc = pc;
        self.stack_psw = psw;
    }

    /// Read back the context the hardware placed on the system stack
    /// (the dispatcher's save path)
    #[must_use]
    pub fn stack_frame(&self) -> (Address, Psw) {
        (self.stack_pc, self.stack_psw)
    }

    /// Push the live PC/PSW onto the system stack and enter privileged mode;
    /// control then transfers to the interrupt-vector entry.
    pub fn enter_trap(&mut self) {
        self.stack_pc = self.pc;
        self.stack_psw = self.psw;
        self.psw = self.psw.with_bit(EXECUTION_MODE_BIT);
        self.pc = self.interrupt_vector_base;
    }

    /// Pop the system stack back into the live PC/PSW. A dispatch inside the
    /// trap handler leaves the incoming process's context here instead.
    pub fn return_from_trap(&mut self) {
        self.pc = self.stack_pc;
        self.psw = self.stack_psw;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
