/*!
 * Machine Loop
 * Fetch/execute cycle; raises traps into the kernel synchronously
 */

use crate::core::errors::BootError;
use crate::core::types::TrapCause;
use crate::hardware::memory::Word;
use crate::hardware::Hardware;
use crate::kernel::Kernel;
use crate::loader::ProgramLibrary;
use crate::process::types::ProgramDescriptor;
use tracing::info;

/// The whole simulated computer: kernel plus hardware, advancing in
/// lock-step. Interrupts are synchronous call-outs from the instruction
/// cycle into the kernel, never concurrent with it.
#[derive(Debug)]
pub struct Machine {
    pub kernel: Kernel,
    pub hw: Hardware,
}

impl Machine {
    /// Power on: boot the kernel, then install the first dispatched
    /// process's context so the instruction cycle can begin.
    pub fn power_on(
        program_list: &[ProgramDescriptor],
        library: &ProgramLibrary,
    ) -> Result<Self, BootError> {
        Self::power_on_with_hardware(program_list, library, Hardware::new())
    }

    pub fn power_on_with_hardware(
        program_list: &[ProgramDescriptor],
        library: &ProgramLibrary,
        mut hw: Hardware,
    ) -> Result<Self, BootError> {
        let kernel = Kernel::boot(program_list, library, &mut hw)?;
        hw.cpu.return_from_trap();
        Ok(Self { kernel, hw })
    }

    #[must_use]
    pub fn powered_off(&self) -> bool {
        self.hw.cpu.is_powered_off()
    }

    /// Run the instruction cycle until power-off, or until `max_cycles` as a
    /// runaway guard. Returns the number of cycles executed.
    pub fn run(&mut self, max_cycles: u64) -> u64 {
        for cycle in 0..max_cycles {
            if self.powered_off() {
                info!(cycles = cycle, "end of the simulation");
                return cycle;
            }
            self.step();
        }
        max_cycles
    }

    /// One instruction cycle: fetch, execute, clock update
    pub fn step(&mut self) {
        let privileged = self.hw.cpu.psw().privileged();
        let fetched = self
            .hw
            .mmu
            .translate(self.hw.cpu.pc(), privileged, self.hw.memory.size())
            .ok()
            .and_then(|physical| self.hw.memory.read(physical));

        match fetched {
            Some(word) => self.execute(word, privileged),
            None => self.trap(TrapCause::Exception),
        }

        if self.hw.clock.update() {
            self.trap(TrapCause::ClockTick);
        }
    }

    fn execute(&mut self, word: Word, privileged: bool) {
        let pc = self.hw.cpu.pc();
        match word {
            Word::Nop => self.hw.cpu.set_pc(pc + 1),
            Word::Set(n) => {
                self.hw.cpu.set_accumulator(n);
                self.hw.cpu.set_pc(pc + 1);
            }
            Word::Add(n) => {
                let acc = self.hw.cpu.accumulator();
                self.hw.cpu.set_accumulator(acc.wrapping_add(n));
                self.hw.cpu.set_pc(pc + 1);
            }
            Word::Jump(offset) => {
                // Window-relative: real-mode code jumps within its own
                // section, user code within its logical window
                let window_base = if privileged { self.hw.mmu.base() } else { 0 };
                self.hw.cpu.set_pc(window_base + offset);
            }
            Word::Trap(code) => {
                self.hw.cpu.set_reg_a(code);
                self.hw.cpu.set_pc(pc + 1);
                self.trap(TrapCause::SystemCall);
            }
            Word::Halt => {
                if privileged {
                    self.hw.cpu.power_off();
                } else {
                    self.trap(TrapCause::Exception);
                }
            }
            Word::Empty => self.trap(TrapCause::Exception),
        }
    }

    /// Synchronous trap boundary: push the live context onto the system
    /// stack, run the kernel handler, pop whatever context it left there.
    fn trap(&mut self, cause: TrapCause) {
        self.hw.cpu.enter_trap();
        self.kernel.interrupt_logic(cause, &mut self.hw);
        self.hw.cpu.return_from_trap();
    }
}
