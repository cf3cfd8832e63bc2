/*!
 * Dispatcher
 * Short-term selection, ready-queue admission, and the context switch
 */

use super::Kernel;
use crate::core::errors::QueueOverflow;
use crate::core::types::Pid;
use crate::hardware::Hardware;
use crate::process::types::{ProcessState, QueueClass};
use tracing::{info, warn};

impl Kernel {
    /// Class the short-term scheduler draws from: user processes while any
    /// remain live, daemons from then on.
    pub(crate) fn preferred_class(&self) -> QueueClass {
        if self.live_user_processes > 0 {
            QueueClass::User
        } else {
            QueueClass::Daemon
        }
    }

    /// Select the next process to execute, or `None` if the class is empty
    pub(crate) fn short_term_scheduler(&mut self) -> Option<Pid> {
        self.ready.pick_next(self.preferred_class())
    }

    /// Move a process into the named ready queue, keyed by its fixed
    /// priority. Valid only from NEW or EXECUTING; wakeup from BLOCKED goes
    /// through the clock handler instead.
    pub(crate) fn move_to_ready(
        &mut self,
        pid: Pid,
        class: QueueClass,
    ) -> Result<(), QueueOverflow> {
        let Some(pcb) = self.table.get(pid) else {
            warn!(pid, "move_to_ready on a pid with no live PCB");
            return Ok(());
        };
        let old_state = pcb.state;
        if !matches!(old_state, ProcessState::New | ProcessState::Executing) {
            warn!(pid, state = %old_state, "move_to_ready from an invalid state");
            return Ok(());
        }

        self.ready.insert(class, pcb.priority(), pid)?;

        if let Some(pcb) = self.table.get_mut(pid) {
            pcb.state = ProcessState::Ready;
            pcb.queue_class = class;
            info!(
                pid,
                program = %pcb.program_name,
                from = %old_state,
                to = %ProcessState::Ready,
                queue = %class,
                "state transition"
            );
        }
        Ok(())
    }

    /// Assign the processor: mark EXECUTING and install the saved context
    pub(crate) fn dispatch(&mut self, pid: Pid, hw: &mut Hardware) {
        let Some(pcb) = self.table.get_mut(pid) else {
            warn!(pid, "dispatch of a pid with no live PCB");
            return;
        };
        let old_state = pcb.state;
        pcb.state = ProcessState::Executing;
        self.executing = Some(pid);
        info!(
            pid,
            program = %pcb.program_name,
            from = %old_state,
            to = %ProcessState::Executing,
            "state transition"
        );
        self.restore_context(pid, hw);
    }

    /// Inverse of dispatch: save the hardware context back into the PCB and
    /// return the process to a ready queue. Daemons (and everyone once no
    /// user process remains live) requeue into the daemon class.
    pub(crate) fn preempt_running_process(&mut self, hw: &mut Hardware) {
        let Some(pid) = self.executing.take() else {
            return;
        };
        self.save_context(pid, hw);
        let class = match self.table.get(pid) {
            Some(pcb) if pcb.is_user() && self.live_user_processes > 0 => QueueClass::User,
            _ => QueueClass::Daemon,
        };
        if let Err(e) = self.move_to_ready(pid, class) {
            warn!(pid, error = %e, "preempted process could not requeue");
        }
    }

    /// Copy the saved PCB context into the hardware: PC/PSW through the
    /// system stack, accumulator directly, window bounds into the MMU.
    pub(crate) fn restore_context(&self, pid: Pid, hw: &mut Hardware) {
        let Some(pcb) = self.table.get(pid) else {
            return;
        };
        hw.cpu.write_stack_frame(pcb.saved_pc, pcb.saved_psw);
        hw.cpu.set_accumulator(pcb.saved_acc);
        hw.mmu.set_base(pcb.base);
        hw.mmu.set_limit(pcb.size);
    }

    /// Read the trapped PC/PSW (and accumulator) back into the PCB
    pub(crate) fn save_context(&mut self, pid: Pid, hw: &Hardware) {
        let (pc, psw) = hw.cpu.stack_frame();
        let accumulator = hw.cpu.accumulator();
        if let Some(pcb) = self.table.get_mut(pid) {
            pcb.saved_pc = pc;
            pcb.saved_psw = psw;
            pcb.saved_acc = accumulator;
        }
    }
}
