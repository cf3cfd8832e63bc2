/*!
 * Trap Router and Handlers
 * Classifies system calls, exceptions, and clock ticks; implements
 * terminate, yield, sleep, and wakeup
 */

use super::Kernel;
use crate::core::types::{Pid, TrapCause};
use crate::hardware::Hardware;
use crate::loader::IDLE_SHUTDOWN_OFFSET;
use crate::process::types::{ProcessState, QueueClass};
use tracing::{info, warn};

/// System calls, decoded from the A register.
/// The discriminants are the call codes guest programs place there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum Syscall {
    End = 3,
    Yield = 4,
    PrintSelf = 5,
    Sleep = 7,
}

impl Syscall {
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            3 => Some(Syscall::End),
            4 => Some(Syscall::Yield),
            5 => Some(Syscall::PrintSelf),
            7 => Some(Syscall::Sleep),
            _ => None,
        }
    }
}

impl Kernel {
    /// The trap boundary: every interrupt enters the kernel here.
    ///
    /// All PCB and queue mutation completes before this returns; the machine
    /// then resumes instruction execution from whatever context the handlers
    /// left on the system stack.
    pub fn interrupt_logic(&mut self, cause: TrapCause, hw: &mut Hardware) {
        match cause {
            TrapCause::SystemCall => self.handle_system_call(hw),
            TrapCause::Exception => self.handle_exception(hw),
            TrapCause::ClockTick => self.handle_clock_interrupt(hw),
        }
    }

    fn handle_system_call(&mut self, hw: &mut Hardware) {
        let code = hw.cpu.reg_a();
        match Syscall::from_code(code) {
            Some(Syscall::PrintSelf) => {
                if let Some(pid) = self.executing {
                    info!(
                        pid,
                        program = self.program_name_of(pid).unwrap_or("?"),
                        "process has the processor assigned"
                    );
                }
            }
            Some(Syscall::End) => {
                if let Some(pid) = self.executing {
                    info!(
                        pid,
                        program = self.program_name_of(pid).unwrap_or("?"),
                        "process has requested to terminate"
                    );
                }
                self.terminate_process(hw);
            }
            Some(Syscall::Yield) => self.handle_yield(hw),
            Some(Syscall::Sleep) => self.send_process_to_sleep(hw),
            None => {
                warn!(code, pid = ?self.executing, "unknown system call ignored");
            }
        }
    }

    /// Only fatal exceptions exist in this machine: the process dies.
    fn handle_exception(&mut self, hw: &mut Hardware) {
        if let Some(pid) = self.executing {
            info!(
                pid,
                program = self.program_name_of(pid).unwrap_or("?"),
                "process has generated an exception and is terminating"
            );
        }
        self.terminate_process(hw);
    }

    /// Hand the processor to the front of the caller's own class queue, but
    /// only on an exact priority match. Yielding to lower priority never
    /// happens, and a higher-priority waiter would have preempted already.
    fn handle_yield(&mut self, hw: &mut Hardware) {
        let Some(pid) = self.executing else {
            return;
        };
        let Some(pcb) = self.table.get(pid) else {
            return;
        };
        let class = pcb.queue_class;
        let priority = pcb.priority();

        let front_priority = self
            .ready
            .peek(class)
            .and_then(|front| self.priority_of(front));
        if front_priority != Some(priority) {
            return;
        }

        info!(pid, queue = %class, priority, "yield: transferring the processor");
        self.preempt_running_process(hw);
        self.select_and_dispatch(hw);
    }

    /// Block the caller until tick `current + |accumulator| + 1`
    fn send_process_to_sleep(&mut self, hw: &mut Hardware) {
        let Some(pid) = self.executing else {
            return;
        };
        self.save_context(pid, hw);

        let duration = hw.cpu.accumulator().unsigned_abs();
        let wake_tick = self.ticks + duration + 1;

        if let Err(e) = self.sleepers.insert(wake_tick, pid) {
            // Configuration bug; refuse the block and keep the caller running
            warn!(pid, error = %e, "sleep rejected, process keeps the processor");
            return;
        }

        let mut is_user = false;
        if let Some(pcb) = self.table.get_mut(pid) {
            let old_state = pcb.state;
            pcb.state = ProcessState::Blocked;
            pcb.wake_tick = Some(wake_tick);
            is_user = pcb.is_user();
            info!(
                pid,
                program = %pcb.program_name,
                from = %old_state,
                to = %ProcessState::Blocked,
                wake_tick,
                "state transition"
            );
        }
        if is_user {
            self.live_user_processes -= 1;
        }
        self.executing = None;
        self.select_and_dispatch(hw);
    }

    /// Count the tick; wake every sleeper due exactly now into the user
    /// ready queue, and if anyone woke, rerun the short-term scheduler —
    /// a woken process may outrank the current one.
    fn handle_clock_interrupt(&mut self, hw: &mut Hardware) {
        self.ticks += 1;
        info!(tick = self.ticks, "clock interrupt");

        let mut woken = 0;
        while let Some(pid) = self.sleepers.pop_due(self.ticks) {
            self.wake_up_process(pid);
            woken += 1;
        }
        if woken > 0 {
            self.preempt_running_process(hw);
            self.select_and_dispatch(hw);
        }
        self.log_status();
    }

    fn wake_up_process(&mut self, pid: Pid) {
        let Some(pcb) = self.table.get(pid) else {
            warn!(pid, "woken pid has no live PCB");
            return;
        };
        let priority = pcb.priority();
        if let Err(e) = self.ready.insert(QueueClass::User, priority, pid) {
            warn!(pid, error = %e, "woken process could not requeue");
            return;
        }

        let mut is_user = false;
        if let Some(pcb) = self.table.get_mut(pid) {
            let old_state = pcb.state;
            pcb.state = ProcessState::Ready;
            pcb.queue_class = QueueClass::User;
            pcb.wake_tick = None;
            is_user = pcb.is_user();
            info!(
                pid,
                program = %pcb.program_name,
                from = %old_state,
                to = %ProcessState::Ready,
                "state transition"
            );
        }
        if is_user {
            self.live_user_processes += 1;
        }
    }

    /// Shared by the End syscall and the exception path
    pub(crate) fn terminate_process(&mut self, hw: &mut Hardware) {
        let Some(pid) = self.executing.take() else {
            return;
        };
        let mut is_user = false;
        if let Some(pcb) = self.table.get_mut(pid) {
            let old_state = pcb.state;
            pcb.state = ProcessState::Exit;
            is_user = pcb.is_user();
            info!(
                pid,
                program = %pcb.program_name,
                from = %old_state,
                to = %ProcessState::Exit,
                "state transition"
            );
        }
        if is_user {
            self.live_user_processes -= 1;
        }

        if self.live_user_processes == 0 {
            if Some(pid) == self.idle_pid {
                // Orderly shutdown: no further dispatch
                hw.cpu.power_off();
                info!("the system will shut down now");
                return;
            }
            self.ready_to_shutdown();
        }
        self.select_and_dispatch(hw);
    }

    /// The user workload is exhausted: point the idle process at its
    /// shutdown entry so it finishes the next time it runs.
    fn ready_to_shutdown(&mut self) {
        if self.shutdown_pending {
            return;
        }
        self.shutdown_pending = true;
        let Some(idle) = self.idle_pid else {
            return;
        };
        if let Some(pcb) = self.table.get_mut(idle) {
            pcb.saved_pc = pcb.base + IDLE_SHUTDOWN_OFFSET;
            info!(idle_pid = idle, "idle process signaled to finish");
        }
    }

    /// Dispatch the short-term scheduler's pick. The daemon queue is the
    /// last resort when the preferred class is momentarily empty (every
    /// live user process asleep).
    pub(crate) fn select_and_dispatch(&mut self, hw: &mut Hardware) {
        let selected = self
            .short_term_scheduler()
            .or_else(|| self.ready.pick_next(QueueClass::Daemon));
        match selected {
            Some(pid) => self.dispatch(pid, hw),
            None => warn!("no process to dispatch"),
        }
    }
}
