/*!
 * Kernel Core
 * Owns the process table and queues; boot, dispatch, and trap handling
 */

use crate::core::errors::BootError;
use crate::core::limits::{
    MAIN_MEMORY_SECTION_SIZE, OS_ADDRESS_BASE, PROCESS_TABLE_MAX_SIZE, PROGRAMS_MAX_NUMBER,
};
use crate::core::types::{Pid, Priority, Tick};
use crate::hardware::Hardware;
use crate::loader::{ProgramLibrary, IDLE_PROGRAM_NAME, OS_IMAGE_NAME};
use crate::process::table::ProcessTable;
use crate::process::types::{ProcessState, ProgramDescriptor, QueueClass};
use crate::sched::queues::{QueueSnapshot, ReadyQueues, SleepQueue};
use tracing::info;

pub mod dispatch;
pub mod traps;

pub use traps::Syscall;

/// The kernel's whole mutable state: one owner, no globals.
///
/// Constructed at boot with fixed capacities; external components get read
/// accessors only and reach the mutating paths exclusively through the trap
/// boundary (`interrupt_logic`) or boot.
#[derive(Debug)]
pub struct Kernel {
    pub(crate) table: ProcessTable,
    pub(crate) ready: ReadyQueues,
    pub(crate) sleepers: SleepQueue,
    pub(crate) executing: Option<Pid>,
    // Maintained only by admit, sleep, wake, and terminate
    pub(crate) live_user_processes: usize,
    pub(crate) idle_pid: Option<Pid>,
    pub(crate) ticks: Tick,
    pub(crate) shutdown_pending: bool,
}

impl Kernel {
    /// Initial set of tasks of the OS: load the OS image, admit every
    /// program, verify the idle process exists, dispatch the first process.
    pub fn boot(
        program_list: &[ProgramDescriptor],
        library: &ProgramLibrary,
        hw: &mut Hardware,
    ) -> Result<Self, BootError> {
        let os_image = library
            .open(OS_IMAGE_NAME)
            .map_err(|_| BootError::MissingOperatingSystemImage)?;
        // The OS region is one section; user images get the same bound from
        // the admission pass, but nothing validates this one before the load.
        if os_image.text.len() > MAIN_MEMORY_SECTION_SIZE {
            return Err(BootError::OversizedOperatingSystemImage {
                size: os_image.text.len(),
                region: MAIN_MEMORY_SECTION_SIZE,
            });
        }
        hw.memory.load(OS_ADDRESS_BASE, &os_image.text);
        hw.cpu.init_interrupt_vector(OS_ADDRESS_BASE + 2);

        let mut kernel = Self {
            table: ProcessTable::with_capacity(PROCESS_TABLE_MAX_SIZE),
            ready: ReadyQueues::with_capacity(PROCESS_TABLE_MAX_SIZE),
            sleepers: SleepQueue::with_capacity(PROCESS_TABLE_MAX_SIZE),
            executing: None,
            live_user_processes: 0,
            idle_pid: None,
            ticks: 0,
            shutdown_pending: false,
        };

        // The idle daemon closes the program list; it must always be present
        // so the short-term scheduler has someone to fall back to.
        let mut list: Vec<ProgramDescriptor> = program_list
            .iter()
            .take(PROGRAMS_MAX_NUMBER - 1)
            .cloned()
            .collect();
        list.push(ProgramDescriptor::daemon(IDLE_PROGRAM_NAME, list.len()));

        let admitted = kernel.long_term_scheduler(&list, library, hw)?;
        let idle_pid = kernel.idle_pid.ok_or(BootError::MissingIdleProgram)?;
        info!(admitted, idle_pid, "long-term scheduler finished");

        match kernel.short_term_scheduler() {
            Some(pid) => kernel.dispatch(pid, hw),
            None => return Err(BootError::MissingIdleProgram),
        }
        if kernel.live_user_processes == 0 {
            // No user workload at all: power off as soon as the loop starts.
            // Must come after the first dispatch, which rewrites the saved
            // PSW frame the power-off bit travels on.
            hw.cpu.power_off();
            info!("no user process admitted, powering off");
        }
        Ok(kernel)
    }

    // Read accessors (diagnostics and tests; scheduling never depends on them)

    #[must_use]
    pub fn executing(&self) -> Option<Pid> {
        self.executing
    }

    #[must_use]
    pub fn ticks(&self) -> Tick {
        self.ticks
    }

    #[must_use]
    pub fn live_user_processes(&self) -> usize {
        self.live_user_processes
    }

    #[must_use]
    pub fn idle_pid(&self) -> Option<Pid> {
        self.idle_pid
    }

    /// True once the idle process has been told to prepare to finish
    #[must_use]
    pub fn shutdown_pending(&self) -> bool {
        self.shutdown_pending
    }

    #[must_use]
    pub fn state_of(&self, pid: Pid) -> Option<ProcessState> {
        self.table.get(pid).map(|pcb| pcb.state)
    }

    #[must_use]
    pub fn priority_of(&self, pid: Pid) -> Option<Priority> {
        self.table.get(pid).map(|pcb| pcb.priority())
    }

    #[must_use]
    pub fn program_name_of(&self, pid: Pid) -> Option<&str> {
        self.table.get(pid).map(|pcb| pcb.program_name.as_str())
    }

    #[must_use]
    pub fn ready_len(&self, class: QueueClass) -> usize {
        self.ready.len(class)
    }

    #[must_use]
    pub fn sleeping_len(&self) -> usize {
        self.sleepers.len()
    }

    #[must_use]
    pub fn ready_snapshot(&self, class: QueueClass) -> QueueSnapshot {
        self.ready.snapshot(class)
    }

    /// Dump all queues as one structured trace event (behavior-neutral)
    pub fn log_status(&self) {
        let snapshots = [
            self.ready.snapshot(QueueClass::User),
            self.ready.snapshot(QueueClass::Daemon),
            self.sleepers.snapshot(),
        ];
        match serde_json::to_string(&snapshots) {
            Ok(json) => info!(queues = %json, "queue status"),
            Err(e) => info!(error = %e, "queue status serialization failed"),
        }
    }
}
