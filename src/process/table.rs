/*!
 * Process Table
 * Fixed-capacity PCB registry, the single source of truth for process state
 */

use crate::core::errors::AdmissionError;
use crate::core::types::{Address, Pid, Priority, Size};
use crate::process::types::{Pcb, ProgramDescriptor, ProgramKind};

/// Fixed-capacity registry of process control blocks.
///
/// A pid is valid iff its slot is occupied. User pids are drawn from the low
/// end of the table and daemon pids from the high end; the two ranges are
/// disjoint and slots of terminated processes are never reused within a run.
#[derive(Debug)]
pub struct ProcessTable {
    slots: Vec<Option<Pcb>>,
    // Allocation cursors: users grow upward, daemons downward.
    next_user: usize,
    next_daemon: isize,
}

impl ProcessTable {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            next_user: 0,
            next_daemon: capacity as isize - 1,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Reserve the next free slot in the kind's pid range.
    ///
    /// The slot stays unoccupied until `initialize`; `release` undoes a
    /// reservation whose admission failed before a PCB ever existed.
    pub fn allocate(&mut self, kind: ProgramKind) -> Result<Pid, AdmissionError> {
        let pid = match kind {
            ProgramKind::User => {
                if (self.next_user as isize) > self.next_daemon {
                    return Err(AdmissionError::NoFreeEntry);
                }
                let pid = self.next_user;
                self.next_user += 1;
                pid
            }
            ProgramKind::Daemon => {
                if self.next_daemon < self.next_user as isize {
                    return Err(AdmissionError::NoFreeEntry);
                }
                let pid = self.next_daemon as Pid;
                self.next_daemon -= 1;
                pid
            }
        };
        Ok(pid)
    }

    /// Roll back the most recent `allocate` for this kind
    pub fn release(&mut self, pid: Pid, kind: ProgramKind) {
        debug_assert!(self.slots[pid].is_none(), "release of an initialized pid");
        match kind {
            ProgramKind::User if self.next_user == pid + 1 => self.next_user = pid,
            ProgramKind::Daemon if self.next_daemon == pid as isize - 1 => {
                self.next_daemon = pid as isize;
            }
            _ => {}
        }
    }

    /// Populate the PCB with its creation values (state becomes NEW)
    pub fn initialize(
        &mut self,
        pid: Pid,
        base: Address,
        size: Size,
        priority: Priority,
        descriptor: &ProgramDescriptor,
    ) {
        self.slots[pid] = Some(Pcb::new(pid, base, size, priority, descriptor));
    }

    #[must_use]
    pub fn get(&self, pid: Pid) -> Option<&Pcb> {
        self.slots.get(pid).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Pcb> {
        self.slots.get_mut(pid).and_then(Option::as_mut)
    }

    /// Iterate all live PCBs
    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.slots.iter().flatten()
    }
}
