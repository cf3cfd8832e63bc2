/*!
 * Process Types
 * PCB, lifecycle states, and program descriptors
 */

use crate::core::types::{Address, Pid, Priority, Psw, Size, Tick};
use serde::Serialize;
use std::fmt;

/// Process lifecycle state
///
/// EXIT is terminal: table slots are never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    New,
    Ready,
    Executing,
    Blocked,
    Exit,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Executing => "EXECUTING",
            ProcessState::Blocked => "BLOCKED",
            ProcessState::Exit => "EXIT",
        };
        f.write_str(name)
    }
}

/// Program class, deciding pid range and initial ready queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    User,
    Daemon,
}

/// Ready-queue class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueClass {
    User,
    Daemon,
}

impl fmt::Display for QueueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QueueClass::User => "USER",
            QueueClass::Daemon => "DAEMONS",
        })
    }
}

impl From<ProgramKind> for QueueClass {
    fn from(kind: ProgramKind) -> Self {
        match kind {
            ProgramKind::User => QueueClass::User,
            ProgramKind::Daemon => QueueClass::Daemon,
        }
    }
}

/// Static metadata describing one loadable program.
/// Immutable after admission; the admission pass reads it once at boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDescriptor {
    pub name: String,
    pub arrival_order: usize,
    pub kind: ProgramKind,
}

impl ProgramDescriptor {
    #[must_use]
    pub fn user(name: impl Into<String>, arrival_order: usize) -> Self {
        Self {
            name: name.into(),
            arrival_order,
            kind: ProgramKind::User,
        }
    }

    #[must_use]
    pub fn daemon(name: impl Into<String>, arrival_order: usize) -> Self {
        Self {
            name: name.into(),
            arrival_order,
            kind: ProgramKind::Daemon,
        }
    }
}

/// Process control block
///
/// Owned exclusively by the process table; queues hold pids, never copies.
/// Priority is fixed at creation and only readable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Pcb {
    pub pid: Pid,
    pub program_name: String,
    pub kind: ProgramKind,
    pub state: ProcessState,
    priority: Priority,
    pub base: Address,
    pub size: Size,
    pub saved_pc: Address,
    pub saved_psw: Psw,
    pub saved_acc: i64,
    pub queue_class: QueueClass,
    /// Valid only while BLOCKED waiting on the sleep queue
    pub wake_tick: Option<Tick>,
}

impl Pcb {
    pub(crate) fn new(
        pid: Pid,
        base: Address,
        size: Size,
        priority: Priority,
        descriptor: &ProgramDescriptor,
    ) -> Self {
        // Daemons begin in privileged mode at their real base address;
        // user processes begin unprivileged at offset 0 of their window.
        let (saved_pc, saved_psw) = match descriptor.kind {
            ProgramKind::Daemon => (base, Psw::privileged_mode()),
            ProgramKind::User => (0, Psw::new()),
        };
        Self {
            pid,
            program_name: descriptor.name.clone(),
            kind: descriptor.kind,
            state: ProcessState::New,
            priority,
            base,
            size,
            saved_pc,
            saved_psw,
            saved_acc: 0,
            queue_class: descriptor.kind.into(),
            wake_tick: None,
        }
    }

    /// Fixed scheduling priority (immutable from NEW through EXIT)
    #[inline(always)]
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self.kind, ProgramKind::User)
    }
}
