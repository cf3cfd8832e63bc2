/*!
 * Long-Term Scheduler
 * One boot-time admission pass turning program descriptors into processes
 */

use crate::core::errors::{AdmissionError, BootError};
use crate::core::limits::{MAIN_MEMORY_SECTION_SIZE, PROGRAMS_MAX_NUMBER};
use crate::core::types::Pid;
use crate::hardware::Hardware;
use crate::kernel::Kernel;
use crate::loader::{ProgramLibrary, IDLE_PROGRAM_NAME};
use crate::process::types::{ProgramDescriptor, ProgramKind, QueueClass};
use tracing::{info, warn};

impl Kernel {
    /// Admit every program in the descriptor list, in order.
    ///
    /// Rejections are classified, logged, and absorbed — the pass always
    /// continues with the next descriptor. Only a ready-queue overflow is
    /// fatal here, since at boot it can only mean misconfigured capacities.
    /// Returns the number of successfully created processes.
    pub(crate) fn long_term_scheduler(
        &mut self,
        program_list: &[ProgramDescriptor],
        library: &ProgramLibrary,
        hw: &mut Hardware,
    ) -> Result<usize, BootError> {
        let mut created = 0;
        for descriptor in program_list.iter().take(PROGRAMS_MAX_NUMBER) {
            match self.create_process(descriptor, library, hw) {
                Ok(pid) => {
                    created += 1;
                    match descriptor.kind {
                        ProgramKind::User => {
                            self.live_user_processes += 1;
                            self.move_to_ready(pid, QueueClass::User)?;
                        }
                        ProgramKind::Daemon => {
                            if descriptor.name == IDLE_PROGRAM_NAME {
                                self.idle_pid = Some(pid);
                            }
                            self.move_to_ready(pid, QueueClass::Daemon)?;
                        }
                    }
                }
                Err(e) => {
                    warn!(program = %descriptor.name, reason = %e, "admission rejected");
                }
            }
        }
        Ok(created)
    }

    /// Create one resident process from an executable program
    fn create_process(
        &mut self,
        descriptor: &ProgramDescriptor,
        library: &ProgramLibrary,
        hw: &mut Hardware,
    ) -> Result<Pid, AdmissionError> {
        let pid = self.table.allocate(descriptor.kind)?;

        // Nothing below may leak the reservation on failure
        if let Err(e) = Self::validate_image(descriptor, library) {
            self.table.release(pid, descriptor.kind);
            return Err(e);
        }
        let image = library
            .open(&descriptor.name)
            .map_err(|_| AdmissionError::ProgramDoesNotExist(descriptor.name.clone()))?;

        // Each process owns the memory window at its pid's position
        let base = pid * MAIN_MEMORY_SECTION_SIZE;
        let size = image.declared_size as usize;
        hw.memory.load(base, &image.text);
        self.table
            .initialize(pid, base, size, image.priority, descriptor);

        info!(pid, program = %descriptor.name, base, size, priority = image.priority,
            "process created");
        Ok(pid)
    }

    /// Classify a descriptor's image without touching kernel state
    fn validate_image(
        descriptor: &ProgramDescriptor,
        library: &ProgramLibrary,
    ) -> Result<(), AdmissionError> {
        let image = library
            .open(&descriptor.name)
            .map_err(|_| AdmissionError::ProgramDoesNotExist(descriptor.name.clone()))?;

        if image.declared_size > MAIN_MEMORY_SECTION_SIZE as i64 {
            return Err(AdmissionError::TooBigProcess(descriptor.name.clone()));
        }
        if image.declared_size <= 0 || image.priority < 0 {
            return Err(AdmissionError::ProgramNotValid(descriptor.name.clone()));
        }
        if image.text.len() as i64 > image.declared_size {
            return Err(AdmissionError::TooBigProcess(descriptor.name.clone()));
        }
        Ok(())
    }
}
