/*!
 * Signal Syscalls
 * Process signaling operations
 */

use log::{info, warn};

use crate::security::Capability;

use super::executor::SyscallExecutor;
use super::types::SyscallResult;

impl SyscallExecutor {
    pub(super) fn send_signal(&self, pid: u32, target_pid: u32, signal: u32) -> SyscallResult {
        if !self
            .sandbox_manager
            .check_permission(pid, &Capability::KillProcess)
        {
            return SyscallResult::permission_denied("Missing KillProcess capability");
        }

        // Placeholder: In full implementation, would handle different signal types
        warn!("SendSignal not fully implemented");
        info!("PID {} sent signal {} to PID {}", pid, signal, target_pid);
        SyscallResult::success()
    }
}
