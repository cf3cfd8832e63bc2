/*!
 * Linux eBPF Provider
 * Real eBPF implementation for Linux using Aya
 */

use super::traits::*;
use super::types::*;
use crate::core::types::Pid;
use log::{info, warn};
use parking_lot::RwLock;
use std::sync::Arc;

/// Linux eBPF provider (placeholder for Aya integration)
#[derive(Clone)]
pub struct LinuxEbpfProvider {
    supported: bool,
    inner: Arc<RwLock<LinuxEbpfInner>>,
}

struct LinuxEbpfInner {
    // Will hold Aya-specific structures
    // For now, we'll delegate to simulation until Aya is added
}

impl LinuxEbpfProvider {
    pub fn new() -> Self {
        let supported = Self::check_support();
        if supported {
            info!("Linux eBPF provider initialized");
        } else {
            warn!("Linux eBPF not supported on this system");
        }

        Self {
            supported,
            inner: Arc::new(RwLock::new(LinuxEbpfInner {})),
        }
    }

    fn check_support() -> bool {
        #[cfg(target_os = "linux")]
        {
            // Check for eBPF support
            // - Kernel version >= 4.4
            // - CAP_SYS_ADMIN or CAP_BPF capability
            // - BPF filesystem mounted
            use std::fs;

            // Simple check: see if /sys/fs/bpf exists
            fs::metadata("/sys/fs/bpf").is_ok()
        }
        #[cfg(not(target_os = "linux"))]
        {
            false
        }
    }
}

impl Default for LinuxEbpfProvider {
    fn default() -> Self {
        Self::new()
    }
}

// For now, Linux provider delegates to simulation mode
// Once Aya is integrated, this will use real eBPF programs
impl EbpfProvider for LinuxEbpfProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn platform(&self) -> EbpfPlatform {
        EbpfPlatform::Linux
    }

    fn load_program(&self, _config: ProgramConfig) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "Linux".to_string(),
            });
        }

        // TODO: Implement with Aya
        // - Compile eBPF bytecode
        // - Load into kernel
        // - Store program handle

        Err(EbpfError::NotAvailable)
    }

    fn unload_program(&self, _name: &str) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn attach_program(&self, _name: &str) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn detach_program(&self, _name: &str) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn list_programs(&self) -> Vec<ProgramInfo> {
        Vec::new()
    }

    fn get_program_info(&self, _name: &str) -> Option<ProgramInfo> {
        None
    }

    fn stats(&self) -> EbpfStats {
        EbpfStats {
            programs_loaded: 0,
            programs_attached: 0,
            syscall_events: 0,
            network_events: 0,
            file_events: 0,
            active_filters: 0,
            events_per_sec: 0.0,
            platform: EbpfPlatform::Linux,
        }
    }
}

impl SyscallFilterProvider for LinuxEbpfProvider {
    fn add_filter(&self, _filter: SyscallFilter) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn remove_filter(&self, _filter_id: &str) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn get_filters(&self) -> Vec<SyscallFilter> {
        Vec::new()
    }

    fn clear_filters(&self) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn check_syscall(&self, _pid: Pid, _syscall_nr: u64) -> bool {
        true
    }
}

impl EventMonitor for LinuxEbpfProvider {
    fn subscribe_syscall(&self, _callback: EventCallback) -> EbpfResult<String> {
        Err(EbpfError::NotAvailable)
    }

    fn subscribe_network(&self, _callback: EventCallback) -> EbpfResult<String> {
        Err(EbpfError::NotAvailable)
    }

    fn subscribe_file(&self, _callback: EventCallback) -> EbpfResult<String> {
        Err(EbpfError::NotAvailable)
    }

    fn subscribe_all(&self, _callback: EventCallback) -> EbpfResult<String> {
        Err(EbpfError::NotAvailable)
    }

    fn unsubscribe(&self, _subscription_id: &str) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn get_recent_events(&self, _limit: usize) -> Vec<EbpfEvent> {
        Vec::new()
    }

    fn get_events_by_pid(&self, _pid: Pid, _limit: usize) -> Vec<EbpfEvent> {
        Vec::new()
    }
}

impl ProcessMonitor for LinuxEbpfProvider {
    fn monitor_process(&self, _pid: Pid) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn unmonitor_process(&self, _pid: Pid) -> EbpfResult<()> {
        Err(EbpfError::NotAvailable)
    }

    fn get_monitored_pids(&self) -> Vec<Pid> {
        Vec::new()
    }

    fn get_syscall_count(&self, _pid: Pid) -> u64 {
        0
    }

    fn get_network_activity(&self, _pid: Pid) -> Vec<NetworkEvent> {
        Vec::new()
    }

    fn get_file_activity(&self, _pid: Pid) -> Vec<FileEvent> {
        Vec::new()
    }
}

impl EbpfManager for LinuxEbpfProvider {
    fn init(&self) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "Linux".to_string(),
            });
        }
        Ok(())
    }

    fn shutdown(&self) -> EbpfResult<()> {
        Ok(())
    }

    fn health_check(&self) -> bool {
        self.supported
    }
}
