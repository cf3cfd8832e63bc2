/*!
 * macOS eBPF Provider
 * Platform-specific implementation using available tracing mechanisms
 */

use super::events::{EventCollector, EventType};
use super::filters::FilterManager;
use super::loader::ProgramLoader;
use super::traits::*;
use super::types::*;
use crate::core::types::Pid;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

/// macOS eBPF provider with DTrace support
#[derive(Clone)]
pub struct MacOSEbpfProvider {
    supported: bool,
    inner: Arc<RwLock<MacOSEbpfInner>>,
    loader: ProgramLoader,
    filters: FilterManager,
    events: EventCollector,
}

struct MacOSEbpfInner {
    /// Monitored PIDs
    monitored_pids: HashSet<Pid>,
    /// DTrace scripts ready state
    initialized: bool,
    /// Platform-specific handles
    /// In full DTrace integration, this would hold:
    /// - DTrace script handles
    /// - Consumer threads
    /// - Probe configurations
    #[allow(dead_code)]
    dtrace_handles: Option<DTraceHandles>,
}

/// Placeholder for DTrace-specific handles
struct DTraceHandles {
    // Future: Add DTrace consumer, scripts, etc.
}

impl MacOSEbpfProvider {
    pub fn new() -> Self {
        let supported = Self::check_support();
        if supported {
            info!("macOS tracing provider initialized with DTrace support");
        } else {
            warn!("macOS tracing not available");
        }

        Self {
            supported,
            inner: Arc::new(RwLock::new(MacOSEbpfInner {
                monitored_pids: HashSet::new(),
                initialized: false,
                dtrace_handles: None,
            }).into()),
            loader: ProgramLoader::new(),
            filters: FilterManager::new(),
            events: EventCollector::new(),
        }
    }

    fn check_support() -> bool {
        #[cfg(target_os = "macos")]
        {
            // Check for DTrace availability
            use std::process::Command;
            Command::new("which")
                .arg("dtrace")
                .output()
                .map(|output| output.status.success())
                .unwrap_or(false)
        }
        #[cfg(not(target_os = "macos"))]
        {
            false
        }
    }
}

impl Default for MacOSEbpfProvider {
    fn default() -> Self {
        Self::new()
    }
}

// macOS doesn't have true eBPF, so this is a minimal implementation
impl EbpfProvider for MacOSEbpfProvider {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn platform(&self) -> EbpfPlatform {
        EbpfPlatform::MacOS
    }

    fn load_program(&self, config: ProgramConfig) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        // Load program via loader
        self.loader.load(config.clone())?;

        // In full DTrace integration, this would:
        // 1. Generate appropriate DTrace script for program type
        // 2. Compile and validate the script
        // 3. Store script handle in dtrace_handles
        // 4. Set up data consumers for event collection

        debug!(
            "Loaded DTrace script: {} (type: {:?})",
            config.name, config.program_type
        );

        // Auto-attach if requested
        if config.auto_attach && config.enabled {
            self.attach_program(&config.name)?;
        }

        Ok(())
    }

    fn unload_program(&self, name: &str) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.loader.unload(name)?;
        debug!("Unloaded DTrace script: {}", name);
        Ok(())
    }

    fn attach_program(&self, name: &str) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.loader.attach(name)?;

        // In full DTrace integration, this would:
        // 1. Start DTrace consumer for this script
        // 2. Enable probe points
        // 3. Begin event collection

        info!("Attached DTrace script: {}", name);
        Ok(())
    }

    fn detach_program(&self, name: &str) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.loader.detach(name)?;
        debug!("Detached DTrace script: {}", name);
        Ok(())
    }

    fn list_programs(&self) -> Vec<ProgramInfo> {
        self.loader.list()
    }

    fn get_program_info(&self, name: &str) -> Option<ProgramInfo> {
        self.loader.get_info(name)
    }

    fn stats(&self) -> EbpfStats {
        let programs = self.loader.list();
        let (syscall_events, network_events, file_events, events_per_sec) = self.events.stats();

        EbpfStats {
            programs_loaded: programs.len(),
            programs_attached: programs.iter().filter(|p| p.attached).count(),
            syscall_events,
            network_events,
            file_events,
            active_filters: self.filters.count(),
            events_per_sec,
            platform: EbpfPlatform::MacOS,
        }
    }
}

impl SyscallFilterProvider for MacOSEbpfProvider {
    fn add_filter(&self, filter: SyscallFilter) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.filters.add(filter.clone())?;
        debug!("Added syscall filter: {}", filter.id);

        // In full DTrace integration, this would:
        // - Update DTrace predicates to enforce filtering
        // - Regenerate and reload affected scripts

        Ok(())
    }

    fn remove_filter(&self, filter_id: &str) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.filters.remove(filter_id)?;
        debug!("Removed syscall filter: {}", filter_id);
        Ok(())
    }

    fn get_filters(&self) -> Vec<SyscallFilter> {
        self.filters.list()
    }

    fn clear_filters(&self) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.filters.clear()?;
        debug!("Cleared all syscall filters");
        Ok(())
    }

    fn check_syscall(&self, pid: Pid, syscall_nr: u64) -> bool {
        self.filters.check(pid, syscall_nr)
    }
}

impl EventMonitor for MacOSEbpfProvider {
    fn subscribe_syscall(&self, callback: EventCallback) -> EbpfResult<String> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let id = self.events.subscribe(EventType::Syscall, callback);
        debug!("Created syscall event subscription: {}", id);
        Ok(id)
    }

    fn subscribe_network(&self, callback: EventCallback) -> EbpfResult<String> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let id = self.events.subscribe(EventType::Network, callback);
        debug!("Created network event subscription: {}", id);
        Ok(id)
    }

    fn subscribe_file(&self, callback: EventCallback) -> EbpfResult<String> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let id = self.events.subscribe(EventType::File, callback);
        debug!("Created file event subscription: {}", id);
        Ok(id)
    }

    fn subscribe_all(&self, callback: EventCallback) -> EbpfResult<String> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let id = self.events.subscribe(EventType::All, callback);
        debug!("Created all-events subscription: {}", id);
        Ok(id)
    }

    fn unsubscribe(&self, subscription_id: &str) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        self.events.unsubscribe(subscription_id)?;
        debug!("Removed event subscription: {}", subscription_id);
        Ok(())
    }

    fn get_recent_events(&self, limit: usize) -> Vec<EbpfEvent> {
        self.events.recent(limit)
    }

    fn get_events_by_pid(&self, pid: Pid, limit: usize) -> Vec<EbpfEvent> {
        self.events.by_pid(pid, limit)
    }
}

impl ProcessMonitor for MacOSEbpfProvider {
    fn monitor_process(&self, pid: Pid) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let mut inner = self.inner.write();
        inner.monitored_pids.insert(pid);

        // In full DTrace integration, this would:
        // - Update DTrace predicates to focus on this PID
        // - Enable process-specific probes

        info!("Started monitoring process: {}", pid);
        Ok(())
    }

    fn unmonitor_process(&self, pid: Pid) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let mut inner = self.inner.write();
        inner.monitored_pids.remove(&pid);

        debug!("Stopped monitoring process: {}", pid);
        Ok(())
    }

    fn get_monitored_pids(&self) -> Vec<Pid> {
        self.inner.read().monitored_pids.iter().copied().collect()
    }

    fn get_syscall_count(&self, pid: Pid) -> u64 {
        self.events
            .by_pid(pid, usize::MAX)
            .iter()
            .filter(|e| matches!(e, EbpfEvent::Syscall(_)))
            .count() as u64
    }

    fn get_network_activity(&self, pid: Pid) -> Vec<NetworkEvent> {
        self.events
            .by_pid(pid, usize::MAX)
            .into_iter()
            .filter_map(|e| match e {
                EbpfEvent::Network(ne) => Some(ne),
                _ => None,
            })
            .collect()
    }

    fn get_file_activity(&self, pid: Pid) -> Vec<FileEvent> {
        self.events
            .by_pid(pid, usize::MAX)
            .into_iter()
            .filter_map(|e| match e {
                EbpfEvent::File(fe) => Some(fe),
                _ => None,
            })
            .collect()
    }
}

impl EbpfManager for MacOSEbpfProvider {
    fn init(&self) -> EbpfResult<()> {
        if !self.supported {
            return Err(EbpfError::UnsupportedPlatform {
                platform: "macOS".to_string(),
            });
        }

        let mut inner = self.inner.write();

        // In full DTrace integration, this would:
        // 1. Check DTrace availability and permissions
        // 2. Initialize DTrace consumer library
        // 3. Set up default probes
        // 4. Start background consumer threads

        inner.initialized = true;
        info!("macOS DTrace subsystem initialized successfully");
        Ok(())
    }

    fn shutdown(&self) -> EbpfResult<()> {
        let mut inner = self.inner.write();

        // Detach and unload all scripts
        for program in self.loader.list() {
            if program.attached {
                let _ = self.loader.detach(&program.name);
            }
            let _ = self.loader.unload(&program.name);
        }

        // Clear filters and events
        let _ = self.filters.clear();
        self.events.clear();

        inner.monitored_pids.clear();
        inner.initialized = false;

        info!("macOS DTrace subsystem shut down");
        Ok(())
    }

    fn health_check(&self) -> bool {
        self.supported && self.inner.read().initialized
    }
}
