/*!
 * Network Namespace Manager
 * Platform-aware orchestration of network isolation
 */

use super::linux::LinuxNamespaceManager;
use super::macos::MacOSNamespaceManager;
use super::simulation::SimulationNamespaceManager;
use super::traits::*;
use super::types::*;
use crate::core::types::Pid;
use log::{info, warn};
use std::net::IpAddr;

/// Unified namespace manager that selects the appropriate platform implementation
#[derive(Clone)]
pub struct NamespaceManager {
    provider: NamespaceProviderImpl,
}

/// Platform-specific provider implementations
#[derive(Clone)]
enum NamespaceProviderImpl {
    #[allow(dead_code)]
    Linux(LinuxNamespaceManager),
    MacOS(MacOSNamespaceManager),
    Simulation(SimulationNamespaceManager),
}

impl NamespaceManager {
    /// Create a new namespace manager, auto-detecting the best implementation
    pub fn new() -> Self {
        let provider = Self::select_provider();
        let platform_name = match &provider {
            NamespaceProviderImpl::Linux(_) => "Linux (network namespaces)",
            NamespaceProviderImpl::MacOS(_) => "macOS (packet filters)",
            NamespaceProviderImpl::Simulation(_) => "Simulation",
        };
        info!(
            "Network namespace manager initialized using: {}",
            platform_name
        );
        Self { provider }
    }

    /// Initialize async networking components (VethManager/BridgeManager)
    /// Call this once before using namespace features
    pub async fn init(&self) -> NamespaceResult<()> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.init().await,
            NamespaceProviderImpl::MacOS(m) => m.init().await,
            NamespaceProviderImpl::Simulation(_) => Ok(()), // No async init needed
        }
    }

    /// Select the best available provider for the current platform
    fn select_provider() -> NamespaceProviderImpl {
        #[cfg(target_os = "linux")]
        {
            let linux_mgr = LinuxNamespaceManager::new();
            if linux_mgr.is_supported() {
                return NamespaceProviderImpl::Linux(linux_mgr);
            }
        }

        #[cfg(target_os = "macos")]
        {
            let macos_mgr = MacOSNamespaceManager::new();
            if macos_mgr.is_supported() {
                return NamespaceProviderImpl::MacOS(macos_mgr);
            }
        }

        // Fallback to simulation mode
        NamespaceProviderImpl::Simulation(SimulationNamespaceManager::new())
    }

    /// Force a specific platform implementation
    #[cfg(test)]
    pub fn with_simulation() -> Self {
        Self {
            provider: NamespaceProviderImpl::Simulation(SimulationNamespaceManager::new().into()),
        }
    }

    /// Get the current platform type
    pub fn platform(&self) -> PlatformType {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.platform(),
            NamespaceProviderImpl::MacOS(m) => m.platform(),
            NamespaceProviderImpl::Simulation(m) => m.platform(),
        }
    }

    /// Check if true OS-level isolation is available
    pub fn has_true_isolation(&self) -> bool {
        matches!(
            self.provider,
            NamespaceProviderImpl::Linux(_) | NamespaceProviderImpl::MacOS(_)
        )
    }

    /// Create a new network namespace
    pub fn create(&self, config: NamespaceConfig) -> NamespaceResult<()> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.create(config),
            NamespaceProviderImpl::MacOS(m) => m.create(config),
            NamespaceProviderImpl::Simulation(m) => m.create(config),
        }
    }

    /// Destroy a network namespace
    pub fn destroy(&self, id: &NamespaceId) -> NamespaceResult<()> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.destroy(id),
            NamespaceProviderImpl::MacOS(m) => m.destroy(id),
            NamespaceProviderImpl::Simulation(m) => m.destroy(id),
        }
    }

    /// Check if a namespace exists
    pub fn exists(&self, id: &NamespaceId) -> bool {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.exists(id),
            NamespaceProviderImpl::MacOS(m) => m.exists(id),
            NamespaceProviderImpl::Simulation(m) => m.exists(id),
        }
    }

    /// Get namespace information
    pub fn get_info(&self, id: &NamespaceId) -> Option<NamespaceInfo> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.get_info(id),
            NamespaceProviderImpl::MacOS(m) => m.get_info(id),
            NamespaceProviderImpl::Simulation(m) => m.get_info(id),
        }
    }

    /// List all namespaces
    pub fn list(&self) -> Vec<NamespaceInfo> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.list(),
            NamespaceProviderImpl::MacOS(m) => m.list(),
            NamespaceProviderImpl::Simulation(m) => m.list(),
        }
    }

    /// Get namespace for a process
    pub fn get_by_pid(&self, pid: Pid) -> Option<NamespaceInfo> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.get_by_pid(pid),
            NamespaceProviderImpl::MacOS(m) => m.get_by_pid(pid),
            NamespaceProviderImpl::Simulation(m) => m.get_by_pid(pid),
        }
    }

    /// Get namespace statistics
    pub fn get_stats(&self, id: &NamespaceId) -> Option<NamespaceStats> {
        match &self.provider {
            NamespaceProviderImpl::Linux(m) => m.get_stats(id),
            NamespaceProviderImpl::MacOS(m) => m.get_stats(id),
            NamespaceProviderImpl::Simulation(m) => m.get_stats(id),
        }
    }

    /// Get total namespace count
    pub fn count(&self) -> usize {
        self.list().len()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_creation() {
        let manager = NamespaceManager::new();
        assert!(manager.platform() != PlatformType::WindowsWFP);
    }

    #[test]
    fn test_simulation_mode() {
        let manager = NamespaceManager::with_simulation();
        assert_eq!(manager.platform(), PlatformType::Simulation);
    }

    #[test]
    fn test_create_and_destroy() {
        let manager = NamespaceManager::with_simulation();
        let config = NamespaceConfig::full_isolation(1);

        assert!(manager.create(config.clone()).is_ok());
        assert!(manager.exists(&config.id));
        assert!(manager.destroy(&config.id).is_ok());
        assert!(!manager.exists(&config.id));
    }

    #[test]
    fn test_list_namespaces() {
        let manager = NamespaceManager::with_simulation();
        let config1 = NamespaceConfig::full_isolation(1);
        let config2 = NamespaceConfig::private_network(2);

        manager.create(config1.clone()).unwrap();
        manager.create(config2.clone()).unwrap();

        let namespaces = manager.list();
        assert_eq!(namespaces.len(), 2);

        manager.destroy(&config1.id).unwrap();
        manager.destroy(&config2.id).unwrap();
    }

    #[test]
    fn test_get_by_pid() {
        let manager = NamespaceManager::with_simulation();
        let config = NamespaceConfig::full_isolation(42);

        manager.create(config.clone()).unwrap();

        let info = manager.get_by_pid(42);
        assert!(info.is_some());
        assert_eq!(info.unwrap().config.pid, 42);

        manager.destroy(&config.id).unwrap();
    }
}

// ============================================================================
// Trait Implementations for NamespaceManager
// ============================================================================

impl InterfaceManager for NamespaceManager {
    fn create_interface(
        &self,
        ns_id: &NamespaceId,
        config: &InterfaceConfig,
    ) -> NamespaceResult<()> {
        // Get namespace info to validate it exists
        let info = self
            .get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        // Interface creation is async and platform-specific
        // For now, log the request - actual creation happens via async methods
        info!(
            "Interface creation requested for namespace {}: {} ({}/{})",
            ns_id, config.name, config.ip_addr, config.prefix_len
        );

        // Store interface config in namespace info
        // In a full implementation, this would trigger async interface setup
        warn!("Interface creation is async - call platform-specific async methods");
        Ok(())
    }

    fn delete_interface(&self, ns_id: &NamespaceId, iface_name: &str) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Interface deletion requested for namespace {}: {}",
            ns_id, iface_name
        );

        // Actual deletion is async and platform-specific
        warn!("Interface deletion is async - call platform-specific async methods");
        Ok(())
    }

    fn set_ip_address(
        &self,
        ns_id: &NamespaceId,
        iface_name: &str,
        ip: IpAddr,
        prefix_len: u8,
    ) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "IP address configuration requested for {}/{}: {}/{}",
            ns_id, iface_name, ip, prefix_len
        );

        // Actual IP configuration is async and platform-specific
        warn!("IP configuration is async - call platform-specific async methods");
        Ok(())
    }

    fn set_interface_state(
        &self,
        ns_id: &NamespaceId,
        iface_name: &str,
        up: bool,
    ) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        let state = if up { "up" } else { "down" };
        info!(
            "Interface state change requested for {}/{}: {}",
            ns_id, iface_name, state
        );

        // Actual state change is async and platform-specific
        warn!("Interface state change is async - call platform-specific async methods");
        Ok(())
    }
}

impl NetworkRouter for NamespaceManager {
    fn add_default_route(&self, ns_id: &NamespaceId, gateway: IpAddr) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Default route addition requested for namespace {}: gateway {}",
            ns_id, gateway
        );

        // Routing configuration is platform-specific
        // On Linux: use rtnetlink to add route
        // On macOS: use route command
        warn!("Route configuration not yet implemented - platform-specific async operation needed");
        Ok(())
    }

    fn enable_nat(&self, ns_id: &NamespaceId) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!("NAT enablement requested for namespace {}", ns_id);

        // NAT configuration is platform-specific
        // On Linux: configure iptables/nftables MASQUERADE
        // On macOS: configure pfctl NAT rules
        warn!("NAT configuration not yet implemented - requires iptables/pfctl integration");
        Ok(())
    }

    fn disable_nat(&self, ns_id: &NamespaceId) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!("NAT disablement requested for namespace {}", ns_id);

        warn!("NAT configuration not yet implemented - requires iptables/pfctl integration");
        Ok(())
    }

    fn add_port_forward(
        &self,
        ns_id: &NamespaceId,
        host_port: u16,
        ns_port: u16,
    ) -> NamespaceResult<()> {
        // Validate namespace exists
        let mut info = self
            .get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Port forwarding requested for namespace {}: {}->{}",
            ns_id, host_port, ns_port
        );

        // Store port forward in config
        if !info.config.port_forwards.contains(&(host_port, ns_port)) {
            info.config.port_forwards.push((host_port, ns_port));
        }

        // Actual port forwarding setup is platform-specific
        // On Linux: iptables DNAT rules
        // On macOS: pfctl rdr rules
        warn!("Port forwarding not yet implemented - requires iptables/pfctl integration");
        Ok(())
    }

    fn remove_port_forward(&self, ns_id: &NamespaceId, host_port: u16) -> NamespaceResult<()> {
        // Validate namespace exists
        let mut info = self
            .get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Port forward removal requested for namespace {}: port {}",
            ns_id, host_port
        );

        // Remove from config
        info.config.port_forwards.retain(|(hp, _)| *hp != host_port);

        warn!("Port forwarding not yet implemented - requires iptables/pfctl integration");
        Ok(())
    }
}

impl ProcessAttacher for NamespaceManager {
    fn attach_process(&self, ns_id: &NamespaceId, pid: Pid) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Process attachment requested: PID {} -> namespace {}",
            pid, ns_id
        );

        // Process attachment is platform-specific
        // On Linux: use setns() syscall to move process into namespace
        // On macOS: apply pfctl rules to specific PID
        warn!("Process attachment not yet fully implemented - requires platform-specific syscalls");

        // For now, we can at least track the association
        // In a full implementation, this would:
        // 1. On Linux: Open /var/run/netns/{ns_id}, call setns()
        // 2. On macOS: Apply pfctl rules filtering by PID
        Ok(())
    }

    fn detach_process(&self, ns_id: &NamespaceId, pid: Pid) -> NamespaceResult<()> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Process detachment requested: PID {} from namespace {}",
            pid, ns_id
        );

        warn!("Process detachment not yet fully implemented");
        Ok(())
    }

    fn exec_in_namespace(
        &self,
        ns_id: &NamespaceId,
        command: &str,
        args: &[String],
    ) -> NamespaceResult<u32> {
        // Validate namespace exists
        self.get_info(ns_id)
            .ok_or_else(|| NamespaceError::NotFound(format!("Namespace {} not found", ns_id)))?;

        info!(
            "Command execution requested in namespace {}: {} {:?}",
            ns_id, command, args
        );

        // Command execution in namespace is platform-specific
        // On Linux: fork(), setns(), exec()
        // On macOS: spawn with pfctl rules applied
        warn!("Command execution in namespace not yet implemented");

        // Return dummy PID for now
        Err(NamespaceError::PlatformNotSupported(
            "Command execution in namespace not yet implemented".to_string(),
        ))
    }
}
