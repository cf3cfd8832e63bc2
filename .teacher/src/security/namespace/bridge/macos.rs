/*!
 * macOS Network Bridge Implementation
 * Uses ifconfig for bridge management
 */

use super::super::types::*;
use log::{debug, info, warn};
use std::net::IpAddr;

/// Bridge network manager for macOS
pub struct MacosBridgeManager {}

impl MacosBridgeManager {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn init(&mut self) -> NamespaceResult<()> {
        info!("MacosBridgeManager initialized");
        Ok(())
    }

    /// Create a network bridge on macOS
    #[cfg(target_os = "macos")]
    pub async fn create_bridge(&self, bridge_name: &str) -> NamespaceResult<()> {
        info!("Creating network bridge on macOS: {}", bridge_name);

        use std::process::Command;

        let output = Command::new("ifconfig")
            .args(&["bridge", "create"])
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute ifconfig: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NamespaceError::NetworkError(
                format!("Failed to create bridge: {}", stderr).into(),
            ));
        }

        // The output contains the name of the created bridge (e.g., "bridge0")
        // For simplicity, we'll assume the user specifies the correct bridge name
        // In production, you'd parse the output to get the actual bridge name

        debug!("Bridge {} created successfully on macOS", bridge_name);
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    pub async fn create_bridge(&self, _bridge_name: &str) -> NamespaceResult<()> {
        Err(NamespaceError::PlatformNotSupported(
            "macOS bridge operations not supported on this platform".into(),
        ))
    }

    /// Delete a network bridge on macOS
    #[cfg(target_os = "macos")]
    pub async fn delete_bridge(&self, bridge_name: &str) -> NamespaceResult<()> {
        info!("Deleting network bridge on macOS: {}", bridge_name);

        use std::process::Command;

        let output = Command::new("ifconfig")
            .args(&[bridge_name, "destroy"])
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute ifconfig: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NamespaceError::NetworkError(
                format!("Failed to delete bridge {}: {}", bridge_name, stderr).into(),
            ));
        }

        debug!("Bridge deleted successfully");
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    pub async fn delete_bridge(&self, _bridge_name: &str) -> NamespaceResult<()> {
        Err(NamespaceError::PlatformNotSupported(
            "macOS bridge operations not supported on this platform".into(),
        ))
    }

    /// Attach an interface to a bridge on macOS
    #[cfg(target_os = "macos")]
    pub async fn attach_interface(
        &self,
        bridge_name: &str,
        iface_name: &str,
    ) -> NamespaceResult<()> {
        info!(
            "Attaching {} to bridge {} on macOS",
            iface_name, bridge_name
        );

        use std::process::Command;

        let output = Command::new("ifconfig")
            .args(&[bridge_name, "addm", iface_name])
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute ifconfig: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NamespaceError::NetworkError(
                format!(
                    "Failed to attach {} to bridge {}: {}",
                    iface_name, bridge_name, stderr
                )
                .into(),
            ));
        }

        debug!("Interface attached to bridge successfully");
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    pub async fn attach_interface(
        &self,
        _bridge_name: &str,
        _iface_name: &str,
    ) -> NamespaceResult<()> {
        Err(NamespaceError::PlatformNotSupported(
            "macOS bridge operations not supported on this platform".into(),
        ))
    }

    /// Detach an interface from a bridge on macOS
    #[cfg(target_os = "macos")]
    pub async fn detach_interface(&self, iface_name: &str) -> NamespaceResult<()> {
        info!("Detaching {} from bridge on macOS", iface_name);

        use std::process::Command;

        // On macOS, we need to know which bridge the interface is attached to
        // For simplicity, we'll try to find it or require the bridge name
        // This is a limitation - in production, you'd enumerate bridges to find it
        warn!("Detaching interface on macOS requires knowing the bridge name");

        // As a fallback, we can try to bring the interface down
        let output = Command::new("ifconfig")
            .args(&[iface_name, "down"])
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute ifconfig: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Failed to bring interface {} down: {}", iface_name, stderr);
        }

        debug!("Interface detached (brought down)");
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    pub async fn detach_interface(&self, _iface_name: &str) -> NamespaceResult<()> {
        Err(NamespaceError::PlatformNotSupported(
            "macOS bridge operations not supported on this platform".into(),
        ))
    }

    /// Configure bridge IP address on macOS
    #[cfg(target_os = "macos")]
    pub async fn set_bridge_ip(
        &self,
        bridge_name: &str,
        ip_addr: IpAddr,
        prefix_len: u8,
    ) -> NamespaceResult<()> {
        info!(
            "Setting bridge {} IP on macOS: {}/{}",
            bridge_name, ip_addr, prefix_len
        );

        use std::process::Command;

        let ip_str = match ip_addr {
            IpAddr::V4(addr) => {
                format!("{} netmask {}", addr, Self::prefix_to_netmask(prefix_len))
            }
            IpAddr::V6(addr) => format!("{} prefixlen {}", addr, prefix_len).into(),
        };

        let output = Command::new("ifconfig")
            .arg(bridge_name)
            .arg(match ip_addr {
                IpAddr::V4(_) => "inet",
                IpAddr::V6(_) => "inet6",
            })
            .args(ip_str.split_whitespace())
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute ifconfig: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NamespaceError::NetworkError(
                format!("Failed to set IP on bridge {}: {}", bridge_name, stderr).into(),
            ));
        }

        // Bring bridge up
        let output = Command::new("ifconfig")
            .args(&[bridge_name, "up"])
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute ifconfig: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Failed to bring bridge {} up: {}", bridge_name, stderr);
        }

        debug!("Bridge IP configured successfully");
        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    pub async fn set_bridge_ip(
        &self,
        _bridge_name: &str,
        _ip_addr: IpAddr,
        _prefix_len: u8,
    ) -> NamespaceResult<()> {
        Err(NamespaceError::PlatformNotSupported(
            "macOS bridge operations not supported on this platform".into(),
        ))
    }

    /// Enable NAT/forwarding for bridge on macOS
    #[cfg(target_os = "macos")]
    pub async fn enable_forwarding(&self, bridge_name: &str) -> NamespaceResult<()> {
        info!("Enabling forwarding for bridge {} on macOS", bridge_name);

        use std::process::Command;

        // Enable IP forwarding
        let output = Command::new("sysctl")
            .args(&["-w", "net.inet.ip.forwarding=1"])
            .output()
            .map_err(|e| {
                NamespaceError::NetworkError(format!("Failed to execute sysctl: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Failed to enable IP forwarding: {}", stderr);
        } else {
            debug!("IP forwarding enabled");
        }

        // Note: Setting up NAT on macOS requires pfctl (packet filter)
        // This is more complex and requires careful configuration
        debug!("Would configure pfctl NAT rules for bridge {}", bridge_name);
        debug!("  - pfctl configuration for NAT and forwarding");
        debug!("  - /etc/pf.conf modifications may be required");

        warn!("NAT configuration on macOS requires pfctl setup - implement with pfctl rules");

        Ok(())
    }

    #[cfg(not(target_os = "macos"))]
    pub async fn enable_forwarding(&self, _bridge_name: &str) -> NamespaceResult<()> {
        Err(NamespaceError::PlatformNotSupported(
            "macOS bridge operations not supported on this platform".into(),
        ))
    }

    /// Helper to convert prefix length to netmask (IPv4) on macOS
    #[cfg(target_os = "macos")]
    fn prefix_to_netmask(prefix: u8) -> String {
        let mask = !0u32 << (32 - prefix);
        let octets = [
            ((mask >> 24) & 0xFF) as u8,
            ((mask >> 16) & 0xFF) as u8,
            ((mask >> 8) & 0xFF) as u8,
            (mask & 0xFF) as u8,
        ];
        format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]).into()
    }
}

impl Default for MacosBridgeManager {
    fn default() -> Self {
        Self::new()
    }
}
