//! Host-level IP helpers pushed through the legacy shell.

use spytest_common::{CommandSet, ConfigOptions, IntfResult};
use spytest_types::Dialect;

use crate::api::IntfApi;

impl IntfApi {
    /// Assigns a static address and default gateway to an interface.
    pub async fn config_static_ip_to_interface(
        &self,
        interface: &str,
        ip_address: &str,
        netmask: &str,
        gateway: &str,
    ) -> IntfResult<bool> {
        let commands = vec![
            format!("ifconfig {} {} netmask {}", interface, ip_address, netmask),
            format!("ip route add default via {}", gateway),
        ];
        self.invoke(
            &CommandSet::Config { commands },
            Dialect::Click,
            &ConfigOptions::default(),
        )
        .await?;
        Ok(true)
    }

    /// Removes an address from an interface.
    pub async fn delete_ip_on_interface_linux(
        &self,
        interface: &str,
        ip_address: &str,
    ) -> IntfResult<bool> {
        let commands = vec![format!("ip addr del {} dev {}", ip_address, interface)];
        self.invoke(
            &CommandSet::Config { commands },
            Dialect::Click,
            &ConfigOptions::default(),
        )
        .await?;
        Ok(true)
    }

    /// Starts a DHCP client on an interface (`v6` selects DHCPv6).
    pub async fn enable_dhcp_on_interface(
        &self,
        interface: &str,
        ipv6: bool,
        skip_error_check: bool,
    ) -> IntfResult<bool> {
        let command = if ipv6 {
            format!("dhclient -6 {}", interface)
        } else {
            format!("dhclient {}", interface)
        };
        let options = ConfigOptions {
            skip_error_check,
            ..ConfigOptions::default()
        };
        self.invoke(
            &CommandSet::Config {
                commands: vec![command],
            },
            Dialect::Click,
            &options,
        )
        .await?;
        Ok(true)
    }
}
