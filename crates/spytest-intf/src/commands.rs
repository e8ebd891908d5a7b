//! Legacy-shell command builders.
//!
//! One flat command string per target, rendered from operation templates.
//! Builders are pure; parameter validation happens before anything here is
//! called, so a rendered command is always safe to push.

use crate::admin::AdminOp;
use crate::membership::{ConfigMode, VrfOp};

/// Show command for interface status.
pub const SHOW_INTERFACE_STATUS: &str = "show interfaces status";

/// Show command for all interface counters.
pub const SHOW_INTERFACE_COUNTERS: &str = "show interfaces counters";

/// Clear command used when the counters clear flag is unsupported.
pub const SONIC_CLEAR_COUNTERS: &str = "sonic-clear counters";

/// Build interface status show command, optionally scoped to interfaces.
pub fn build_status_show_cmd(interfaces: &[&str]) -> String {
    if interfaces.is_empty() {
        SHOW_INTERFACE_STATUS.to_string()
    } else {
        format!("{} {}", SHOW_INTERFACE_STATUS, interfaces.join(","))
    }
}

/// Build admin state change command (`startup`/`shutdown`).
pub fn build_admin_cmd(op: AdminOp, interface: &str) -> String {
    format!("config interface {} {}", op.click_verb(), interface)
}

/// Build MTU set command.
pub fn build_mtu_cmd(interface: &str, value: &str) -> String {
    format!("config interface mtu {} {}", interface, value)
}

/// Build speed set command.
pub fn build_speed_cmd(interface: &str, value: &str) -> String {
    format!("config interface speed {} {}", interface, value)
}

/// Build FEC set command.
pub fn build_fec_cmd(interface: &str, value: &str) -> String {
    format!("config interface fec {} {}", interface, value)
}

/// Build counters show command (`-a` for the extended set).
pub fn build_counters_show_cmd(all: bool) -> String {
    if all {
        format!("{} -a", SHOW_INTERFACE_COUNTERS)
    } else {
        SHOW_INTERFACE_COUNTERS.to_string()
    }
}

/// Build per-interface counters show command.
pub fn build_counters_interface_cmd(interface: &str) -> String {
    format!("{} -a -i {}", SHOW_INTERFACE_COUNTERS, interface)
}

/// Build counters clear command.
pub fn build_counters_clear_cmd() -> String {
    format!("{} -c", SHOW_INTERFACE_COUNTERS)
}

/// Build detailed per-interface counters show command.
pub fn build_counters_detailed_cmd(interface: &str) -> String {
    format!("show interfaces counters detailed {}", interface)
}

/// Build queue counters show command (`-c` appended to clear).
pub fn build_queue_counters_cmd(interface: &str, clear: bool) -> String {
    let suffix = if clear { " -c" } else { "" };
    format!("show queue counters {}{}", interface, suffix)
}

/// Build global queue counters clear command.
pub fn build_queue_counters_clear_all_cmd() -> String {
    "show queue counters -c".to_string()
}

/// Build watermark show command for one counter family.
pub fn build_watermark_show_cmd(family: &str) -> String {
    format!("show {}", family)
}

/// Build watermark clear command for one counter family.
pub fn build_watermark_clear_cmd(family: &str) -> String {
    format!("sonic-clear {}", family)
}

/// Build VLAN create/remove command.
pub fn build_vlan_cmd(mode: ConfigMode, vlan_id: u16) -> String {
    format!("sudo config vlan {} {}", mode.click_verb(), vlan_id)
}

/// Build VLAN range create/remove command.
pub fn build_vlan_range_cmd(mode: ConfigMode, lo: u16, hi: u16) -> String {
    format!("sudo config vlan range {} {} {}", mode.click_verb(), lo, hi)
}

/// Build VLAN member add/remove command.
pub fn build_vlan_member_cmd(mode: ConfigMode, vlan_id: u16, member: &str) -> String {
    format!(
        "config vlan member {} {} {}",
        mode.click_verb(),
        vlan_id,
        member
    )
}

/// Build VLAN member range add/remove command.
pub fn build_vlan_member_range_cmd(mode: ConfigMode, lo: u16, hi: u16, member: &str) -> String {
    format!(
        "config vlan member range {} {} {} {}",
        mode.click_verb(),
        lo,
        hi,
        member
    )
}

/// Build port-channel create/remove command.
pub fn build_portchannel_cmd(mode: ConfigMode, name: &str) -> String {
    format!("sudo config portchannel {} {}", mode.click_verb(), name)
}

/// Build port-channel member add/remove command.
pub fn build_portchannel_member_cmd(mode: ConfigMode, name: &str, member: &str) -> String {
    format!(
        "sudo config portchannel member {} {} {}",
        mode.click_verb(),
        name,
        member
    )
}

/// Build VRF bind/unbind command.
pub fn build_vrf_bind_cmd(op: VrfOp, interface: &str, vrf: &str) -> String {
    format!(
        "sudo config interface vrf {} {} {}",
        op.click_verb(),
        interface,
        vrf
    )
}

/// Build portgroup property set command.
pub fn build_portgroup_property_cmd(property: &str, portgroup: &str, value: &str) -> String {
    format!("config portgroup {} {} {}", property, portgroup, value)
}

/// Show command for port groups.
pub const SHOW_PORTGROUP: &str = "show portgroup";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_status_show_cmd() {
        assert_eq!(build_status_show_cmd(&[]), "show interfaces status");
        assert_eq!(
            build_status_show_cmd(&["Ethernet0", "Ethernet4"]),
            "show interfaces status Ethernet0,Ethernet4"
        );
    }

    #[test]
    fn test_build_admin_cmd() {
        assert_eq!(
            build_admin_cmd(AdminOp::Shutdown, "Ethernet0"),
            "config interface shutdown Ethernet0"
        );
        assert_eq!(
            build_admin_cmd(AdminOp::Startup, "Ethernet0"),
            "config interface startup Ethernet0"
        );
    }

    #[test]
    fn test_build_property_cmds() {
        assert_eq!(
            build_mtu_cmd("Ethernet0", "1500"),
            "config interface mtu Ethernet0 1500"
        );
        assert_eq!(
            build_speed_cmd("Ethernet4", "25000"),
            "config interface speed Ethernet4 25000"
        );
        assert_eq!(
            build_fec_cmd("Ethernet8", "rs"),
            "config interface fec Ethernet8 rs"
        );
    }

    #[test]
    fn test_build_counter_cmds() {
        assert_eq!(build_counters_show_cmd(false), "show interfaces counters");
        assert_eq!(build_counters_show_cmd(true), "show interfaces counters -a");
        assert_eq!(
            build_counters_interface_cmd("Ethernet0"),
            "show interfaces counters -a -i Ethernet0"
        );
        assert_eq!(build_counters_clear_cmd(), "show interfaces counters -c");
    }

    #[test]
    fn test_build_queue_cmds() {
        assert_eq!(
            build_queue_counters_cmd("Ethernet0", false),
            "show queue counters Ethernet0"
        );
        assert_eq!(
            build_queue_counters_cmd("Ethernet0", true),
            "show queue counters Ethernet0 -c"
        );
    }

    #[test]
    fn test_build_vlan_cmds() {
        assert_eq!(build_vlan_cmd(ConfigMode::Add, 100), "sudo config vlan add 100");
        assert_eq!(
            build_vlan_range_cmd(ConfigMode::Del, 10, 15),
            "sudo config vlan range del 10 15"
        );
        assert_eq!(
            build_vlan_member_cmd(ConfigMode::Add, 100, "Ethernet0"),
            "config vlan member add 100 Ethernet0"
        );
        assert_eq!(
            build_vlan_member_range_cmd(ConfigMode::Add, 10, 15, "Ethernet0"),
            "config vlan member range add 10 15 Ethernet0"
        );
    }

    #[test]
    fn test_build_portchannel_cmds() {
        assert_eq!(
            build_portchannel_cmd(ConfigMode::Add, "PortChannel4"),
            "sudo config portchannel add PortChannel4"
        );
        assert_eq!(
            build_portchannel_member_cmd(ConfigMode::Del, "PortChannel4", "Ethernet0"),
            "sudo config portchannel member del PortChannel4 Ethernet0"
        );
    }

    #[test]
    fn test_build_vrf_bind_cmd() {
        assert_eq!(
            build_vrf_bind_cmd(VrfOp::Bind, "Ethernet0", "Vrf-red"),
            "sudo config interface vrf bind Ethernet0 Vrf-red"
        );
        assert_eq!(
            build_vrf_bind_cmd(VrfOp::Unbind, "Ethernet0", "Vrf-red"),
            "sudo config interface vrf unbind Ethernet0 Vrf-red"
        );
    }

    #[test]
    fn test_build_portgroup_property_cmd() {
        assert_eq!(
            build_portgroup_property_cmd("speed", "1", "25000"),
            "config portgroup speed 1 25000"
        );
    }
}
