//! Structured-shell command builders.
//!
//! Config changes are rendered as per-interface blocks: enter the
//! interface context derived from the canonical name, apply or negate the
//! property line, exit. Negation uses the `no `-form prefix rather than a
//! separate delete verb.

use spytest_types::InterfaceRef;

/// Show command for interface status.
pub const SHOW_INTERFACE_STATUS: &str = "show interface status";

/// Show command for interface counters.
pub const SHOW_INTERFACE_COUNTERS: &str = "show interface counters";

/// Show command for the active interface naming mode.
pub const SHOW_INTERFACE_NAMING: &str = "show interface-naming";

/// Context-entry line for an interface scope.
pub fn enter_interface(intf: &InterfaceRef) -> String {
    format!("interface {} {}", intf.if_type().keyword(), intf.number())
}

/// Wraps one line in an enter/exit context block.
pub fn context_block(intf: &InterfaceRef, line: String) -> Vec<String> {
    vec![enter_interface(intf), line, "exit".to_string()]
}

/// Applies or negates a property line (`no `-form negation).
pub fn no_form(line: &str, negate: bool) -> String {
    if negate {
        format!("no {}", line)
    } else {
        line.to_string()
    }
}

/// Build a show command filtered to the given interfaces.
pub fn build_filtered_show_cmd(base: &str, interfaces: &[&str]) -> String {
    if interfaces.is_empty() {
        base.to_string()
    } else {
        format!("{} | grep \"{}\"", base, interfaces.join("|"))
    }
}

/// Build the counters clear command (`all` or one interface context).
pub fn build_counters_clear_cmd(target: Option<&InterfaceRef>) -> String {
    match target {
        Some(intf) => format!(
            "clear counters interface {} {}",
            intf.if_type().keyword(),
            intf.number()
        ),
        None => "clear counters interface all".to_string(),
    }
}

/// Build the queue counters show command. The CPU queue set is addressed
/// by name, not by interface context.
pub fn build_queue_counters_cmd(interface: &str, intf: Option<&InterfaceRef>) -> String {
    match intf {
        Some(parsed) => format!(
            "show queue counters interface {} {}",
            parsed.if_type().keyword(),
            parsed.number()
        ),
        None => format!("show queue counters interface {}", interface),
    }
}

/// Build the queue counters clear command.
pub fn build_queue_counters_clear_cmd(interface: Option<(&str, Option<&InterfaceRef>)>) -> String {
    match interface {
        Some((_, Some(parsed))) => format!(
            "clear queue counters interface {} {}",
            parsed.if_type().keyword(),
            parsed.number()
        ),
        Some((name, None)) => format!("clear queue counters interface {}", name),
        None => "clear queue counters".to_string(),
    }
}

/// Trunk membership line for a single VLAN.
pub fn trunk_allowed_vlan_line(vlan_id: u16, negate: bool) -> String {
    no_form(&format!("switchport trunk allowed Vlan {}", vlan_id), negate)
}

/// Trunk membership line for a VLAN range.
pub fn trunk_allowed_vlan_range_line(lo: u16, hi: u16, negate: bool) -> String {
    no_form(
        &format!("switchport trunk allowed Vlan {}-{}", lo, hi),
        negate,
    )
}

/// VLAN interface create/remove line.
pub fn vlan_interface_line(vlan_id: u16, negate: bool) -> String {
    no_form(&format!("interface Vlan {}", vlan_id), negate)
}

/// Channel-group membership line.
pub fn channel_group_line(channel_number: &str, negate: bool) -> String {
    if negate {
        "no channel-group".to_string()
    } else {
        format!("channel-group {}", channel_number)
    }
}

/// VRF binding line.
pub fn vrf_forwarding_line(vrf: &str, negate: bool) -> String {
    no_form(&format!("ip vrf forwarding {}", vrf), negate)
}

/// Interface naming mode line (`standard` on, `no`-form back to native).
pub fn interface_naming_line(standard: bool) -> String {
    no_form("interface-naming standard", !standard)
}
