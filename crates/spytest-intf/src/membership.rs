//! VLAN, port-channel and VRF membership configuration.
//!
//! Membership changes are pushed in a fixed sequence: deletes remove
//! members before groups, adds create groups before members. A transport
//! failure mid-sequence leaves the earlier commands applied; nothing is
//! rolled back here -- device cleanup between test cases owns
//! compensation.

use tracing::instrument;

use spytest_common::{CommandSet, ConfigOptions, IntfError, IntfResult};
use spytest_types::{Dialect, InterfaceRef, VlanId, VlanRange};

use crate::api::IntfApi;
use crate::{commands, klish};

/// Feature gate for single-command VLAN range configuration.
const FEATURE_VLAN_RANGE: &str = "vlan-range";

/// Add or remove configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    /// Create/apply.
    Add,
    /// Remove.
    Del,
}

impl ConfigMode {
    /// Legacy-shell verb.
    pub const fn click_verb(&self) -> &'static str {
        match self {
            ConfigMode::Add => "add",
            ConfigMode::Del => "del",
        }
    }

    /// True for removal.
    pub const fn is_del(&self) -> bool {
        matches!(self, ConfigMode::Del)
    }
}

/// VRF bind/unbind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrfOp {
    /// Bind the interface to the VRF.
    Bind,
    /// Remove the binding.
    Unbind,
}

impl VrfOp {
    /// Legacy-shell verb.
    pub const fn click_verb(&self) -> &'static str {
        match self {
            VrfOp::Bind => "bind",
            VrfOp::Unbind => "unbind",
        }
    }

    /// True for removal.
    pub const fn is_unbind(&self) -> bool {
        matches!(self, VrfOp::Unbind)
    }
}

/// A single VLAN ID or an inclusive range.
///
/// Ranges carry order-normalized endpoints; a range with equal endpoints
/// behaves exactly like the single ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VlanSpec {
    /// One VLAN.
    Id(VlanId),
    /// An inclusive ID range.
    Range(VlanRange),
}

impl VlanSpec {
    /// Collapses a degenerate range to its single ID.
    fn effective(&self) -> VlanSpec {
        match self {
            VlanSpec::Range(range) if range.is_single() => VlanSpec::Id(range.lo()),
            other => *other,
        }
    }
}

/// One VLAN group: the VLAN (or range) and its trunk members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanDescriptor {
    /// VLAN ID or range.
    pub vlan: VlanSpec,
    /// Trunk member interfaces.
    pub members: Vec<String>,
}

/// One port-channel group and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortChannelDescriptor {
    /// Group name (e.g., `PortChannel4`).
    pub name: String,
    /// Member interfaces.
    pub members: Vec<String>,
}

/// One interface-to-VRF binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VrfBind {
    /// Interface name.
    pub interface: String,
    /// VRF name.
    pub vrf: String,
}

/// Renders the group create/remove commands for one VLAN spec.
///
/// A range renders as a single range command only where the device
/// advertises range support and the dialect has a range form; otherwise
/// it expands into one command per ID over the normalized inclusive
/// range.
pub fn build_vlan_group_commands(
    dialect: Dialect,
    spec: VlanSpec,
    mode: ConfigMode,
    range_support: bool,
) -> Vec<String> {
    let mut out = Vec::new();
    match (spec.effective(), dialect) {
        (VlanSpec::Id(id), Dialect::Click) => {
            out.push(commands::build_vlan_cmd(mode, id.as_u16()));
        }
        (VlanSpec::Id(id), _) => {
            out.push(klish::vlan_interface_line(id.as_u16(), mode.is_del()));
            if !mode.is_del() {
                out.push("exit".to_string());
            }
        }
        (VlanSpec::Range(range), Dialect::Click) if range_support => {
            out.push(commands::build_vlan_range_cmd(
                mode,
                range.lo().as_u16(),
                range.hi().as_u16(),
            ));
        }
        (VlanSpec::Range(range), Dialect::Click) => {
            for id in range.ids() {
                out.push(commands::build_vlan_cmd(mode, id));
            }
        }
        (VlanSpec::Range(range), _) => {
            // The structured shell creates VLAN interfaces one at a time.
            for id in range.ids() {
                out.push(klish::vlan_interface_line(id, mode.is_del()));
                if !mode.is_del() {
                    out.push("exit".to_string());
                }
            }
        }
    }
    out
}

/// Renders the member add/remove commands for one member of one VLAN
/// spec. Structured-shell output is a context-entry/attribute/exit
/// triple.
pub fn build_vlan_member_commands(
    dialect: Dialect,
    spec: VlanSpec,
    member: &str,
    mode: ConfigMode,
    range_support: bool,
) -> IntfResult<Vec<String>> {
    let negate = mode.is_del();
    match dialect {
        Dialect::Click => Ok(match (spec.effective(), range_support) {
            (VlanSpec::Id(id), _) => {
                vec![commands::build_vlan_member_cmd(mode, id.as_u16(), member)]
            }
            (VlanSpec::Range(range), true) => vec![commands::build_vlan_member_range_cmd(
                mode,
                range.lo().as_u16(),
                range.hi().as_u16(),
                member,
            )],
            (VlanSpec::Range(range), false) => range
                .ids()
                .map(|id| commands::build_vlan_member_cmd(mode, id, member))
                .collect(),
        }),
        Dialect::Klish => {
            let intf = InterfaceRef::parse(member)?;
            let mut lines = vec![klish::enter_interface(&intf)];
            match (spec.effective(), range_support) {
                (VlanSpec::Id(id), _) => {
                    lines.push(klish::trunk_allowed_vlan_line(id.as_u16(), negate));
                }
                (VlanSpec::Range(range), true) => {
                    lines.push(klish::trunk_allowed_vlan_range_line(
                        range.lo().as_u16(),
                        range.hi().as_u16(),
                        negate,
                    ));
                }
                (VlanSpec::Range(range), false) => {
                    for id in range.ids() {
                        lines.push(klish::trunk_allowed_vlan_line(id, negate));
                    }
                }
            }
            lines.push("exit".to_string());
            Ok(lines)
        }
        Dialect::RestPatch | Dialect::RestPut => Err(IntfError::unsupported_property(
            "vlan-membership",
            dialect,
        )),
    }
}

/// Renders the group create/remove commands for one port-channel.
pub fn build_portchannel_group_commands(
    dialect: Dialect,
    descriptor: &PortChannelDescriptor,
    mode: ConfigMode,
) -> IntfResult<Vec<String>> {
    match dialect {
        Dialect::Click => Ok(vec![commands::build_portchannel_cmd(
            mode,
            &descriptor.name,
        )]),
        Dialect::Klish => {
            let pch = InterfaceRef::parse(&descriptor.name)?;
            let enter = klish::enter_interface(&pch);
            Ok(if mode.is_del() {
                vec![format!("no {}", enter)]
            } else {
                vec![enter, "no shutdown".to_string(), "exit".to_string()]
            })
        }
        Dialect::RestPatch | Dialect::RestPut => Err(IntfError::unsupported_property(
            "portchannel-membership",
            dialect,
        )),
    }
}

/// Renders the member add/remove commands for one port-channel member.
pub fn build_portchannel_member_commands(
    dialect: Dialect,
    descriptor: &PortChannelDescriptor,
    member: &str,
    mode: ConfigMode,
) -> IntfResult<Vec<String>> {
    match dialect {
        Dialect::Click => Ok(vec![commands::build_portchannel_member_cmd(
            mode,
            &descriptor.name,
            member,
        )]),
        Dialect::Klish => {
            let pch = InterfaceRef::parse(&descriptor.name)?;
            let intf = InterfaceRef::parse(member)?;
            Ok(klish::context_block(
                &intf,
                klish::channel_group_line(pch.number(), mode.is_del()),
            ))
        }
        Dialect::RestPatch | Dialect::RestPut => Err(IntfError::unsupported_property(
            "portchannel-membership",
            dialect,
        )),
    }
}

impl IntfApi {
    /// Configures VLAN trunk membership for a set of groups.
    ///
    /// Deletes push member removals before group removals; adds push
    /// group creation before member additions. Each phase is one config
    /// batch. A VLAN range renders as a single range command where the
    /// device advertises `vlan-range` support, else it expands one
    /// command per ID.
    #[instrument(skip(self, groups), fields(device = self.device_name()))]
    pub async fn config_vlan_interfaces(
        &self,
        groups: &[VlanDescriptor],
        mode: ConfigMode,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = self.resolve(cli_type)?;
        if dialect.is_rest() {
            return Err(IntfError::unsupported_property("vlan-membership", dialect));
        }
        let range_support = self.session().is_feature_supported(FEATURE_VLAN_RANGE);

        let mut member_cmds = Vec::new();
        for group in groups {
            for member in &group.members {
                member_cmds.extend(build_vlan_member_commands(
                    dialect,
                    group.vlan,
                    member,
                    mode,
                    range_support,
                )?);
            }
        }
        let mut group_cmds = Vec::new();
        for group in groups {
            group_cmds.extend(build_vlan_group_commands(
                dialect,
                group.vlan,
                mode,
                range_support,
            ));
        }

        let phases: [Vec<String>; 2] = if mode.is_del() {
            [member_cmds, group_cmds]
        } else {
            [group_cmds, member_cmds]
        };
        for commands in phases {
            if commands.is_empty() {
                continue;
            }
            self.invoke(
                &CommandSet::Config { commands },
                dialect,
                &ConfigOptions::default(),
            )
            .await?;
        }
        Ok(true)
    }

    /// Configures port-channel groups and their members.
    ///
    /// Same phase ordering as VLANs: member removals precede group
    /// removal, group creation precedes member additions.
    #[instrument(skip(self, groups), fields(device = self.device_name()))]
    pub async fn config_portchannel_interfaces(
        &self,
        groups: &[PortChannelDescriptor],
        mode: ConfigMode,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = self.resolve(cli_type)?;
        if dialect.is_rest() {
            return Err(IntfError::unsupported_property(
                "portchannel-membership",
                dialect,
            ));
        }

        let mut member_cmds = Vec::new();
        for group in groups {
            for member in &group.members {
                member_cmds.extend(build_portchannel_member_commands(
                    dialect, group, member, mode,
                )?);
            }
        }
        let mut group_cmds = Vec::new();
        for group in groups {
            group_cmds.extend(build_portchannel_group_commands(dialect, group, mode)?);
        }

        let phases: [Vec<String>; 2] = if mode.is_del() {
            [member_cmds, group_cmds]
        } else {
            [group_cmds, member_cmds]
        };
        for commands in phases {
            if commands.is_empty() {
                continue;
            }
            self.invoke(
                &CommandSet::Config { commands },
                dialect,
                &ConfigOptions::default(),
            )
            .await?;
        }
        Ok(true)
    }

    /// Binds or unbinds interfaces to VRFs. Not available via REST.
    #[instrument(skip(self, binds), fields(device = self.device_name()))]
    pub async fn config_interface_vrf_binds(
        &self,
        binds: &[VrfBind],
        op: VrfOp,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = self.resolve(cli_type)?;
        let mut lines = Vec::new();
        match dialect {
            Dialect::Click => {
                for bind in binds {
                    lines.push(commands::build_vrf_bind_cmd(op, &bind.interface, &bind.vrf));
                }
            }
            Dialect::Klish => {
                for bind in binds {
                    let intf = InterfaceRef::parse(&bind.interface)?;
                    lines.extend(klish::context_block(
                        &intf,
                        klish::vrf_forwarding_line(&bind.vrf, op.is_unbind()),
                    ));
                }
            }
            Dialect::RestPatch | Dialect::RestPut => {
                return Err(IntfError::unsupported_property("vrf-bind", dialect));
            }
        }
        if lines.is_empty() {
            return Ok(true);
        }
        self.invoke(
            &CommandSet::Config { commands: lines },
            dialect,
            &ConfigOptions::default(),
        )
        .await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(a: u16, b: u16) -> VlanSpec {
        VlanSpec::Range(VlanRange::new(a, b).unwrap())
    }

    #[test]
    fn test_click_member_single() {
        let cmds = build_vlan_member_commands(
            Dialect::Click,
            VlanSpec::Id(VlanId::new(100).unwrap()),
            "Ethernet0",
            ConfigMode::Add,
            false,
        )
        .unwrap();
        assert_eq!(cmds, vec!["config vlan member add 100 Ethernet0".to_string()]);
    }

    #[test]
    fn test_click_member_range_expansion() {
        let cmds = build_vlan_member_commands(
            Dialect::Click,
            range(10, 15),
            "Ethernet0",
            ConfigMode::Add,
            false,
        )
        .unwrap();
        assert_eq!(cmds.len(), 6);
        assert_eq!(cmds[0], "config vlan member add 10 Ethernet0");
        assert_eq!(cmds[5], "config vlan member add 15 Ethernet0");
    }

    #[test]
    fn test_range_expansion_order_invariant() {
        let forward = build_vlan_member_commands(
            Dialect::Click,
            range(10, 15),
            "Ethernet0",
            ConfigMode::Add,
            false,
        )
        .unwrap();
        let reversed = build_vlan_member_commands(
            Dialect::Click,
            range(15, 10),
            "Ethernet0",
            ConfigMode::Add,
            false,
        )
        .unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_click_member_range_with_support() {
        let cmds = build_vlan_member_commands(
            Dialect::Click,
            range(10, 15),
            "Ethernet0",
            ConfigMode::Del,
            true,
        )
        .unwrap();
        assert_eq!(
            cmds,
            vec!["config vlan member range del 10 15 Ethernet0".to_string()]
        );
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let cmds = build_vlan_member_commands(
            Dialect::Click,
            range(7, 7),
            "Ethernet0",
            ConfigMode::Add,
            true,
        )
        .unwrap();
        assert_eq!(cmds, vec!["config vlan member add 7 Ethernet0".to_string()]);
    }

    #[test]
    fn test_klish_member_triple() {
        let cmds = build_vlan_member_commands(
            Dialect::Klish,
            VlanSpec::Id(VlanId::new(100).unwrap()),
            "Ethernet4",
            ConfigMode::Add,
            false,
        )
        .unwrap();
        assert_eq!(
            cmds,
            vec![
                "interface Ethernet 4".to_string(),
                "switchport trunk allowed Vlan 100".to_string(),
                "exit".to_string(),
            ]
        );
    }

    #[test]
    fn test_klish_member_range_no_form() {
        let cmds = build_vlan_member_commands(
            Dialect::Klish,
            range(10, 12),
            "Ethernet4",
            ConfigMode::Del,
            false,
        )
        .unwrap();
        assert_eq!(
            cmds,
            vec![
                "interface Ethernet 4".to_string(),
                "no switchport trunk allowed Vlan 10".to_string(),
                "no switchport trunk allowed Vlan 11".to_string(),
                "no switchport trunk allowed Vlan 12".to_string(),
                "exit".to_string(),
            ]
        );
    }

    #[test]
    fn test_klish_member_range_with_support() {
        let cmds = build_vlan_member_commands(
            Dialect::Klish,
            range(10, 15),
            "Ethernet4",
            ConfigMode::Add,
            true,
        )
        .unwrap();
        assert_eq!(cmds[1], "switchport trunk allowed Vlan 10-15");
    }

    #[test]
    fn test_vlan_group_commands() {
        let single = build_vlan_group_commands(
            Dialect::Click,
            VlanSpec::Id(VlanId::new(100).unwrap()),
            ConfigMode::Add,
            false,
        );
        assert_eq!(single, vec!["sudo config vlan add 100".to_string()]);

        let ranged = build_vlan_group_commands(Dialect::Click, range(10, 15), ConfigMode::Del, true);
        assert_eq!(ranged, vec!["sudo config vlan range del 10 15".to_string()]);

        let expanded =
            build_vlan_group_commands(Dialect::Click, range(10, 12), ConfigMode::Add, false);
        assert_eq!(expanded.len(), 3);
    }

    #[test]
    fn test_klish_group_commands() {
        let add = build_vlan_group_commands(
            Dialect::Klish,
            VlanSpec::Id(VlanId::new(100).unwrap()),
            ConfigMode::Add,
            false,
        );
        assert_eq!(add, vec!["interface Vlan 100".to_string(), "exit".to_string()]);

        let del = build_vlan_group_commands(
            Dialect::Klish,
            VlanSpec::Id(VlanId::new(100).unwrap()),
            ConfigMode::Del,
            false,
        );
        assert_eq!(del, vec!["no interface Vlan 100".to_string()]);
    }

    #[test]
    fn test_portchannel_group_commands() {
        let pch = PortChannelDescriptor {
            name: "PortChannel4".to_string(),
            members: vec![],
        };
        let click = build_portchannel_group_commands(Dialect::Click, &pch, ConfigMode::Add).unwrap();
        assert_eq!(click, vec!["sudo config portchannel add PortChannel4".to_string()]);

        let klish_add =
            build_portchannel_group_commands(Dialect::Klish, &pch, ConfigMode::Add).unwrap();
        assert_eq!(
            klish_add,
            vec![
                "interface PortChannel 4".to_string(),
                "no shutdown".to_string(),
                "exit".to_string(),
            ]
        );

        let klish_del =
            build_portchannel_group_commands(Dialect::Klish, &pch, ConfigMode::Del).unwrap();
        assert_eq!(klish_del, vec!["no interface PortChannel 4".to_string()]);
    }

    #[test]
    fn test_portchannel_member_commands() {
        let pch = PortChannelDescriptor {
            name: "PortChannel4".to_string(),
            members: vec![],
        };
        let klish_add =
            build_portchannel_member_commands(Dialect::Klish, &pch, "Ethernet0", ConfigMode::Add)
                .unwrap();
        assert_eq!(
            klish_add,
            vec![
                "interface Ethernet 0".to_string(),
                "channel-group 4".to_string(),
                "exit".to_string(),
            ]
        );

        let klish_del =
            build_portchannel_member_commands(Dialect::Klish, &pch, "Ethernet0", ConfigMode::Del)
                .unwrap();
        assert_eq!(klish_del[1], "no channel-group");
    }

    #[test]
    fn test_rest_membership_unsupported() {
        let err = build_vlan_member_commands(
            Dialect::RestPatch,
            VlanSpec::Id(VlanId::new(100).unwrap()),
            "Ethernet0",
            ConfigMode::Add,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, IntfError::UnsupportedProperty { .. }));
    }
}
