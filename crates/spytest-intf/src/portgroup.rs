//! Port-group queries and speed configuration.
//!
//! Some platforms gang front-panel ports into groups that share a speed
//! setting. The show output reports each group as an `Ethernet<a>-Ethernet<b>`
//! span, expanded here into individual port names.

use tracing::instrument;

use spytest_common::{table, CommandSet, ConfigOptions, IntfError, IntfResult};
use spytest_types::Dialect;

use crate::api::IntfApi;
use crate::commands;

/// One port group as reported by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortGroup {
    /// Group identifier.
    pub portgroup: String,
    /// Member ports.
    pub ports: Vec<String>,
    /// Speeds the group accepts.
    pub valid_speeds: Vec<String>,
}

/// Expands an `Ethernet<a>-Ethernet<b>` span into port names. A bare port
/// name expands to itself.
fn expand_port_span(span: &str) -> Vec<String> {
    let stripped = span.replace("Ethernet", "");
    let mut parts = stripped.splitn(2, '-');
    let first = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let second = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    match (first, second) {
        (Some(lo), Some(hi)) if lo <= hi => {
            (lo..=hi).map(|i| format!("Ethernet{}", i)).collect()
        }
        (Some(only), None) => vec![format!("Ethernet{}", only)],
        _ => Vec::new(),
    }
}

impl IntfApi {
    /// Lists the device's port groups, optionally narrowed to the group
    /// containing one interface.
    #[instrument(skip(self), fields(device = self.device_name()))]
    pub async fn show_portgroup(
        &self,
        interface: Option<&str>,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<PortGroup>> {
        let dialect = self.resolve(cli_type)?;
        if dialect.is_rest() {
            return Err(IntfError::unsupported_property("portgroup", dialect));
        }
        let set = CommandSet::Show {
            command: commands::SHOW_PORTGROUP.to_string(),
        };
        let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
        let rows = table::parse_show_output(raw.as_text().unwrap_or_default());

        let mut groups = Vec::new();
        for row in rows {
            let get = |key: &str| {
                row.iter()
                    .find(|(h, _)| h == key)
                    .map(|(_, v)| v.clone())
            };
            let Some(span) = get("ports") else { continue };
            let Some(portgroup) = get("portgroup") else { continue };
            let ports = expand_port_span(&span);
            let ports = match interface {
                Some(name) => {
                    if ports.iter().any(|p| p == name) {
                        vec![name.to_string()]
                    } else {
                        continue;
                    }
                }
                None => ports,
            };
            groups.push(PortGroup {
                portgroup,
                ports,
                valid_speeds: get("valid_speeds")
                    .map(|s| s.split(',').map(|v| v.trim().to_string()).collect())
                    .unwrap_or_default(),
            });
            if interface.is_some() {
                break;
            }
        }
        Ok(groups)
    }

    /// Verifies group membership and/or an accepted speed.
    pub async fn verify_portgroup(
        &self,
        interface: Option<&str>,
        portgroup: Option<&str>,
        speed: Option<&str>,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let groups = self.show_portgroup(interface, cli_type).await?;
        if groups.is_empty() {
            return Ok(false);
        }
        for group in &groups {
            if let Some(expected) = portgroup {
                if group.portgroup != expected {
                    return Ok(false);
                }
            }
            if let Some(speed) = speed {
                if !group.valid_speeds.iter().any(|s| s == speed) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Returns true when the platform exposes port groups at all.
    pub async fn is_port_group_supported(&self, cli_type: Option<Dialect>) -> IntfResult<bool> {
        Ok(!self.show_portgroup(None, cli_type).await?.is_empty())
    }

    /// Sets a port-group property (speed).
    pub async fn config_portgroup_property(
        &self,
        portgroup: &str,
        property: &str,
        value: &str,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = self.resolve(cli_type)?;
        if dialect.is_rest() {
            return Err(IntfError::unsupported_property("portgroup", dialect));
        }
        let set = CommandSet::Config {
            commands: vec![commands::build_portgroup_property_cmd(
                property, portgroup, value,
            )],
        };
        self.invoke(&set, dialect, &ConfigOptions::skip_errors()).await?;
        Ok(true)
    }
}
