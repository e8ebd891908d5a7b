//! Interface naming modes and name resolution.
//!
//! Devices run either native naming (`Ethernet0`) or standard front-panel
//! naming (`Eth1/1`). Queries and lookups here work regardless of the
//! active mode and resolve either name form to the canonical physical
//! name.

use tracing::{debug, instrument};

use spytest_common::{CommandSet, ConfigOptions, IntfError, IntfResult, InterfaceRecord};
use spytest_types::{Dialect, InterfaceRef, NamingMode};

use crate::api::IntfApi;
use crate::klish;

/// The record column carrying the alternate name for a dialect.
fn alias_property(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Click => "alias",
        _ => "altname",
    }
}

/// The alternate name carried by a record, whichever column filled it.
fn record_alias(record: &InterfaceRecord) -> Option<&str> {
    record
        .alias
        .as_deref()
        .or(record.alt_name.as_deref())
}

impl IntfApi {
    /// Switches the interface naming convention. Only the structured
    /// shell exposes the command.
    #[instrument(skip(self), fields(device = self.device_name()))]
    pub async fn config_ifname_type(
        &self,
        mode: NamingMode,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = self.resolve(cli_type)?;
        if dialect != Dialect::Klish {
            return Err(IntfError::unsupported_property("interface-naming", dialect));
        }
        let command = klish::interface_naming_line(mode == NamingMode::Standard);
        self.invoke(
            &CommandSet::Config {
                commands: vec![command],
            },
            dialect,
            &ConfigOptions::default(),
        )
        .await?;
        Ok(true)
    }

    /// Queries the active naming mode. Returns `None` when the device
    /// reports nothing.
    pub async fn show_ifname_type(
        &self,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Option<NamingMode>> {
        let dialect = match cli_type {
            Some(d) => d,
            // The naming-mode show lives in the structured shell.
            None => Dialect::Klish,
        };
        if dialect != Dialect::Klish {
            return Err(IntfError::unsupported_property("interface-naming", dialect));
        }
        let set = CommandSet::Show {
            command: klish::SHOW_INTERFACE_NAMING.to_string(),
        };
        let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
        let rows = spytest_common::table::parse_show_output(raw.as_text().unwrap_or_default());
        let mode = rows
            .first()
            .and_then(|row| row.iter().find(|(h, _)| h == "mode"))
            .and_then(|(_, v)| v.parse().ok());
        Ok(mode)
    }

    /// Verifies the active naming mode.
    pub async fn verify_ifname_type(
        &self,
        expected: NamingMode,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        match self.show_ifname_type(cli_type).await? {
            Some(mode) => Ok(mode == expected),
            None => Ok(false),
        }
    }

    /// Returns the alternate name for each given interface, in caller
    /// order.
    pub async fn get_ifname_alias(
        &self,
        interfaces: &[&str],
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<String>> {
        let dialect = self.resolve(cli_type)?;
        self.get_interface_property(interfaces, alias_property(dialect), Some(dialect))
            .await
    }

    /// Returns the native-to-alternate name map for physical ports, in
    /// report order.
    pub async fn get_physical_ifname_map(
        &self,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<(String, String)>> {
        let records = self.interface_status_show(&[], cli_type).await?;
        let mut map = Vec::new();
        for record in records {
            let Some(alias) = record_alias(&record) else {
                continue;
            };
            if record.interface.starts_with("Ethernet") {
                map.push((record.interface.clone(), alias.to_string()));
            } else if record.interface.starts_with("Eth") {
                map.push((alias.to_string(), record.interface.clone()));
            }
        }
        Ok(map)
    }

    /// Resolves an interface name to the canonical physical name,
    /// whichever naming mode is active and whichever form the caller
    /// passed. Non-physical names pass through unchanged, as does a
    /// physical name the device does not report.
    pub async fn get_native_interface_name(
        &self,
        name: &str,
        cli_type: Option<Dialect>,
    ) -> IntfResult<String> {
        Ok(self
            .get_native_interface_names(&[name], cli_type)
            .await?
            .remove(0))
    }

    /// Plural form of [`get_native_interface_name`]; one result per
    /// input, in caller order.
    ///
    /// [`get_native_interface_name`]: IntfApi::get_native_interface_name
    pub async fn get_native_interface_names(
        &self,
        names: &[&str],
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<String>> {
        let mut records: Option<Vec<InterfaceRecord>> = None;
        let mut resolved = Vec::with_capacity(names.len());

        for name in names {
            if name.is_empty() {
                resolved.push(String::new());
                continue;
            }
            let physical = InterfaceRef::parse(name)
                .map(|r| r.is_physical())
                .unwrap_or(false);
            if !physical {
                resolved.push((*name).to_string());
                continue;
            }

            if records.is_none() {
                records = Some(self.interface_status_show(&[], cli_type).await?);
            }
            let table = records.as_deref().unwrap_or_default();

            let mut native = None;
            for record in table {
                let alias = record_alias(record);
                if record.interface == *name || alias == Some(*name) {
                    if record.interface.starts_with("Ethernet") {
                        native = Some(record.interface.clone());
                    } else if let Some(alias) = alias.filter(|a| a.starts_with("Ethernet")) {
                        native = Some(alias.to_string());
                    }
                    break;
                }
            }
            match native {
                Some(native) => {
                    debug!(device = self.device_name(), name, %native, "resolved native name");
                    resolved.push(native);
                }
                None => resolved.push((*name).to_string()),
            }
        }
        Ok(resolved)
    }
}
