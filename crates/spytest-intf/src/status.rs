//! Interface status queries, verification and polling.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, instrument};

use spytest_common::{table, CommandSet, ConfigOptions, IntfResult, InterfaceRecord};
use spytest_types::{Dialect, OperState};

use crate::api::IntfApi;
use crate::openconfig;
use crate::rest::urls;
use crate::{commands, klish};

/// Interface kind filter for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntfKind {
    /// Front-panel physical ports (`Ethernet*`, `Eth*`).
    Physical,
    /// Link aggregation groups (`PortChannel*`).
    PortChannel,
}

/// Builds records from parsed table rows, keeping report order. Rows
/// without an interface column are dropped.
pub(crate) fn records_from_rows(rows: Vec<table::TableRow>) -> Vec<InterfaceRecord> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let mut record = InterfaceRecord::default();
        for (header, value) in row {
            record.set_field(&header, value);
        }
        if !record.interface.is_empty() {
            records.push(record);
        }
    }
    records
}

/// Returns true if the record answers to the given name under either
/// naming convention.
fn record_matches_name(record: &InterfaceRecord, name: &str) -> bool {
    record.interface == name
        || record.alias.as_deref() == Some(name)
        || record.alt_name.as_deref() == Some(name)
}

impl IntfApi {
    /// Queries interface status records, for the requested interfaces or
    /// all of them. Interfaces the device did not report are simply
    /// absent from the result.
    #[instrument(skip(self), fields(device = self.device_name()))]
    pub async fn interface_status_show(
        &self,
        interfaces: &[&str],
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<InterfaceRecord>> {
        let dialect = self.resolve(cli_type)?;
        let records = match dialect {
            Dialect::Click => {
                let set = CommandSet::Show {
                    command: commands::build_status_show_cmd(interfaces),
                };
                let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
                records_from_rows(table::parse_show_output(raw.as_text().unwrap_or_default()))
            }
            Dialect::Klish => {
                let set = CommandSet::Show {
                    command: klish::build_filtered_show_cmd(
                        klish::SHOW_INTERFACE_STATUS,
                        interfaces,
                    ),
                };
                let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
                records_from_rows(table::parse_show_output(raw.as_text().unwrap_or_default()))
            }
            Dialect::RestPatch | Dialect::RestPut => {
                if interfaces.is_empty() {
                    let url = self.rest_template(urls::ALL_INTERFACES)?;
                    let doc = self.rest_get(&url, self.rest_timeout()).await?;
                    openconfig::records_from_document(&doc)
                } else {
                    let template = self.rest_template(urls::PER_INTERFACE_DETAILS)?;
                    let mut records = Vec::with_capacity(interfaces.len());
                    for name in interfaces {
                        let url = spytest_common::render_url(&template, &[*name]);
                        let doc = self.rest_get(&url, self.rest_timeout()).await?;
                        records.extend(openconfig::records_from_document(&doc));
                    }
                    records
                }
            }
        };

        if interfaces.is_empty() {
            return Ok(records);
        }
        // The grep-style filters match loosely; keep only exact name hits.
        Ok(records
            .into_iter()
            .filter(|r| interfaces.iter().any(|n| record_matches_name(r, n)))
            .collect())
    }

    /// Lists interface names known to the device, optionally filtered by
    /// kind. Returns an empty list when the device reports nothing.
    pub async fn get_all_interfaces(
        &self,
        kind: Option<IntfKind>,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<String>> {
        let records = self.interface_status_show(&[], cli_type).await?;
        let names = records.into_iter().map(|r| r.interface);
        let names: Vec<String> = match kind {
            Some(IntfKind::Physical) => names.filter(|n| n.starts_with("Eth")).collect(),
            Some(IntfKind::PortChannel) => names
                .filter(|n| n.to_lowercase().starts_with("portchannel"))
                .collect(),
            None => names.collect(),
        };
        Ok(names)
    }

    /// Lists interfaces that are operationally up.
    pub async fn get_up_interfaces(&self, cli_type: Option<Dialect>) -> IntfResult<Vec<String>> {
        self.interfaces_by_oper_state(OperState::Up, cli_type).await
    }

    /// Lists interfaces that are operationally down.
    pub async fn get_down_interfaces(&self, cli_type: Option<Dialect>) -> IntfResult<Vec<String>> {
        self.interfaces_by_oper_state(OperState::Down, cli_type).await
    }

    async fn interfaces_by_oper_state(
        &self,
        state: OperState,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<String>> {
        let records = self.interface_status_show(&[], cli_type).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.oper_state == Some(state))
            .map(|r| r.interface)
            .collect())
    }

    /// Verifies that every listed interface reports the given property
    /// value. An interface absent from the device report fails the check;
    /// it is never treated as a null-valued match.
    pub async fn verify_interface_status(
        &self,
        interfaces: &[&str],
        property: &str,
        value: &str,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        for name in interfaces {
            let records = self.interface_status_show(&[*name], cli_type).await?;
            let matched = records.iter().any(|r| {
                record_matches_name(r, name) && r.field(property).as_deref() == Some(value)
            });
            if !matched {
                debug!(
                    device = self.device_name(),
                    interface = name,
                    property,
                    expected = value,
                    "status mismatch"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns one property value per requested interface, in the order
    /// the caller passed them. Collection stops at the first interface
    /// with no reported value.
    pub async fn get_interface_property(
        &self,
        interfaces: &[&str],
        property: &str,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<String>> {
        let records = self.interface_status_show(interfaces, cli_type).await?;
        let mut values = Vec::with_capacity(interfaces.len());
        for name in interfaces {
            let value = records
                .iter()
                .find(|r| record_matches_name(r, name))
                .and_then(|r| r.field(property));
            match value {
                Some(v) => values.push(v),
                None => break,
            }
        }
        Ok(values)
    }

    /// Groups physical ports by reported speed.
    pub async fn get_all_ports_speed_dict(
        &self,
        cli_type: Option<Dialect>,
    ) -> IntfResult<HashMap<String, Vec<String>>> {
        let records = self.interface_status_show(&[], cli_type).await?;
        let mut by_speed: HashMap<String, Vec<String>> = HashMap::new();
        for record in records {
            if !record.interface.starts_with("Eth") {
                continue;
            }
            if let Some(speed) = record.speed.clone() {
                by_speed.entry(speed).or_default().push(record.interface);
            }
        }
        Ok(by_speed)
    }

    /// Polls until the device reports any interfaces, for at most
    /// `iterations` attempts with a fixed delay between them. Blocks the
    /// calling task for up to `iterations x delay`.
    pub async fn poll_for_interfaces(
        &self,
        iterations: usize,
        delay: Duration,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        for attempt in 1..=iterations {
            let interfaces = self.get_all_interfaces(None, cli_type).await?;
            if !interfaces.is_empty() {
                debug!(device = self.device_name(), attempt, "interfaces present");
                return Ok(true);
            }
            tokio::time::sleep(delay).await;
        }
        Ok(false)
    }

    /// Polls until the property matches, for at most `iterations`
    /// attempts with a fixed delay between them.
    pub async fn poll_for_interface_status(
        &self,
        interfaces: &[&str],
        property: &str,
        value: &str,
        iterations: usize,
        delay: Duration,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        for attempt in 1..=iterations {
            if self
                .verify_interface_status(interfaces, property, value, cli_type)
                .await?
            {
                debug!(device = self.device_name(), attempt, "status matched");
                return Ok(true);
            }
            tokio::time::sleep(delay).await;
        }
        Ok(false)
    }
}
