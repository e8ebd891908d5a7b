//! Interface, queue and watermark counter operations.
//!
//! Clearing and reading are independent operations: a read immediately
//! after a clear is legal even if the device has not reset the values
//! yet, and no ordering is guaranteed across dialects.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::instrument;

use spytest_common::{
    parse_counter_value, table, CommandSet, ConfigOptions, CounterFields, IntfResult,
    InterfaceRecord,
};
use spytest_types::{Dialect, InterfaceRef};

use crate::api::IntfApi;
use crate::openconfig;
use crate::rest::urls;
use crate::status::records_from_rows;
use crate::{commands, klish, rest};

/// Feature gate for the per-interface counters flag on the legacy shell.
const FEATURE_COUNTERS_INTERFACE: &str = "show-interfaces-counters-interface-command";

/// Feature gate for the counters clear flag on the legacy shell.
const FEATURE_COUNTERS_CLEAR: &str = "show-interfaces-counters-clear-command";

/// Timeout for the counter clear RPC, which can be slow on loaded devices.
const CLEAR_COUNTERS_TIMEOUT: Duration = Duration::from_secs(50);

/// Target of a counter clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterScope {
    /// All interfaces.
    All,
    /// One interface by name.
    Interface(String),
}

/// Watermark counter families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkMode {
    /// Unicast queue watermarks.
    Unicast,
    /// Multicast queue watermarks.
    Multicast,
    /// Shared priority-group watermarks.
    Shared,
    /// Headroom priority-group watermarks.
    Headroom,
    /// Every family, in report order.
    All,
}

impl WatermarkMode {
    /// Counter families selected by this mode.
    fn families(&self) -> &'static [&'static str] {
        match self {
            WatermarkMode::Multicast => &["queue watermark multicast"],
            WatermarkMode::Unicast => &["queue watermark unicast"],
            WatermarkMode::Shared => &["priority-group watermark shared"],
            WatermarkMode::Headroom => &["priority-group watermark headroom"],
            WatermarkMode::All => &[
                "queue watermark multicast",
                "queue watermark unicast",
                "priority-group watermark shared",
                "priority-group watermark headroom",
            ],
        }
    }
}

impl IntfApi {
    /// Reads counters for every interface.
    #[instrument(skip(self), fields(device = self.device_name()))]
    pub async fn show_interface_counters_all(
        &self,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<InterfaceRecord>> {
        let dialect = self.resolve(cli_type)?;
        match dialect {
            Dialect::Click => {
                self.show_counters_table(&commands::build_counters_show_cmd(true), dialect)
                    .await
            }
            Dialect::Klish => {
                self.show_counters_table(klish::SHOW_INTERFACE_COUNTERS, dialect)
                    .await
            }
            Dialect::RestPatch | Dialect::RestPut => {
                let url = self.rest_template(urls::ALL_INTERFACES)?;
                let doc = self.rest_get(&url, self.rest_timeout()).await?;
                Ok(openconfig::records_from_document(&doc))
            }
        }
    }

    /// Reads counters for one interface. The result is empty when the
    /// device does not report the interface.
    pub async fn show_specific_interface_counters(
        &self,
        interface: &str,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<InterfaceRecord>> {
        let dialect = self.resolve(cli_type)?;
        let records = match dialect {
            Dialect::Click => {
                let command = if self.session().is_feature_supported(FEATURE_COUNTERS_INTERFACE) {
                    commands::build_counters_interface_cmd(interface)
                } else {
                    format!(
                        "{} | grep -w {}",
                        commands::build_counters_show_cmd(true),
                        interface
                    )
                };
                self.show_counters_table(&command, dialect).await?
            }
            Dialect::Klish => {
                let command = format!(
                    "{} | grep \"{} \"",
                    klish::SHOW_INTERFACE_COUNTERS,
                    interface
                );
                self.show_counters_table(&command, dialect).await?
            }
            Dialect::RestPatch | Dialect::RestPut => {
                let template = self.rest_template(urls::PER_INTERFACE_DETAILS)?;
                let url = spytest_common::render_url(&template, &[interface]);
                let doc = self.rest_get(&url, Duration::from_secs(60)).await?;
                openconfig::records_from_document(&doc)
            }
        };
        Ok(records
            .into_iter()
            .filter(|r| r.interface == interface)
            .collect())
    }

    /// Returns the requested counters for one interface, preserving the
    /// device's formatted string values. Counters the device did not
    /// report are absent from the result.
    pub async fn get_interface_counters(
        &self,
        interface: &str,
        counters: &[&str],
        cli_type: Option<Dialect>,
    ) -> IntfResult<CounterFields> {
        let records = self
            .show_specific_interface_counters(interface, cli_type)
            .await?;
        let Some(record) = records.first() else {
            return Ok(CounterFields::new());
        };
        Ok(counters
            .iter()
            .filter_map(|name| record.field(name).map(|v| ((*name).to_string(), v)))
            .collect())
    }

    /// Reads the detailed counter set for one interface. The REST
    /// surfaces have no detailed view and fall back to the structured
    /// shell.
    pub async fn show_interface_counters_detailed(
        &self,
        interface: &str,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<InterfaceRecord>> {
        let dialect = match self.resolve(cli_type)? {
            Dialect::RestPatch | Dialect::RestPut => Dialect::Klish,
            other => other,
        };
        let command = match dialect {
            Dialect::Click => commands::build_counters_detailed_cmd(interface),
            _ => format!("{} {}", klish::SHOW_INTERFACE_COUNTERS, interface),
        };
        self.show_counters_table(&command, dialect).await
    }

    /// Clears interface counters, for one interface or all of them.
    ///
    /// Succeeding here says nothing about when the device resets the
    /// values; an immediate read may still observe the old numbers.
    #[instrument(skip(self), fields(device = self.device_name()))]
    pub async fn clear_interface_counters(
        &self,
        scope: CounterScope,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = self.resolve(cli_type)?;
        match dialect {
            Dialect::Klish => {
                let command = match &scope {
                    CounterScope::All => klish::build_counters_clear_cmd(None),
                    CounterScope::Interface(name) => {
                        let intf = InterfaceRef::parse(name)?;
                        klish::build_counters_clear_cmd(Some(&intf))
                    }
                };
                let options = ConfigOptions {
                    skip_error_check: true,
                    confirm: Some('y'),
                    exec_mode: true,
                };
                self.invoke(
                    &CommandSet::Config {
                        commands: vec![command],
                    },
                    dialect,
                    &options,
                )
                .await?;
                Ok(true)
            }
            Dialect::Click => {
                if self.session().is_feature_supported(FEATURE_COUNTERS_CLEAR) {
                    let set = CommandSet::Show {
                        command: commands::build_counters_clear_cmd(),
                    };
                    self.invoke(&set, dialect, &ConfigOptions::default()).await?;
                } else {
                    let set = CommandSet::Config {
                        commands: vec![commands::SONIC_CLEAR_COUNTERS.to_string()],
                    };
                    self.invoke(&set, dialect, &ConfigOptions::default()).await?;
                }
                Ok(true)
            }
            Dialect::RestPatch | Dialect::RestPut => {
                let template = self.rest_template(urls::CLEAR_INTERFACE_COUNTERS)?;
                let target = match &scope {
                    CounterScope::All => "all",
                    CounterScope::Interface(name) => name.as_str(),
                };
                let request = rest::build_clear_counters_request(&template, target);
                let raw = self.invoke_rest(&[request], CLEAR_COUNTERS_TIMEOUT).await?;
                Ok(raw.succeeded())
            }
        }
    }

    /// Reads queue counters for one interface, optionally filtered to a
    /// single queue (`UC0`..`UC9`, `MC10`..`MC19`).
    pub async fn show_queue_counters(
        &self,
        interface: &str,
        queue: Option<&str>,
        cli_type: Option<Dialect>,
    ) -> IntfResult<Vec<InterfaceRecord>> {
        let dialect = self.resolve(cli_type)?;
        let records = match dialect {
            Dialect::Click => {
                self.show_counters_table(
                    &commands::build_queue_counters_cmd(interface, false),
                    dialect,
                )
                .await?
            }
            Dialect::Klish => {
                let parsed = if interface == "CPU" {
                    None
                } else {
                    Some(InterfaceRef::parse(interface)?)
                };
                let command = klish::build_queue_counters_cmd(interface, parsed.as_ref());
                self.show_counters_table(&command, dialect).await?
            }
            Dialect::RestPatch | Dialect::RestPut => {
                let template = self.rest_template(urls::QUEUE_COUNTERS)?;
                let url = spytest_common::render_url(&template, &[interface]);
                let doc = self.rest_get(&url, self.rest_timeout()).await?;
                queue_records_from_document(interface, &doc)
            }
        };
        match queue {
            Some(q) => Ok(records
                .into_iter()
                .filter(|r| r.counter("txq") == Some(q))
                .collect()),
            None => Ok(records),
        }
    }

    /// Clears queue counters, globally or per interface. The REST
    /// surfaces have no clear RPC and fall back to the structured shell.
    pub async fn clear_queue_counters(
        &self,
        interfaces: &[&str],
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let dialect = match self.resolve(cli_type)? {
            Dialect::RestPatch | Dialect::RestPut => Dialect::Klish,
            other => other,
        };
        match dialect {
            Dialect::Click => {
                if interfaces.is_empty() {
                    let set = CommandSet::Show {
                        command: commands::build_queue_counters_clear_all_cmd(),
                    };
                    self.invoke(&set, dialect, &ConfigOptions::default()).await?;
                } else {
                    for name in interfaces {
                        let set = CommandSet::Show {
                            command: commands::build_queue_counters_cmd(name, true),
                        };
                        self.invoke(&set, dialect, &ConfigOptions::default()).await?;
                    }
                }
                Ok(true)
            }
            _ => {
                let mut lines = Vec::new();
                if interfaces.is_empty() {
                    lines.push(klish::build_queue_counters_clear_cmd(None));
                } else {
                    for name in interfaces {
                        let parsed = if *name == "CPU" {
                            None
                        } else {
                            Some(InterfaceRef::parse(name)?)
                        };
                        lines.push(klish::build_queue_counters_clear_cmd(Some((
                            *name,
                            parsed.as_ref(),
                        ))));
                    }
                }
                let options = ConfigOptions {
                    exec_mode: true,
                    ..ConfigOptions::default()
                };
                self.invoke(&CommandSet::Config { commands: lines }, dialect, &options)
                    .await?;
                Ok(true)
            }
        }
    }

    /// Reads watermark counters as raw text, one family after another.
    /// Watermarks are a legacy-shell feature.
    pub async fn show_watermark_counters(&self, mode: WatermarkMode) -> IntfResult<String> {
        let mut output = String::new();
        for family in mode.families() {
            let set = CommandSet::Show {
                command: commands::build_watermark_show_cmd(family),
            };
            let raw = self.invoke(&set, Dialect::Click, &ConfigOptions::default()).await?;
            if let Some(text) = raw.as_text() {
                output.push_str(text);
                if !text.ends_with('\n') {
                    output.push('\n');
                }
            }
        }
        Ok(output)
    }

    /// Clears watermark counters for the selected families.
    pub async fn clear_watermark_counters(&self, mode: WatermarkMode) -> IntfResult<bool> {
        let commands: Vec<String> = mode
            .families()
            .iter()
            .map(|family| commands::build_watermark_clear_cmd(family))
            .collect();
        self.invoke(
            &CommandSet::Config { commands },
            Dialect::Click,
            &ConfigOptions::default(),
        )
        .await?;
        Ok(true)
    }

    /// Reads multiple counters across multiple ports and converts them to
    /// numbers. Ports or counters the device did not report are absent
    /// from the result.
    pub async fn get_interface_counter_value(
        &self,
        ports: &[&str],
        counters: &[&str],
        cli_type: Option<Dialect>,
    ) -> IntfResult<HashMap<String, HashMap<String, f64>>> {
        let records = self.show_interface_counters_all(cli_type).await?;
        let mut out: HashMap<String, HashMap<String, f64>> = HashMap::new();
        for port in ports {
            let Some(record) = records.iter().find(|r| r.interface == *port) else {
                continue;
            };
            let mut values = HashMap::new();
            for name in counters {
                if let Some(parsed) = record.field(name).as_deref().and_then(parse_counter_value) {
                    values.insert((*name).to_string(), parsed);
                }
            }
            out.insert((*port).to_string(), values);
        }
        Ok(out)
    }

    async fn show_counters_table(
        &self,
        command: &str,
        dialect: Dialect,
    ) -> IntfResult<Vec<InterfaceRecord>> {
        let set = CommandSet::Show {
            command: command.to_string(),
        };
        let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
        Ok(records_from_rows(table::parse_show_output(
            raw.as_text().unwrap_or_default(),
        )))
    }
}

/// Flattens a queue-counter document into per-queue records. Each record
/// carries the port name plus `txq` and the transmit/drop counters.
fn queue_records_from_document(interface: &str, doc: &Value) -> Vec<InterfaceRecord> {
    let Some(queues) = doc
        .pointer("/openconfig-qos:queues/queue")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    let mut records = Vec::with_capacity(queues.len());
    for queue in queues {
        let Some(name) = queue.get("name").and_then(Value::as_str) else {
            continue;
        };
        let mut record = InterfaceRecord::new(interface);
        record.counters.push(("txq".to_string(), name.to_string()));
        if let Some(state) = queue.get("state").and_then(Value::as_object) {
            for (key, flat) in [
                ("transmit-pkts", "pkts_count"),
                ("transmit-octets", "byte_count"),
                ("dropped-pkts", "pkts_drop"),
                ("dropped-octets", "byte_drop"),
            ] {
                let value = match state.get(key) {
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(Value::Number(n)) => Some(n.to_string()),
                    _ => None,
                };
                if let Some(value) = value {
                    record.counters.push((flat.to_string(), value));
                }
            }
        }
        records.push(record);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_watermark_families() {
        assert_eq!(
            WatermarkMode::Shared.families(),
            &["priority-group watermark shared"]
        );
        assert_eq!(WatermarkMode::All.families().len(), 4);
    }

    #[test]
    fn test_queue_records_from_document() {
        let doc = json!({
            "openconfig-qos:queues": {
                "queue": [
                    {
                        "name": "UC0",
                        "state": { "transmit-pkts": "100", "dropped-pkts": 2 }
                    },
                    { "name": "MC10", "state": {} }
                ]
            }
        });
        let records = queue_records_from_document("Ethernet0", &doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].interface, "Ethernet0");
        assert_eq!(records[0].counter("txq"), Some("UC0"));
        assert_eq!(records[0].counter("pkts_count"), Some("100"));
        assert_eq!(records[0].counter("pkts_drop"), Some("2"));
        assert_eq!(records[1].counter("txq"), Some("MC10"));
        assert_eq!(records[1].counter("pkts_count"), None);
    }

    #[test]
    fn test_queue_records_empty_document() {
        assert!(queue_records_from_document("Ethernet0", &json!({})).is_empty());
    }

    #[test]
    fn test_counter_scope() {
        assert_eq!(CounterScope::All, CounterScope::All);
        assert_ne!(
            CounterScope::Interface("Ethernet0".to_string()),
            CounterScope::All
        );
    }
}
