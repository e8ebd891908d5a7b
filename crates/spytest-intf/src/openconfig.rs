//! Normalization of REST documents into interface records.
//!
//! The REST surface reports interface state under nested openconfig
//! subtrees. This module flattens those into the same property names the
//! CLI dialects produce, so callers verify state identically regardless of
//! dialect. Fields missing from the document normalize to absence, not to
//! a placeholder.

use serde_json::Value;
use spytest_common::InterfaceRecord;

/// Openconfig counter leaf names mapped to the flat CLI counter names.
const COUNTER_MAP: &[(&str, &str)] = &[
    ("in-octets", "rx_oct"),
    ("in-pkts", "rx_ok"),
    ("in-discards", "rx_drp"),
    ("in-errors", "rx_err"),
    ("out-octets", "tx_oct"),
    ("out-pkts", "tx_ok"),
    ("out-discards", "tx_drp"),
    ("out-errors", "tx_err"),
];

/// Renders a scalar JSON value to the string form records carry.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Converts an openconfig speed identity to the CLI speed token
/// (`openconfig-if-ethernet:SPEED_100GB` becomes `100G`).
pub fn speed_token(raw: &str) -> String {
    let ident = raw.rsplit(':').next().unwrap_or(raw);
    let ident = ident.strip_prefix("SPEED_").unwrap_or(ident);
    ident.strip_suffix('B').unwrap_or(ident).to_string()
}

/// Builds one record from an openconfig interface object.
///
/// Returns `None` when the object carries no `name`, which is the only
/// mandatory leaf.
pub fn record_from_interface(obj: &Value) -> Option<InterfaceRecord> {
    let name = obj.get("name").and_then(Value::as_str)?;
    let mut record = InterfaceRecord::new(name);

    if let Some(state) = obj.get("state") {
        if let Some(admin) = state.get("admin-status").and_then(Value::as_str) {
            record.set_field("admin", admin.to_lowercase());
        }
        if let Some(oper) = state.get("oper-status").and_then(Value::as_str) {
            record.set_field("oper", oper.to_lowercase());
        }
        if let Some(mtu) = state.get("mtu").and_then(scalar) {
            record.mtu = Some(mtu);
        }
        if let Some(desc) = state.get("description").and_then(Value::as_str) {
            if !desc.is_empty() {
                record.description = Some(desc.to_string());
            }
        }
        for key in ["alt-name", "openconfig-interfaces-ext:alt-name"] {
            if let Some(alt) = state.get(key).and_then(Value::as_str) {
                record.alt_name = Some(alt.to_string());
            }
        }
        if let Some(counters) = state.get("counters").and_then(Value::as_object) {
            for (key, value) in counters {
                let Some(value) = scalar(value) else { continue };
                let flat = COUNTER_MAP
                    .iter()
                    .find(|(oc, _)| oc == key)
                    .map(|(_, flat)| (*flat).to_string())
                    .unwrap_or_else(|| key.replace('-', "_"));
                record.counters.push((flat, value));
            }
        }
    }

    let speed = obj
        .pointer("/openconfig-if-ethernet:ethernet/state/port-speed")
        .and_then(Value::as_str);
    if let Some(speed) = speed {
        record.speed = Some(speed_token(speed));
    }

    Some(record)
}

/// Flattens a REST document into records, in report order.
///
/// Accepts the all-interfaces subtree, the single-interface query form
/// (a one-element list), or a bare interface object.
pub fn records_from_document(doc: &Value) -> Vec<InterfaceRecord> {
    let list = doc
        .pointer("/openconfig-interfaces:interfaces/interface")
        .or_else(|| doc.get("openconfig-interfaces:interface"))
        .or_else(|| doc.get("interface"));

    match list {
        Some(Value::Array(items)) => items.iter().filter_map(record_from_interface).collect(),
        _ => record_from_interface(doc).into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use spytest_types::{AdminState, OperState};

    fn sample_interface() -> Value {
        json!({
            "name": "Ethernet0",
            "state": {
                "admin-status": "UP",
                "oper-status": "DOWN",
                "mtu": 9100,
                "description": "uplink",
                "counters": {
                    "in-pkts": "1234",
                    "out-pkts": "77",
                    "in-fcs-errors": "0"
                }
            },
            "openconfig-if-ethernet:ethernet": {
                "state": { "port-speed": "openconfig-if-ethernet:SPEED_100GB" }
            }
        })
    }

    #[test]
    fn test_record_from_interface() {
        let record = record_from_interface(&sample_interface()).unwrap();
        assert_eq!(record.interface, "Ethernet0");
        assert_eq!(record.admin_state, Some(AdminState::Up));
        assert_eq!(record.oper_state, Some(OperState::Down));
        assert_eq!(record.mtu.as_deref(), Some("9100"));
        assert_eq!(record.description.as_deref(), Some("uplink"));
        assert_eq!(record.speed.as_deref(), Some("100G"));
    }

    #[test]
    fn test_counter_mapping() {
        let record = record_from_interface(&sample_interface()).unwrap();
        assert_eq!(record.counter("rx_ok"), Some("1234"));
        assert_eq!(record.counter("tx_ok"), Some("77"));
        // Unmapped leaves keep a normalized form of their own name.
        assert_eq!(record.counter("in_fcs_errors"), Some("0"));
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let record = record_from_interface(&json!({
            "name": "Ethernet4",
            "state": { "admin-status": "DOWN" }
        }))
        .unwrap();
        assert_eq!(record.admin_state, Some(AdminState::Down));
        assert_eq!(record.oper_state, None);
        assert_eq!(record.mtu, None);
        assert_eq!(record.speed, None);
        assert!(record.counters.is_empty());
    }

    #[test]
    fn test_empty_description_is_absent() {
        let record = record_from_interface(&json!({
            "name": "Ethernet4",
            "state": { "description": "" }
        }))
        .unwrap();
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_records_from_all_interfaces_document() {
        let doc = json!({
            "openconfig-interfaces:interfaces": {
                "interface": [
                    sample_interface(),
                    { "name": "Ethernet4", "state": { "admin-status": "DOWN" } }
                ]
            }
        });
        let records = records_from_document(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].interface, "Ethernet0");
        assert_eq!(records[1].interface, "Ethernet4");
    }

    #[test]
    fn test_records_from_single_interface_query() {
        let doc = json!({
            "openconfig-interfaces:interface": [ sample_interface() ]
        });
        let records = records_from_document(&doc);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_nameless_object_yields_nothing() {
        assert!(records_from_document(&json!({"state": {}})).is_empty());
    }

    #[test]
    fn test_speed_token() {
        assert_eq!(speed_token("openconfig-if-ethernet:SPEED_25GB"), "25G");
        assert_eq!(speed_token("SPEED_2500MB"), "2500M");
        assert_eq!(speed_token("100G"), "100G");
    }
}
