//! Normalized interface records.
//!
//! Whatever dialect produced the raw output, the normalizer emits the same
//! record shape: known properties land in typed optional fields, everything
//! else (counters, per-platform extras) is kept as ordered name/value
//! strings. "Field absent" is `None` or a missing counter entry, never a
//! placeholder value.

use serde::{Deserialize, Serialize};
use spytest_types::{AdminState, OperState};

/// Ordered counter/extra fields, values preserved as reported.
pub type CounterFields = Vec<(String, String)>;

/// One normalized row of interface state.
///
/// Record ordering in query results follows device/report order, except
/// where an operation explicitly re-orders to match caller-supplied
/// interface order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Canonical interface name as reported.
    pub interface: String,
    /// Administrative state, if reported.
    pub admin_state: Option<AdminState>,
    /// Operational state, if reported.
    pub oper_state: Option<OperState>,
    /// Speed string as reported (e.g., `100G`, `25000`).
    pub speed: Option<String>,
    /// MTU string as reported.
    pub mtu: Option<String>,
    /// Legacy-shell alias column.
    pub alias: Option<String>,
    /// Structured-shell alternate name column.
    pub alt_name: Option<String>,
    /// Description, if reported.
    pub description: Option<String>,
    /// VLAN column, if reported.
    pub vlan: Option<String>,
    /// Counters and per-platform extras, in report order. Values keep
    /// their formatted string form (thousands separators, unit suffixes);
    /// numeric conversion is the caller's job via [`parse_counter_value`].
    pub counters: CounterFields,
}

impl InterfaceRecord {
    /// Creates an empty record for an interface.
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            ..Self::default()
        }
    }

    /// Stores a normalized field by name.
    ///
    /// Known property names fill the typed fields; anything else is kept
    /// as a counter/extra field. Admin/oper tokens that fail to parse are
    /// treated as absent.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "interface" | "iface" | "name" | "port" => self.interface = value,
            "admin" | "admin_state" | "admin_status" => {
                self.admin_state = value.parse().ok();
            }
            "oper" | "oper_state" | "oper_status" => {
                self.oper_state = value.parse().ok();
            }
            "speed" => self.speed = Some(value),
            "mtu" => self.mtu = Some(value),
            "alias" => self.alias = Some(value),
            "altname" | "alternate_name" => self.alt_name = Some(value),
            "description" | "desc" => self.description = Some(value),
            "vlan" => self.vlan = Some(value),
            _ => self.counters.push((name.to_string(), value)),
        }
    }

    /// Looks up a property by its flat name, rendering typed fields back
    /// to the string form callers compare against.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "interface" | "iface" | "name" | "port" => Some(self.interface.clone()),
            "admin" | "admin_state" | "admin_status" => {
                self.admin_state.map(|s| s.to_string())
            }
            "oper" | "oper_state" | "oper_status" => self.oper_state.map(|s| s.to_string()),
            "speed" => self.speed.clone(),
            "mtu" => self.mtu.clone(),
            "alias" => self.alias.clone(),
            "altname" | "alternate_name" => self.alt_name.clone(),
            "description" | "desc" => self.description.clone(),
            "vlan" => self.vlan.clone(),
            _ => self.counter(name).map(str::to_string),
        }
    }

    /// Looks up a counter/extra field by name.
    pub fn counter(&self, name: &str) -> Option<&str> {
        self.counters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Converts a formatted counter string to a number.
///
/// Devices report counters with thousands separators and sometimes a
/// trailing rate/unit suffix (`"1,234,567"`, `"25.62 MB/s"`, `"0.00%"`).
/// The first token is taken, separators and a trailing percent sign are
/// stripped, and the remainder parsed as a float. Returns `None` for
/// non-numeric text such as `"N/A"`.
pub fn parse_counter_value(raw: &str) -> Option<f64> {
    let token = raw.split_whitespace().next()?;
    let cleaned = token.replace(',', "");
    let cleaned = cleaned.strip_suffix('%').unwrap_or(&cleaned);
    cleaned.parse().ok()
}
