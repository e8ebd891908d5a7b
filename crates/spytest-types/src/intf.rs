//! Canonical interface identity.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognized interface name prefixes.
///
/// Longest-prefix order matters during parsing: `Ethernet12` must classify
/// as [`InterfaceType::Ethernet`], not `Eth`, and `PortChannel4` as
/// [`InterfaceType::PortChannel`], not `Po`.
const PREFIXES: &[(&str, InterfaceType)] = &[
    ("PortChannel", InterfaceType::PortChannel),
    ("Management", InterfaceType::Management),
    ("Ethernet", InterfaceType::Ethernet),
    ("Loopback", InterfaceType::Loopback),
    ("Tunnel", InterfaceType::Tunnel),
    ("Vlan", InterfaceType::Vlan),
    ("Mgmt", InterfaceType::Management),
    ("Eth", InterfaceType::Eth),
    ("Po", InterfaceType::PortChannel),
];

/// Classification of a logical interface by its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    /// Physical port, native naming (`Ethernet0`).
    Ethernet,
    /// Physical port, standard naming (`Eth1/1`).
    Eth,
    /// Link aggregation group (`PortChannel4`, `Po4`).
    PortChannel,
    /// VLAN interface (`Vlan100`).
    Vlan,
    /// Loopback interface (`Loopback0`).
    Loopback,
    /// Management port (`Management0`).
    Management,
    /// Tunnel interface (`Tunnel1`).
    Tunnel,
}

impl InterfaceType {
    /// Returns the context keyword used when entering an interface scope
    /// in the structured shell (`interface <keyword> <number>`).
    pub const fn keyword(&self) -> &'static str {
        match self {
            InterfaceType::Ethernet => "Ethernet",
            InterfaceType::Eth => "Eth",
            InterfaceType::PortChannel => "PortChannel",
            InterfaceType::Vlan => "Vlan",
            InterfaceType::Loopback => "Loopback",
            InterfaceType::Management => "Management",
            InterfaceType::Tunnel => "Tunnel",
        }
    }

    /// Returns true for front-panel physical port types.
    pub const fn is_physical(&self) -> bool {
        matches!(self, InterfaceType::Ethernet | InterfaceType::Eth)
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A logical interface decomposed into its type and number parts.
///
/// Derivation is a pure function over the name string. Every interface name
/// must match one of the recognized prefixes followed by a non-empty number
/// part (digits, `/` separators for front-panel notation, `.` for
/// sub-interfaces), otherwise derivation fails.
///
/// # Examples
///
/// ```
/// use spytest_types::{InterfaceRef, InterfaceType};
///
/// let intf = InterfaceRef::parse("Ethernet12").unwrap();
/// assert_eq!(intf.if_type(), InterfaceType::Ethernet);
/// assert_eq!(intf.number(), "12");
///
/// let lag = InterfaceRef::parse("PortChannel4").unwrap();
/// assert_eq!(lag.if_type(), InterfaceType::PortChannel);
///
/// let panel = InterfaceRef::parse("Eth1/1").unwrap();
/// assert_eq!(panel.number(), "1/1");
///
/// assert!(InterfaceRef::parse("bond0").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceRef {
    name: String,
    if_type: InterfaceType,
    number: String,
}

impl InterfaceRef {
    /// Parses an interface name into its canonical decomposition.
    pub fn parse(name: &str) -> Result<Self, ParseError> {
        for (prefix, if_type) in PREFIXES {
            if let Some(rest) = name.strip_prefix(prefix) {
                if !rest.is_empty()
                    && rest
                        .chars()
                        .all(|c| c.is_ascii_digit() || c == '/' || c == '.')
                {
                    return Ok(InterfaceRef {
                        name: name.to_string(),
                        if_type: *if_type,
                        number: rest.to_string(),
                    });
                }
            }
        }
        Err(ParseError::InvalidInterfaceName(name.to_string()))
    }

    /// Returns the full interface name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the interface type classification.
    pub fn if_type(&self) -> InterfaceType {
        self.if_type
    }

    /// Returns the number part (may contain `/` or `.`).
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns true for front-panel physical ports.
    pub fn is_physical(&self) -> bool {
        self.if_type.is_physical()
    }
}

impl fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for InterfaceRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterfaceRef::parse(s)
    }
}
