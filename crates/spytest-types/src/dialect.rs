//! Control-surface dialect selection.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Control surface used to drive a device.
///
/// Every operation resolves its dialect exactly once, then builds and sends
/// commands for that surface only. The two REST variants share URL templates
/// and body shapes and differ only in the HTTP verb used for config pushes.
///
/// # Examples
///
/// ```
/// use spytest_types::Dialect;
///
/// let d: Dialect = "rest-patch".parse().unwrap();
/// assert_eq!(d, Dialect::RestPatch);
/// assert!(d.is_rest());
/// assert_eq!(d.to_string(), "rest-patch");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Legacy line-oriented shell (`config`/`show` commands).
    Click,
    /// Structured command shell (interface contexts, `no`-form negation).
    Klish,
    /// REST management API, config pushed with PATCH.
    RestPatch,
    /// REST management API, config pushed with PUT.
    RestPut,
}

impl Dialect {
    /// Returns the wire token used by device configuration and callers.
    pub const fn token(&self) -> &'static str {
        match self {
            Dialect::Click => "click",
            Dialect::Klish => "klish",
            Dialect::RestPatch => "rest-patch",
            Dialect::RestPut => "rest-put",
        }
    }

    /// Returns true for the REST surfaces.
    pub const fn is_rest(&self) -> bool {
        matches!(self, Dialect::RestPatch | Dialect::RestPut)
    }

    /// Returns true for the CLI surfaces.
    pub const fn is_cli(&self) -> bool {
        !self.is_rest()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for Dialect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "click" => Ok(Dialect::Click),
            "klish" => Ok(Dialect::Klish),
            "rest-patch" => Ok(Dialect::RestPatch),
            "rest-put" => Ok(Dialect::RestPut),
            _ => Err(ParseError::InvalidDialect(s.to_string())),
        }
    }
}

/// Interface naming convention active on a device.
///
/// Native naming uses flat names (`Ethernet0`); standard naming uses
/// front-panel notation (`Eth1/1`). Lookup operations must resolve either
/// form regardless of which mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingMode {
    /// Flat names such as `Ethernet0` (default).
    #[default]
    Native,
    /// Front-panel names such as `Eth1/1`.
    Standard,
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingMode::Native => write!(f, "native"),
            NamingMode::Standard => write!(f, "standard"),
        }
    }
}

impl FromStr for NamingMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(NamingMode::Native),
            "standard" => Ok(NamingMode::Standard),
            _ => Err(ParseError::InvalidNamingMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dialect_tokens_round_trip() {
        for d in [
            Dialect::Click,
            Dialect::Klish,
            Dialect::RestPatch,
            Dialect::RestPut,
        ] {
            assert_eq!(d.token().parse::<Dialect>().unwrap(), d);
        }
    }

    #[test]
    fn test_dialect_parse_case_insensitive() {
        assert_eq!("KLISH".parse::<Dialect>().unwrap(), Dialect::Klish);
        assert_eq!("Rest-Put".parse::<Dialect>().unwrap(), Dialect::RestPut);
    }

    #[test]
    fn test_dialect_parse_unknown() {
        assert_eq!(
            "vtysh".parse::<Dialect>(),
            Err(ParseError::InvalidDialect("vtysh".to_string()))
        );
    }

    #[test]
    fn test_dialect_classification() {
        assert!(Dialect::RestPatch.is_rest());
        assert!(Dialect::RestPut.is_rest());
        assert!(Dialect::Click.is_cli());
        assert!(Dialect::Klish.is_cli());
        assert!(!Dialect::Klish.is_rest());
    }

    #[test]
    fn test_naming_mode() {
        assert_eq!("standard".parse::<NamingMode>().unwrap(), NamingMode::Standard);
        assert_eq!(NamingMode::default(), NamingMode::Native);
        assert_eq!(NamingMode::Standard.to_string(), "standard");
        assert!("compact".parse::<NamingMode>().is_err());
    }
}
