//! Port state and property value types.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative state of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    /// Interface is administratively down (default for new ports).
    #[default]
    Down,
    /// Interface is administratively up.
    Up,
}

impl AdminState {
    /// Returns true if the interface is administratively up.
    pub const fn is_up(&self) -> bool {
        matches!(self, AdminState::Up)
    }
}

impl fmt::Display for AdminState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminState::Up => write!(f, "up"),
            AdminState::Down => write!(f, "down"),
        }
    }
}

impl FromStr for AdminState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(AdminState::Up),
            "down" => Ok(AdminState::Down),
            _ => Err(ParseError::InvalidAdminState(s.to_string())),
        }
    }
}

/// Operational state of an interface.
///
/// `Unknown` is what an interface reports before it has ever been observed;
/// the API never transitions state on its own, it only reports what the
/// device said at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperState {
    /// Interface is operationally down.
    Down,
    /// Interface is operationally up.
    Up,
    /// State not available / never observed (default).
    #[default]
    Unknown,
}

impl OperState {
    /// Returns true if the interface is operationally up.
    pub const fn is_up(&self) -> bool {
        matches!(self, OperState::Up)
    }
}

impl fmt::Display for OperState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperState::Up => write!(f, "up"),
            OperState::Down => write!(f, "down"),
            OperState::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for OperState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" => Ok(OperState::Up),
            "down" => Ok(OperState::Down),
            "unknown" => Ok(OperState::Unknown),
            _ => Err(ParseError::InvalidOperState(s.to_string())),
        }
    }
}

/// Forward error correction mode.
///
/// The legal set is closed: `rs`, `fc`, `none`. Values are validated before
/// any command is rendered so that a bad value never produces a partial
/// config push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FecMode {
    /// Reed-Solomon FEC.
    Rs,
    /// FireCode FEC.
    Fc,
    /// FEC disabled.
    None,
}

impl FecMode {
    /// Returns the lowercase CLI token.
    pub const fn token(&self) -> &'static str {
        match self {
            FecMode::Rs => "rs",
            FecMode::Fc => "fc",
            FecMode::None => "none",
        }
    }

    /// Returns the openconfig enumeration value used by the REST surface.
    pub const fn rest_token(&self) -> &'static str {
        match self {
            FecMode::Rs => "FEC_RS",
            FecMode::Fc => "FEC_FC",
            FecMode::None => "FEC_DISABLED",
        }
    }
}

impl fmt::Display for FecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for FecMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rs" => Ok(FecMode::Rs),
            "fc" => Ok(FecMode::Fc),
            "none" => Ok(FecMode::None),
            _ => Err(ParseError::InvalidFecMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_admin_state() {
        assert_eq!("up".parse::<AdminState>().unwrap(), AdminState::Up);
        assert_eq!("DOWN".parse::<AdminState>().unwrap(), AdminState::Down);
        assert!(AdminState::Up.is_up());
        assert!("testing".parse::<AdminState>().is_err());
    }

    #[test]
    fn test_oper_state() {
        assert_eq!("unknown".parse::<OperState>().unwrap(), OperState::Unknown);
        assert_eq!(OperState::default(), OperState::Unknown);
        assert!(OperState::Up.is_up());
        assert!(!OperState::Unknown.is_up());
    }

    #[test]
    fn test_fec_mode_tokens() {
        assert_eq!("rs".parse::<FecMode>().unwrap(), FecMode::Rs);
        assert_eq!("FC".parse::<FecMode>().unwrap(), FecMode::Fc);
        assert_eq!("none".parse::<FecMode>().unwrap(), FecMode::None);
        assert_eq!(FecMode::Rs.rest_token(), "FEC_RS");
        assert_eq!(FecMode::None.rest_token(), "FEC_DISABLED");
    }

    #[test]
    fn test_fec_mode_rejects_unknown() {
        assert_eq!(
            "auto".parse::<FecMode>(),
            Err(ParseError::InvalidFecMode("auto".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AdminState::Up.to_string(), "up");
        assert_eq!(OperState::Unknown.to_string(), "unknown");
        assert_eq!(FecMode::Fc.to_string(), "fc");
    }
}
