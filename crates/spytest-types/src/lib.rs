//! Common spytest types for exercising switch interfaces.
//!
//! This crate provides type-safe representations of the primitives shared by
//! the interface test APIs:
//!
//! - [`Dialect`]: the device control surface a call is dispatched through
//! - [`InterfaceRef`]: canonical interface identity (type + number)
//! - [`AdminState`] / [`OperState`]: link states as reported by the device
//! - [`FecMode`]: forward error correction modes
//! - [`VlanId`] / [`VlanRange`]: IEEE 802.1Q VLAN identifiers and ranges
//! - [`NamingMode`]: native vs. standard interface naming

mod dialect;
mod intf;
mod port;
mod vlan;

pub use dialect::{Dialect, NamingMode};
pub use intf::{InterfaceRef, InterfaceType};
pub use port::{AdminState, FecMode, OperState};
pub use vlan::{VlanId, VlanRange};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown dialect token: {0}")]
    InvalidDialect(String),

    #[error("unrecognized interface name: {0}")]
    InvalidInterfaceName(String),

    #[error("invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(u16),

    #[error("invalid admin state: {0}")]
    InvalidAdminState(String),

    #[error("invalid oper state: {0}")]
    InvalidOperState(String),

    #[error("invalid FEC mode: {0} (must be rs, fc or none)")]
    InvalidFecMode(String),

    #[error("invalid interface naming mode: {0}")]
    InvalidNamingMode(String),
}
