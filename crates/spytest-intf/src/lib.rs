//! Interface test APIs for SONiC devices.
//!
//! This crate is the operation layer test cases call into. Every operation
//! follows the same pattern: resolve the control-surface dialect, render a
//! command set for that dialect, push it through the injected transport
//! collaborator, and normalize the raw output into uniform interface
//! records.
//!
//! - [`IntfApi`]: the per-device operation facade
//! - [`resolver`]: dialect resolution from hint or device default
//! - [`commands`] / [`klish`] / [`rest`]: pure per-dialect builders
//! - [`status`] / [`admin`] / [`properties`]: link state and properties
//! - [`counters`]: interface, queue and watermark counters
//! - [`membership`]: VLAN, port-channel and VRF membership
//! - [`naming`]: interface naming modes and name resolution
//! - [`portgroup`]: port-group queries and speed config
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spytest_intf::IntfApi;
//!
//! let api = IntfApi::new(session, rest_client);
//! let records = api.interface_status_show(&["Ethernet0"], None).await?;
//! let ok = api.interface_shutdown(&["Ethernet0"], true, None).await?;
//! ```

pub mod admin;
pub mod api;
pub mod commands;
pub mod counters;
pub mod ip;
pub mod klish;
pub mod membership;
pub mod naming;
pub mod openconfig;
pub mod portgroup;
pub mod properties;
pub mod resolver;
pub mod rest;
pub mod status;

pub use admin::{interface_operation_parallel, AdminOp, FanoutReport, FanoutUnit};
pub use api::IntfApi;
pub use counters::{CounterScope, WatermarkMode};
pub use membership::{ConfigMode, PortChannelDescriptor, VlanDescriptor, VlanSpec, VrfBind, VrfOp};
pub use portgroup::PortGroup;
pub use properties::{IntfProperty, PropertySpec};
pub use resolver::resolve_dialect;
pub use status::IntfKind;
