//! Admin state changes and the multi-device fan-out.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use spytest_common::{
    CommandSet, ConfigOptions, IntfResult, RestMethod, TransportError,
};
use spytest_types::{AdminState, Dialect, InterfaceRef};

use crate::api::IntfApi;
use crate::rest::urls;
use crate::{commands, klish, rest};

/// Explicit admin state operation.
///
/// These are the only transitions this layer performs; an interface that
/// was never queried stays in the unknown state, and link flaps are
/// reported, never acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminOp {
    /// Bring the interface administratively down.
    Shutdown,
    /// Bring the interface administratively up.
    Startup,
}

impl AdminOp {
    /// Legacy-shell verb.
    pub const fn click_verb(&self) -> &'static str {
        match self {
            AdminOp::Shutdown => "shutdown",
            AdminOp::Startup => "startup",
        }
    }

    /// Structured-shell context line.
    pub const fn klish_line(&self) -> &'static str {
        match self {
            AdminOp::Shutdown => "shutdown",
            AdminOp::Startup => "no shutdown",
        }
    }

    /// REST `enabled` leaf value.
    pub const fn enabled(&self) -> bool {
        matches!(self, AdminOp::Startup)
    }

    /// Admin state expected after the change applies.
    pub const fn expected_state(&self) -> AdminState {
        match self {
            AdminOp::Shutdown => AdminState::Down,
            AdminOp::Startup => AdminState::Up,
        }
    }
}

impl IntfApi {
    /// Applies an admin state change to the given interfaces.
    ///
    /// With `skip_verify` unset, the observed admin state is checked after
    /// the push; a mismatch returns `Ok(false)` and the change is left in
    /// place -- the operation is not transactional and nothing is rolled
    /// back.
    #[instrument(skip(self), fields(device = self.device_name()))]
    pub async fn interface_operation(
        &self,
        interfaces: &[&str],
        operation: AdminOp,
        skip_verify: bool,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        if interfaces.is_empty() {
            return Ok(false);
        }
        let dialect = self.resolve(cli_type)?;
        let set = build_admin_command_set(self, interfaces, operation, dialect)?;
        let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
        if !raw.succeeded() {
            return Ok(false);
        }
        if let Some(text) = raw.as_text() {
            if text.contains("Error") {
                warn!(device = self.device_name(), output = text, "device rejected change");
                return Ok(false);
            }
        }

        if skip_verify {
            return Ok(true);
        }
        let expected = operation.expected_state();
        let records = self.interface_status_show(interfaces, cli_type).await?;
        for name in interfaces {
            let observed = records
                .iter()
                .find(|r| r.interface == *name)
                .and_then(|r| r.admin_state);
            if observed != Some(expected) {
                info!(
                    device = self.device_name(),
                    interface = name,
                    expected = %expected,
                    "admin state not yet observed"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Brings interfaces administratively down.
    pub async fn interface_shutdown(
        &self,
        interfaces: &[&str],
        skip_verify: bool,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        self.interface_operation(interfaces, AdminOp::Shutdown, skip_verify, cli_type)
            .await
    }

    /// Brings interfaces administratively up.
    pub async fn interface_noshutdown(
        &self,
        interfaces: &[&str],
        skip_verify: bool,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        self.interface_operation(interfaces, AdminOp::Startup, skip_verify, cli_type)
            .await
    }
}

/// Renders the admin change for one dialect. All interface names are
/// validated before any command is emitted, so a malformed name in a
/// multi-interface call produces no partial push.
fn build_admin_command_set(
    api: &IntfApi,
    interfaces: &[&str],
    operation: AdminOp,
    dialect: Dialect,
) -> IntfResult<CommandSet> {
    match dialect {
        Dialect::Click => Ok(CommandSet::Config {
            commands: interfaces
                .iter()
                .map(|name| commands::build_admin_cmd(operation, name))
                .collect(),
        }),
        Dialect::Klish => {
            let refs: Vec<InterfaceRef> = interfaces
                .iter()
                .map(|name| InterfaceRef::parse(name))
                .collect::<Result<_, _>>()?;
            let mut lines = Vec::with_capacity(refs.len() * 3);
            for intf in &refs {
                lines.extend(klish::context_block(
                    intf,
                    operation.klish_line().to_string(),
                ));
            }
            Ok(CommandSet::Config { commands: lines })
        }
        Dialect::RestPatch | Dialect::RestPut => {
            let template = api.rest_template(urls::PER_INTERFACE_CONFIG)?;
            let method = RestMethod::from_dialect(dialect)
                .unwrap_or(RestMethod::Patch);
            Ok(CommandSet::Rest {
                requests: interfaces
                    .iter()
                    .map(|name| {
                        rest::build_admin_request(method, &template, name, operation.enabled())
                    })
                    .collect(),
            })
        }
    }
}

/// Outcome of one device's unit of work in a fan-out.
#[derive(Debug)]
pub struct FanoutUnit {
    /// Device the unit ran against.
    pub device: String,
    /// The unit's own result; failures keep their full error detail.
    pub result: IntfResult<bool>,
}

impl FanoutUnit {
    /// True if this unit applied its change and reported success.
    pub fn succeeded(&self) -> bool {
        matches!(self.result, Ok(true))
    }
}

/// Aggregated fan-out outcome, one entry per device in input order.
#[derive(Debug, Default)]
pub struct FanoutReport {
    /// Per-device results.
    pub units: Vec<FanoutUnit>,
}

impl FanoutReport {
    /// True only if every unit reported success. Units that failed do not
    /// undo the others: partial application across devices is possible
    /// and is never compensated.
    pub fn all_succeeded(&self) -> bool {
        !self.units.is_empty() && self.units.iter().all(FanoutUnit::succeeded)
    }

    /// Units that did not report success.
    pub fn failures(&self) -> impl Iterator<Item = &FanoutUnit> {
        self.units.iter().filter(|u| !u.succeeded())
    }
}

/// Applies the same admin operation across independent devices
/// concurrently.
///
/// Each device's operation runs as its own task over its own facade;
/// there is no shared mutable state between units. The join waits for
/// every unit and collects results and errors separately -- a single
/// device failure fails the aggregate while the other devices' changes
/// stay applied.
pub async fn interface_operation_parallel(
    targets: Vec<(Arc<IntfApi>, Vec<String>)>,
    operation: AdminOp,
    cli_type: Option<Dialect>,
) -> FanoutReport {
    let mut join_set = JoinSet::new();
    let mut devices = Vec::with_capacity(targets.len());

    for (index, (api, interfaces)) in targets.into_iter().enumerate() {
        devices.push(api.device_name().to_string());
        join_set.spawn(async move {
            let names: Vec<&str> = interfaces.iter().map(String::as_str).collect();
            let result = api
                .interface_operation(&names, operation, true, cli_type)
                .await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<IntfResult<bool>>> = devices.iter().map(|_| None).collect();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => slots[index] = Some(result),
            Err(join_err) => {
                warn!(error = %join_err, "fan-out unit aborted");
            }
        }
    }

    let units = devices
        .into_iter()
        .zip(slots)
        .map(|(device, slot)| FanoutUnit {
            device,
            result: slot.unwrap_or_else(|| {
                Err(TransportError::new("fan-out", "unit aborted before completion").into())
            }),
        })
        .collect();
    FanoutReport { units }
}
