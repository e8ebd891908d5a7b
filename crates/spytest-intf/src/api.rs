//! The per-device operation facade and transport invoker.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use spytest_common::defaults::REST_TIMEOUT_SECS;
use spytest_common::{
    CommandSet, ConfigOptions, DeviceSession, IntfError, IntfResult, RawOutput, RestClient,
    RestMethod, RestRequest,
};
use spytest_types::Dialect;

use crate::resolver::resolve_dialect;

/// Operation facade for one device under test.
///
/// Holds the injected session and REST collaborators; everything else is
/// created fresh per call. Operations resolve their dialect once, render a
/// command set, push it through the matching transport verb, and normalize
/// the output. There is no hidden process-global state.
pub struct IntfApi {
    session: Arc<dyn DeviceSession>,
    rest: Arc<dyn RestClient>,
}

impl IntfApi {
    /// Creates a facade over the given collaborators.
    pub fn new(session: Arc<dyn DeviceSession>, rest: Arc<dyn RestClient>) -> Self {
        Self { session, rest }
    }

    /// The device this facade drives.
    pub fn device_name(&self) -> &str {
        self.session.device_name()
    }

    /// The injected session collaborator.
    pub fn session(&self) -> &dyn DeviceSession {
        self.session.as_ref()
    }

    /// Resolves the dialect for one operation (hint wins, else the
    /// device default).
    pub fn resolve(&self, hint: Option<Dialect>) -> IntfResult<Dialect> {
        resolve_dialect(self.session.as_ref(), hint)
    }

    /// Looks up a REST URL template from the device datastore.
    pub(crate) fn rest_template(&self, key: &str) -> IntfResult<String> {
        self.session
            .rest_url(key)
            .ok_or_else(|| IntfError::missing_rest_url(key))
    }

    /// Default REST request timeout.
    pub(crate) fn rest_timeout(&self) -> Duration {
        Duration::from_secs(REST_TIMEOUT_SECS)
    }

    /// Sends a command set through the transport verb matching the
    /// dialect. Adds no logic beyond verb selection; transport failures
    /// surface unmodified and are not retried here.
    pub(crate) async fn invoke(
        &self,
        set: &CommandSet,
        dialect: Dialect,
        options: &ConfigOptions,
    ) -> IntfResult<RawOutput> {
        match set {
            CommandSet::Show { command } => {
                debug!(device = self.device_name(), %dialect, %command, "show");
                let output = self.session.show(command, dialect).await?;
                Ok(RawOutput::Text(output))
            }
            CommandSet::Config { commands } => {
                if commands.is_empty() {
                    return Ok(RawOutput::Status(true));
                }
                debug!(
                    device = self.device_name(),
                    %dialect,
                    count = commands.len(),
                    "config push"
                );
                let output = self.session.config(commands, dialect, options).await?;
                Ok(RawOutput::Text(output))
            }
            CommandSet::Rest { requests } => {
                self.invoke_rest(requests, self.rest_timeout()).await
            }
        }
    }

    /// Sends REST requests in order; the result is the conjunction of the
    /// device-reported success flags.
    pub(crate) async fn invoke_rest(
        &self,
        requests: &[RestRequest],
        timeout: Duration,
    ) -> IntfResult<RawOutput> {
        let null = Value::Null;
        let mut ok = true;
        for request in requests {
            let accepted = match request.method {
                RestMethod::Delete => self.rest.delete_rest(&request.url).await?,
                method => {
                    let body = request.body.as_ref().unwrap_or(&null);
                    self.rest.config_rest(method, &request.url, body, timeout).await?
                }
            };
            if !accepted {
                warn!(
                    device = self.device_name(),
                    method = %request.method,
                    url = %request.url,
                    "REST config rejected"
                );
                ok = false;
            }
        }
        Ok(RawOutput::Status(ok))
    }

    /// Fetches a REST document.
    pub(crate) async fn rest_get(&self, url: &str, timeout: Duration) -> IntfResult<Value> {
        Ok(self.rest.get_rest(url, timeout).await?)
    }
}
