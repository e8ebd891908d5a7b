//! Collaborator traits for the device session and REST transports.
//!
//! The session and REST client are owned entirely outside this workspace;
//! these traits are their only surface here. Implementations are injected
//! into the operation APIs at construction, with no process-global
//! fallback.

use async_trait::async_trait;
use serde_json::Value;
use spytest_types::Dialect;
use std::time::Duration;

use crate::command::RestMethod;
use crate::error::TransportError;

/// Options for a CLI config push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    /// Do not fail the push on device-reported command errors.
    pub skip_error_check: bool,
    /// Confirmation character for prompts (e.g., `y` for counter clears).
    pub confirm: Option<char>,
    /// Run outside the config context (exec-mode command).
    pub exec_mode: bool,
}

impl ConfigOptions {
    /// Options for a push that tolerates device-reported errors.
    pub fn skip_errors() -> Self {
        Self {
            skip_error_check: true,
            ..Self::default()
        }
    }
}

/// Raw output returned by a transport invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    /// Captured CLI text (tabular show output or command echo).
    Text(String),
    /// JSON document from a REST GET.
    Json(Value),
    /// Boolean outcome of a config push with no useful output.
    Status(bool),
}

impl RawOutput {
    /// Returns the text form, if this is CLI output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawOutput::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true unless this is an explicit failed status.
    pub fn succeeded(&self) -> bool {
        !matches!(self, RawOutput::Status(false))
    }
}

/// Session to a single device under test.
///
/// One implementation instance corresponds to one device handle; fan-out
/// across devices uses one session per unit of work.
#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Device identifier, used for logging and fan-out reports.
    fn device_name(&self) -> &str;

    /// The device's configured default dialect token (e.g., `"klish"`).
    ///
    /// Returned verbatim; the resolver decides whether the token names a
    /// known dialect.
    fn default_ui_type(&self) -> String;

    /// Capability query for optional device features (e.g., `"vlan-range"`).
    fn is_feature_supported(&self, feature: &str) -> bool;

    /// Datastore lookup for a REST endpoint URL template.
    fn rest_url(&self, key: &str) -> Option<String>;

    /// Runs a show/query command and returns captured output.
    async fn show(&self, command: &str, dialect: Dialect) -> Result<String, TransportError>;

    /// Pushes a batch of config commands and returns captured output.
    async fn config(
        &self,
        commands: &[String],
        dialect: Dialect,
        options: &ConfigOptions,
    ) -> Result<String, TransportError>;
}

/// REST client for a single device under test.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Sends a config request; returns the device-reported success flag.
    async fn config_rest(
        &self,
        method: RestMethod,
        url: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<bool, TransportError>;

    /// Fetches a document.
    async fn get_rest(&self, url: &str, timeout: Duration) -> Result<Value, TransportError>;

    /// Deletes a resource; returns the device-reported success flag.
    async fn delete_rest(&self, url: &str) -> Result<bool, TransportError>;
}

/// Renders a URL template by substituting `{}` placeholders in order.
///
/// Templates come from the device datastore and use the same placeholder
/// convention for every endpoint (e.g.,
/// `/restconf/data/openconfig-interfaces:interfaces/interface={}/config`).
pub fn render_url(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        if let Some(arg) = args.next() {
            out.push_str(arg);
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_url_single_placeholder() {
        let url = render_url(
            "/restconf/data/openconfig-interfaces:interfaces/interface={}/config",
            &["Ethernet0"],
        );
        assert_eq!(
            url,
            "/restconf/data/openconfig-interfaces:interfaces/interface=Ethernet0/config"
        );
    }

    #[test]
    fn test_render_url_no_placeholder() {
        assert_eq!(render_url("/restconf/data/counters", &[]), "/restconf/data/counters");
    }

    #[test]
    fn test_render_url_missing_arg_leaves_gap() {
        assert_eq!(render_url("/a/{}/b/{}", &["x"]), "/a/x/b/");
    }

    #[test]
    fn test_raw_output_accessors() {
        assert_eq!(RawOutput::Text("hi".to_string()).as_text(), Some("hi"));
        assert_eq!(RawOutput::Status(true).as_text(), None);
        assert!(RawOutput::Status(true).succeeded());
        assert!(!RawOutput::Status(false).succeeded());
        assert!(RawOutput::Text(String::new()).succeeded());
    }

    #[test]
    fn test_config_options() {
        let opts = ConfigOptions::skip_errors();
        assert!(opts.skip_error_check);
        assert_eq!(opts.confirm, None);
        assert!(!opts.exec_mode);
    }
}
