//! Shared mock device for the integration tests.
//!
//! Implements the session and REST collaborator traits with canned
//! outputs and captured pushes, so tests can assert exactly what would
//! have reached a device.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use spytest_common::{ConfigOptions, DeviceSession, RestClient, RestMethod, TransportError};
use spytest_intf::IntfApi;
use spytest_types::Dialect;

/// A captured REST push.
#[derive(Debug, Clone)]
pub struct CapturedRest {
    pub method: RestMethod,
    pub url: String,
    pub body: Value,
}

#[derive(Default)]
pub struct MockDevice {
    name: String,
    ui_type: String,
    features: Vec<String>,
    rest_urls: HashMap<String, String>,
    show_outputs: HashMap<String, String>,
    rest_docs: HashMap<String, Value>,
    fail_config: Option<String>,
    pub captured_configs: Mutex<Vec<Vec<String>>>,
    pub captured_shows: Mutex<Vec<String>>,
    pub captured_rest: Mutex<Vec<CapturedRest>>,
    pub captured_deletes: Mutex<Vec<String>>,
}

impl MockDevice {
    pub fn new(name: &str, ui_type: &str) -> Self {
        Self {
            name: name.to_string(),
            ui_type: ui_type.to_string(),
            ..Self::default()
        }
    }

    pub fn with_feature(mut self, feature: &str) -> Self {
        self.features.push(feature.to_string());
        self
    }

    pub fn with_rest_url(mut self, key: &str, template: &str) -> Self {
        self.rest_urls.insert(key.to_string(), template.to_string());
        self
    }

    pub fn with_show_output(mut self, command: &str, output: &str) -> Self {
        self.show_outputs
            .insert(command.to_string(), output.to_string());
        self
    }

    pub fn with_rest_doc(mut self, url: &str, doc: Value) -> Self {
        self.rest_docs.insert(url.to_string(), doc);
        self
    }

    /// Make every config push fail with a transport error.
    pub fn with_failing_config(mut self, message: &str) -> Self {
        self.fail_config = Some(message.to_string());
        self
    }

    /// Every config line pushed, in push order, batches flattened.
    pub fn config_lines(&self) -> Vec<String> {
        self.captured_configs
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DeviceSession for MockDevice {
    fn device_name(&self) -> &str {
        &self.name
    }

    fn default_ui_type(&self) -> String {
        self.ui_type.clone()
    }

    fn is_feature_supported(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    fn rest_url(&self, key: &str) -> Option<String> {
        self.rest_urls.get(key).cloned()
    }

    async fn show(&self, command: &str, _dialect: Dialect) -> Result<String, TransportError> {
        self.captured_shows
            .lock()
            .unwrap()
            .push(command.to_string());
        Ok(self.show_outputs.get(command).cloned().unwrap_or_default())
    }

    async fn config(
        &self,
        commands: &[String],
        _dialect: Dialect,
        _options: &ConfigOptions,
    ) -> Result<String, TransportError> {
        if let Some(message) = &self.fail_config {
            return Err(TransportError::new("config", message.clone()));
        }
        self.captured_configs
            .lock()
            .unwrap()
            .push(commands.to_vec());
        Ok(String::new())
    }
}

#[async_trait]
impl RestClient for MockDevice {
    async fn config_rest(
        &self,
        method: RestMethod,
        url: &str,
        body: &Value,
        _timeout: Duration,
    ) -> Result<bool, TransportError> {
        self.captured_rest.lock().unwrap().push(CapturedRest {
            method,
            url: url.to_string(),
            body: body.clone(),
        });
        Ok(true)
    }

    async fn get_rest(&self, url: &str, _timeout: Duration) -> Result<Value, TransportError> {
        self.rest_docs
            .get(url)
            .cloned()
            .ok_or_else(|| TransportError::new("rest-get", format!("no document at {}", url)))
    }

    async fn delete_rest(&self, url: &str) -> Result<bool, TransportError> {
        self.captured_deletes.lock().unwrap().push(url.to_string());
        Ok(true)
    }
}

/// Builds a facade over one mock device.
pub fn api_over(device: MockDevice) -> (Arc<MockDevice>, IntfApi) {
    let device = Arc::new(device);
    let api = IntfApi::new(device.clone(), device.clone());
    (device, api)
}

/// Renders a fixed-width show table the way the device shells print them:
/// header row, dash separator, data rows.
pub fn render_table(headers: &[&str], rows: &[&[&str]]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }
    let mut out = String::new();
    let push_row = |cells: &[&str], out: &mut String| {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            line.push_str(cell);
            if i + 1 < cells.len() {
                line.push_str(&" ".repeat(widths[i] - cell.len() + 2));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    };
    push_row(headers, &mut out);
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let dash_refs: Vec<&str> = dashes.iter().map(String::as_str).collect();
    push_row(&dash_refs, &mut out);
    for row in rows {
        push_row(row, &mut out);
    }
    out
}

/// The standard status table used across tests.
pub fn status_table() -> String {
    render_table(
        &["Interface", "Speed", "MTU", "Alias", "Oper", "Admin"],
        &[
            &["Ethernet0", "100G", "9100", "Eth1/1", "up", "up"],
            &["Ethernet4", "25G", "9100", "Eth1/2", "down", "down"],
            &["PortChannel4", "100G", "9100", "N/A", "up", "up"],
        ],
    )
}
