//! The command-set model produced by per-dialect builders.
//!
//! Builders are pure functions: they validate parameters and render either
//! CLI command strings or REST requests, but perform no I/O. The invoker
//! matches exhaustively on [`CommandSet`] to pick the transport verb.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use spytest_types::Dialect;
use std::fmt;

/// HTTP method for a REST config request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestMethod {
    /// Merge-style config push.
    Patch,
    /// Replace-style config push.
    Put,
    /// RPC-style action (e.g., counter clear).
    Post,
    /// Remove previously applied config.
    Delete,
}

impl RestMethod {
    /// Returns the config method matching a REST dialect, or `None` for
    /// the CLI dialects.
    pub const fn from_dialect(dialect: Dialect) -> Option<Self> {
        match dialect {
            Dialect::RestPatch => Some(RestMethod::Patch),
            Dialect::RestPut => Some(RestMethod::Put),
            Dialect::Click | Dialect::Klish => None,
        }
    }
}

impl fmt::Display for RestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RestMethod::Patch => "PATCH",
            RestMethod::Put => "PUT",
            RestMethod::Post => "POST",
            RestMethod::Delete => "DELETE",
        };
        write!(f, "{}", s)
    }
}

/// A single rendered REST request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Fully rendered resource URL.
    pub url: String,
    /// JSON body; `None` for DELETE.
    pub body: Option<Value>,
}

impl RestRequest {
    /// Creates a config request with a body.
    pub fn with_body(method: RestMethod, url: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            url: url.into(),
            body: Some(body),
        }
    }

    /// Creates a DELETE request.
    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: RestMethod::Delete,
            url: url.into(),
            body: None,
        }
    }
}

/// Rendered commands for one logical operation on one dialect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CommandSet {
    /// A single show/query command.
    Show {
        /// The command line.
        command: String,
    },
    /// An ordered list of config command lines.
    Config {
        /// Command lines, pushed as one batch.
        commands: Vec<String>,
    },
    /// An ordered list of REST requests.
    Rest {
        /// Requests, sent in order.
        requests: Vec<RestRequest>,
    },
}

impl CommandSet {
    /// Returns true if the set renders nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            CommandSet::Show { command } => command.is_empty(),
            CommandSet::Config { commands } => commands.is_empty(),
            CommandSet::Rest { requests } => requests.is_empty(),
        }
    }
}
