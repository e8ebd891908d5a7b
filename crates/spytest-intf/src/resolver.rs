//! Dialect resolution.

use spytest_common::{DeviceSession, IntfError, IntfResult};
use spytest_types::Dialect;
use tracing::debug;

/// Resolves the dialect for one operation.
///
/// An explicit hint wins verbatim. Otherwise the device's configured
/// default token is queried from the session and parsed; a token that
/// names none of the known surfaces fails with
/// [`IntfError::UnsupportedDialect`], which is fatal for the operation and
/// not retryable.
pub fn resolve_dialect(
    session: &dyn DeviceSession,
    hint: Option<Dialect>,
) -> IntfResult<Dialect> {
    if let Some(dialect) = hint {
        return Ok(dialect);
    }
    let token = session.default_ui_type();
    let dialect = token
        .parse::<Dialect>()
        .map_err(|_| IntfError::unsupported_dialect(&token))?;
    debug!(device = session.device_name(), %dialect, "resolved default dialect");
    Ok(dialect)
}
