//! Interface property set/unset.

use tracing::{instrument, warn};

use spytest_common::{CommandSet, ConfigOptions, IntfError, IntfResult, RestMethod};
use spytest_types::{Dialect, FecMode, InterfaceRef};

use crate::api::IntfApi;
use crate::rest::urls;
use crate::{commands, klish, rest};

/// A settable interface property.
///
/// Support is enumerated per dialect; asking for a property the resolved
/// dialect does not implement fails with
/// [`IntfError::UnsupportedProperty`] rather than silently degrading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntfProperty {
    /// Maximum transmission unit.
    Mtu,
    /// Interface description string.
    Description,
    /// Port speed.
    Speed,
    /// Forward error correction mode.
    Fec,
    /// Auto-negotiation on/off.
    Autoneg,
    /// IPv4 address binding.
    IpAddress,
    /// IPv6 address binding.
    Ipv6Address,
}

impl IntfProperty {
    /// Flat property name, as used in records and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            IntfProperty::Mtu => "mtu",
            IntfProperty::Description => "description",
            IntfProperty::Speed => "speed",
            IntfProperty::Fec => "fec",
            IntfProperty::Autoneg => "autoneg",
            IntfProperty::IpAddress => "ip_address",
            IntfProperty::Ipv6Address => "ipv6_address",
        }
    }

    /// Structured-shell keyword for the property line.
    const fn klish_keyword(&self) -> &'static str {
        match self {
            IntfProperty::Mtu => "mtu",
            IntfProperty::Description => "description",
            IntfProperty::Speed => "speed",
            IntfProperty::Fec => "fec",
            IntfProperty::Autoneg => "autoneg",
            IntfProperty::IpAddress => "ip address",
            IntfProperty::Ipv6Address => "ipv6 address",
        }
    }

    /// Returns true if the dialect implements this property.
    pub const fn supported_on(&self, dialect: Dialect) -> bool {
        match dialect {
            Dialect::Click => matches!(
                self,
                IntfProperty::Mtu | IntfProperty::Speed | IntfProperty::Fec
            ),
            Dialect::Klish => true,
            Dialect::RestPatch | Dialect::RestPut => matches!(
                self,
                IntfProperty::Mtu | IntfProperty::Description | IntfProperty::Fec
            ),
        }
    }
}

/// One property change: the property, its value, and whether this is the
/// removal ("no"-form) of a previously applied line. Set and unset render
/// through the same builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    /// The property to change.
    pub property: IntfProperty,
    /// The value to apply; ignored by unsets that restore a default.
    pub value: String,
    /// Render the removal form instead of the set form.
    pub no_form: bool,
}

impl PropertySpec {
    /// A set.
    pub fn set(property: IntfProperty, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
            no_form: false,
        }
    }

    /// An unset.
    pub fn unset(property: IntfProperty, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
            no_form: true,
        }
    }

    /// Validates the value against the property's legal set.
    fn validated_fec(&self) -> IntfResult<Option<FecMode>> {
        if self.property != IntfProperty::Fec || self.no_form {
            return Ok(None);
        }
        Ok(Some(validate_fec(&self.value)?))
    }
}

/// Validates the FEC value against the closed legal set.
fn validate_fec(value: &str) -> IntfResult<FecMode> {
    value
        .parse()
        .map_err(|_| IntfError::invalid_parameter("fec", format!("'{}' not in rs/fc/none", value)))
}

/// Renders the CLI commands for a property change. Pure; validates every
/// parameter and interface name before emitting anything, so a malformed
/// call builds no partial command list.
pub fn build_cli_property_commands(
    interfaces: &[&str],
    spec: &PropertySpec,
    dialect: Dialect,
) -> IntfResult<Vec<String>> {
    if !spec.property.supported_on(dialect) {
        return Err(IntfError::unsupported_property(spec.property.name(), dialect));
    }
    match dialect {
        Dialect::Click => {
            if spec.no_form {
                return Err(IntfError::invalid_parameter(
                    spec.property.name(),
                    "the legacy shell has no unset form",
                ));
            }
            if spec.property == IntfProperty::Fec {
                validate_fec(&spec.value)?;
            }
            Ok(interfaces
                .iter()
                .map(|name| match spec.property {
                    IntfProperty::Mtu => commands::build_mtu_cmd(name, &spec.value),
                    IntfProperty::Speed => commands::build_speed_cmd(name, &spec.value),
                    IntfProperty::Fec => commands::build_fec_cmd(name, &spec.value),
                    _ => unreachable!("filtered by supported_on"),
                })
                .collect())
        }
        Dialect::Klish => {
            let fec = spec.validated_fec()?;
            let refs: Vec<InterfaceRef> = interfaces
                .iter()
                .map(|name| InterfaceRef::parse(name))
                .collect::<Result<_, _>>()?;
            let mut lines = Vec::with_capacity(refs.len() * 3);
            for intf in &refs {
                lines.extend(klish::context_block(intf, klish_property_line(spec, fec)));
            }
            Ok(lines)
        }
        Dialect::RestPatch | Dialect::RestPut => Err(IntfError::unsupported_property(
            spec.property.name(),
            dialect,
        )),
    }
}

fn klish_property_line(spec: &PropertySpec, fec: Option<FecMode>) -> String {
    let keyword = spec.property.klish_keyword();
    if spec.no_form {
        return match spec.property {
            IntfProperty::Autoneg => "autoneg off".to_string(),
            IntfProperty::IpAddress | IntfProperty::Ipv6Address => {
                format!("no {} {}", keyword, spec.value)
            }
            _ => format!("no {}", keyword),
        };
    }
    match spec.property {
        IntfProperty::Autoneg => "autoneg on".to_string(),
        IntfProperty::Fec => match fec {
            Some(FecMode::None) | None => "fec off".to_string(),
            Some(mode) => format!("fec {}", mode.token().to_uppercase()),
        },
        _ => format!("{} {}", keyword, spec.value),
    }
}

impl IntfApi {
    /// Sets (or with `no_form`, unsets) one property on the given
    /// interfaces.
    ///
    /// Value validation happens before any command is sent; an
    /// unsupported property on the resolved dialect is an error, never a
    /// silent no-op. Unset restores the documented default where the
    /// surface has one (MTU back to 9100, description cleared, FEC leaf
    /// deleted).
    #[instrument(skip(self, value), fields(device = self.device_name(), property = property.name()))]
    pub async fn interface_properties_set(
        &self,
        interfaces: &[&str],
        property: IntfProperty,
        value: &str,
        no_form: bool,
        cli_type: Option<Dialect>,
    ) -> IntfResult<bool> {
        let spec = PropertySpec {
            property,
            value: value.to_string(),
            no_form,
        };
        let dialect = self.resolve(cli_type)?;
        let set = match dialect {
            Dialect::Click | Dialect::Klish => CommandSet::Config {
                commands: build_cli_property_commands(interfaces, &spec, dialect)?,
            },
            Dialect::RestPatch | Dialect::RestPut => {
                self.build_rest_property_requests(interfaces, &spec, dialect)?
            }
        };
        let raw = self.invoke(&set, dialect, &ConfigOptions::default()).await?;
        if !raw.succeeded() {
            return Ok(false);
        }
        if let Some(text) = raw.as_text() {
            if text.contains("Error") {
                warn!(device = self.device_name(), output = text, "device rejected property");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn build_rest_property_requests(
        &self,
        interfaces: &[&str],
        spec: &PropertySpec,
        dialect: Dialect,
    ) -> IntfResult<CommandSet> {
        if !spec.property.supported_on(dialect) {
            return Err(IntfError::unsupported_property(spec.property.name(), dialect));
        }
        let method = RestMethod::from_dialect(dialect).unwrap_or(RestMethod::Patch);
        let mut requests = Vec::with_capacity(interfaces.len());
        match spec.property {
            IntfProperty::Mtu => {
                let template = self.rest_template(urls::PER_INTERFACE_CONFIG)?;
                for name in interfaces {
                    requests.push(rest::build_mtu_request(
                        method, &template, name, &spec.value, spec.no_form,
                    )?);
                }
            }
            IntfProperty::Description => {
                let template = self.rest_template(urls::PER_INTERFACE_CONFIG)?;
                for name in interfaces {
                    requests.push(rest::build_description_request(
                        method, &template, name, &spec.value, spec.no_form,
                    ));
                }
            }
            IntfProperty::Fec => {
                // An unset deletes the leaf; the value only matters on set.
                let fec = if spec.no_form {
                    FecMode::None
                } else {
                    validate_fec(&spec.value)?
                };
                let template = self.rest_template(urls::FEC_CONFIG_UNCONFIG)?;
                for name in interfaces {
                    requests.push(rest::build_fec_request(
                        method, &template, name, fec, spec.no_form,
                    ));
                }
            }
            _ => unreachable!("filtered by supported_on"),
        }
        Ok(CommandSet::Rest { requests })
    }
}
