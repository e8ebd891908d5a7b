//! REST request builders.
//!
//! One structured request per target interface: a resource path rendered
//! from a datastore URL template plus a body whose shape depends on the
//! property. Builders are pure; the facade fetches the template from the
//! session datastore and passes it in.

use serde_json::json;
use spytest_common::{render_url, IntfError, IntfResult, RestMethod, RestRequest};
use spytest_common::defaults::DEFAULT_MTU;
use spytest_types::FecMode;

/// Datastore keys for the REST endpoint templates.
pub mod urls {
    /// Per-interface config subtree (MTU, description, enabled).
    pub const PER_INTERFACE_CONFIG: &str = "per_interface_config";
    /// Per-interface FEC config/unconfig leaf.
    pub const FEC_CONFIG_UNCONFIG: &str = "fec_config_unconfig";
    /// Counter clear RPC.
    pub const CLEAR_INTERFACE_COUNTERS: &str = "clear_interface_counters";
    /// Per-interface state subtree (status and counters).
    pub const PER_INTERFACE_DETAILS: &str = "per_interface_details";
    /// All-interfaces state subtree.
    pub const ALL_INTERFACES: &str = "all_interfaces";
    /// Per-interface queue counter subtree.
    pub const QUEUE_COUNTERS: &str = "queue_counters";
}

/// Build an MTU set/unset request. Unset restores the default MTU.
pub fn build_mtu_request(
    method: RestMethod,
    template: &str,
    interface: &str,
    value: &str,
    no_form: bool,
) -> IntfResult<RestRequest> {
    let mtu: u32 = if no_form {
        DEFAULT_MTU
    } else {
        value
            .parse()
            .map_err(|_| IntfError::invalid_parameter("mtu", format!("not a number: {}", value)))?
    };
    let url = render_url(template, &[interface]);
    Ok(RestRequest::with_body(
        method,
        url,
        json!({ "openconfig-interfaces:config": { "mtu": mtu } }),
    ))
}

/// Build a description set/unset request. Unset clears the string.
pub fn build_description_request(
    method: RestMethod,
    template: &str,
    interface: &str,
    value: &str,
    no_form: bool,
) -> RestRequest {
    let description = if no_form { "" } else { value };
    let url = render_url(template, &[interface]);
    RestRequest::with_body(
        method,
        url,
        json!({ "openconfig-interfaces:config": { "description": description } }),
    )
}

/// Build a FEC set/unset request. Unset deletes the leaf.
pub fn build_fec_request(
    method: RestMethod,
    template: &str,
    interface: &str,
    fec: FecMode,
    no_form: bool,
) -> RestRequest {
    let url = render_url(template, &[interface]);
    if no_form {
        RestRequest::delete(url)
    } else {
        RestRequest::with_body(
            method,
            url,
            json!({ "openconfig-if-ethernet-ext2:port-fec": fec.rest_token() }),
        )
    }
}

/// Build an admin state change request.
pub fn build_admin_request(
    method: RestMethod,
    template: &str,
    interface: &str,
    enabled: bool,
) -> RestRequest {
    let url = render_url(template, &[interface]);
    RestRequest::with_body(
        method,
        url,
        json!({ "openconfig-interfaces:config": { "enabled": enabled } }),
    )
}

/// Build a counter clear RPC request (`all` or one interface).
pub fn build_clear_counters_request(template: &str, target: &str) -> RestRequest {
    RestRequest::with_body(
        RestMethod::Post,
        template.to_string(),
        json!({ "sonic-interface:input": { "interface-param": target } }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const CONFIG_TEMPLATE: &str =
        "/restconf/data/openconfig-interfaces:interfaces/interface={}/config";

    #[test]
    fn test_mtu_request() {
        let req = build_mtu_request(
            RestMethod::Patch,
            CONFIG_TEMPLATE,
            "Ethernet0",
            "1500",
            false,
        )
        .unwrap();
        assert_eq!(
            req.url,
            "/restconf/data/openconfig-interfaces:interfaces/interface=Ethernet0/config"
        );
        assert_eq!(
            req.body,
            Some(json!({"openconfig-interfaces:config": {"mtu": 1500}}))
        );
    }

    #[test]
    fn test_mtu_unset_restores_default() {
        let req = build_mtu_request(
            RestMethod::Put,
            CONFIG_TEMPLATE,
            "Ethernet0",
            "",
            true,
        )
        .unwrap();
        assert_eq!(
            req.body,
            Some(json!({"openconfig-interfaces:config": {"mtu": 9100}}))
        );
        assert_eq!(req.method, RestMethod::Put);
    }

    #[test]
    fn test_mtu_rejects_non_numeric_before_io() {
        let err = build_mtu_request(
            RestMethod::Patch,
            CONFIG_TEMPLATE,
            "Ethernet0",
            "jumbo",
            false,
        )
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_description_unset_clears() {
        let req =
            build_description_request(RestMethod::Patch, CONFIG_TEMPLATE, "Ethernet0", "x", true);
        assert_eq!(
            req.body,
            Some(json!({"openconfig-interfaces:config": {"description": ""}}))
        );
    }

    #[test]
    fn test_fec_request_enum_mapping() {
        let req = build_fec_request(
            RestMethod::Patch,
            "/restconf/data/fec/{}",
            "Ethernet0",
            FecMode::Rs,
            false,
        );
        assert_eq!(
            req.body,
            Some(json!({"openconfig-if-ethernet-ext2:port-fec": "FEC_RS"}))
        );

        let unset = build_fec_request(
            RestMethod::Patch,
            "/restconf/data/fec/{}",
            "Ethernet0",
            FecMode::Rs,
            true,
        );
        assert_eq!(unset.method, RestMethod::Delete);
        assert!(unset.body.is_none());
    }

    #[test]
    fn test_admin_request() {
        let req = build_admin_request(RestMethod::Patch, CONFIG_TEMPLATE, "Ethernet0", false);
        assert_eq!(
            req.body,
            Some(json!({"openconfig-interfaces:config": {"enabled": false}}))
        );
    }

    #[test]
    fn test_clear_counters_request() {
        let req = build_clear_counters_request("/restconf/operations/clear-counters", "all");
        assert_eq!(req.method, RestMethod::Post);
        assert_eq!(
            req.body,
            Some(json!({"sonic-interface:input": {"interface-param": "all"}}))
        );
    }
}
