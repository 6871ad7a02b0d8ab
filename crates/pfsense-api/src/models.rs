// Request and response types for the interface and routing endpoints.
//
// Reads and writes use separate types: the appliance reports interface
// settings as strings, but expects booleans and integers when they are
// written back. Optional write fields are left out of the JSON when unset.

use serde::{Deserialize, Serialize};

use crate::scalar::StringOrInt;

// ── Interface ────────────────────────────────────────────────────────

/// An interface as reported by `GET api/v1/interface`.
///
/// Every value arrives as a string. `name` is the map key the appliance
/// filed the interface under (`wan`, `lan`, `opt1`, ...); it is filled in
/// by the client because the payload itself does not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interface {
    pub name: String,
    pub enable: String,
    #[serde(rename = "if")]
    pub interface: String,
    pub descr: String,
    #[serde(rename = "alias-address")]
    pub alias_address: String,
    #[serde(rename = "alias-subnet")]
    pub alias_subnet: String,
    pub ipaddr: String,
    pub subnet: String,
    pub ipaddrv6: String,
    pub dhcprejectfrom: String,
    pub adv_dhcp_pt_timeout: String,
    pub adv_dhcp_pt_retry: String,
    pub adv_dhcp_pt_select_timeout: String,
    pub adv_dhcp_pt_reboot: String,
    pub adv_dhcp_pt_backoff_cutoff: String,
    pub adv_dhcp_pt_initial_interval: String,
    pub adv_dhcp_pt_values: String,
    pub adv_dhcp_send_options: String,
    pub adv_dhcp_request_options: String,
    pub adv_dhcp_required_options: String,
    pub adv_dhcp_option_modifiers: String,
    pub adv_dhcp_config_advanced: String,
    pub adv_dhcp_config_file_override: String,
    pub adv_dhcp_config_file_override_path: String,
    #[serde(rename = "dhcp6-duid")]
    pub dhcp6_duid: String,
    #[serde(rename = "dhcp6-ia-pd-len")]
    pub dhcp6_ia_pd_len: String,
    pub adv_dhcp6_prefix_selected_interface: String,
    pub blockpriv: String,
    pub blockbogons: String,
    pub spoofmac: String,
    pub gateway: String,
    pub gatewayv6: String,
}

impl Interface {
    /// The appliance reports flags as `""`/absent (off) or any other text (on).
    pub fn is_enabled(&self) -> bool {
        !self.enable.is_empty()
    }
}

/// Body for creating or updating an interface.
///
/// `id` names the interface being updated (`wan`, `opt2`, ...) and is also
/// sent as the `id` query parameter on updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRequest {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "if", default)]
    pub interface: String,
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub apply: bool,
    #[serde(default)]
    pub blockbogons: bool,
    #[serde(default)]
    pub blockpriv: bool,
    #[serde(default)]
    pub dhcpvlanenable: bool,
    #[serde(default)]
    pub adv_dhcp_config_advanced: bool,
    #[serde(default)]
    pub adv_dhcp_config_file_override: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_config_file_override_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_option_modifiers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_backoff_cutoff: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_initial_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_reboot: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_retry: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_select_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_pt_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_request_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_required_options: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adv_dhcp_send_options: Option<String>,
    #[serde(rename = "alias-address", default, skip_serializing_if = "Option::is_none")]
    pub alias_address: Option<String>,
    #[serde(rename = "alias-subnet", default, skip_serializing_if = "Option::is_none")]
    pub alias_subnet: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcpcvpt: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcphostname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dhcprejectfrom: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(rename = "gateway-6rd", default, skip_serializing_if = "Option::is_none")]
    pub gateway_6rd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gatewayv6: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipaddr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipaddrv6: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6usev4iface: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    #[serde(rename = "prefix-6rd", default, skip_serializing_if = "Option::is_none")]
    pub prefix_6rd: Option<String>,
    #[serde(rename = "prefix-6rd-v4plen", default, skip_serializing_if = "Option::is_none")]
    pub prefix_6rd_v4plen: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoofmac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnetv6: Option<String>,
    #[serde(rename = "track6-interface", default, skip_serializing_if = "Option::is_none")]
    pub track6_interface: Option<String>,
    #[serde(rename = "track6-prefix-id-hex", default, skip_serializing_if = "Option::is_none")]
    pub track6_prefix_id_hex: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ipv4_type: Option<String>,
    #[serde(rename = "type6", default, skip_serializing_if = "Option::is_none")]
    pub ipv6_type: Option<String>,
}

// ── VLAN ─────────────────────────────────────────────────────────────

/// A VLAN from `GET api/v1/interface/vlan`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vlan {
    /// Parent interface (e.g. `igb1`).
    #[serde(rename = "if")]
    pub interface: String,
    pub tag: String,
    /// 802.1p priority code point.
    pub pcp: String,
    pub descr: String,
    /// Resulting virtual interface (e.g. `igb1.30`).
    pub vlanif: String,
}

// ── Gateway ──────────────────────────────────────────────────────────

/// A monitored gateway from `GET api/v1/routing/gateway`.
///
/// `id` is assigned by the client from the position in the list response
/// (0..N-1). It is only meaningful for correlating entries within the same
/// result; use `name` as the stable key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gateway {
    #[serde(skip_deserializing)]
    pub id: u32,
    pub name: String,
    pub dynamic: bool,
    pub ipprotocol: String,
    pub gateway: String,
    pub interface: String,
    /// Friendly (display) interface name, e.g. `wan`.
    pub friendlyiface: String,
    pub friendlyifdescr: String,
    pub attribute: StringOrInt,
    pub isdefaultgw: bool,
    pub monitor: String,
    pub descr: String,
    pub tiername: String,
}

/// Body for creating or updating a gateway.
///
/// On updates the appliance identifies the gateway by `id` in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRequest {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub apply: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipprotocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub monitor_disable: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub action_disable: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force_down: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_payload: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latencylow: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latencyhigh: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub losslow: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub losshigh: Option<u32>,
    /// Probe interval in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_interval: Option<u32>,
}

/// Body for `PUT api/v1/routing/gateway/default`.
///
/// Each field names a gateway, or is empty to leave the family unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultGatewayRequest {
    #[serde(default)]
    pub defaultgw4: String,
    #[serde(default)]
    pub defaultgw6: String,
    #[serde(default)]
    pub apply: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn interface_reads_hyphenated_fields() {
        let iface: Interface = serde_json::from_value(json!({
            "enable": "",
            "if": "igb0",
            "descr": "WAN",
            "alias-address": "10.0.0.2",
            "alias-subnet": "24",
            "dhcp6-ia-pd-len": "0",
            "ipaddr": "dhcp"
        }))
        .unwrap();
        assert_eq!(iface.interface, "igb0");
        assert_eq!(iface.alias_address, "10.0.0.2");
        assert_eq!(iface.alias_subnet, "24");
        assert_eq!(iface.dhcp6_ia_pd_len, "0");
        assert!(iface.name.is_empty());
        assert!(!iface.is_enabled());
    }

    #[test]
    fn interface_request_omits_unset_optionals() {
        let req = InterfaceRequest {
            id: "opt1".into(),
            interface: "igb2".into(),
            enable: true,
            ipaddr: Some("192.0.2.1".into()),
            subnet: Some(24),
            ..InterfaceRequest::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "opt1",
                "if": "igb2",
                "enable": true,
                "apply": false,
                "blockbogons": false,
                "blockpriv": false,
                "dhcpvlanenable": false,
                "adv_dhcp_config_advanced": false,
                "adv_dhcp_config_file_override": false,
                "ipaddr": "192.0.2.1",
                "subnet": 24
            })
        );
    }

    #[test]
    fn interface_request_type_fields_renamed() {
        let req = InterfaceRequest {
            ipv4_type: Some("staticv4".into()),
            ipv6_type: Some("track6".into()),
            track6_interface: Some("wan".into()),
            dhcprejectfrom: vec!["192.0.2.9".into()],
            ..InterfaceRequest::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["type"], "staticv4");
        assert_eq!(value["type6"], "track6");
        assert_eq!(value["track6-interface"], "wan");
        assert_eq!(value["dhcprejectfrom"], json!(["192.0.2.9"]));
    }

    #[test]
    fn gateway_attribute_accepts_number_or_string() {
        let a: Gateway = serde_json::from_value(json!({ "name": "WAN_DHCP", "attribute": 0 })).unwrap();
        let b: Gateway =
            serde_json::from_value(json!({ "name": "WAN_DHCP", "attribute": "system" })).unwrap();
        assert_eq!(a.attribute.to_int(), 0);
        assert_eq!(b.attribute.as_str(), "system");
    }

    #[test]
    fn gateway_request_always_carries_apply_and_id() {
        let req = GatewayRequest {
            name: Some("WAN_GW".into()),
            gateway: Some("203.0.113.1".into()),
            apply: true,
            ..GatewayRequest::default()
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 0,
                "apply": true,
                "name": "WAN_GW",
                "gateway": "203.0.113.1"
            })
        );
    }

    #[test]
    fn default_gateway_request_shape() {
        let req = DefaultGatewayRequest {
            defaultgw4: "WAN_GW".into(),
            defaultgw6: String::new(),
            apply: true,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "defaultgw4": "WAN_GW", "defaultgw6": "", "apply": true })
        );
    }
}
