// Contiv request models
//
// Caller-facing specs (`NetworkSpec`, `RuleSpec`) plus the crate-private
// request bodies they turn into. Field names on the bodies are fixed by the
// controller's REST contract, hence the camelCase renames.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::keys;

// ── Network ──────────────────────────────────────────────────────────

/// Network encapsulation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Encap {
    #[default]
    Vxlan,
    Vlan,
}

/// Parameters of the network created for a tenant.
///
/// The network key is never taken from here: it is always
/// `{tenant}:{tenant}-net`, whatever `network_name` says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSpec {
    pub network_name: String,
    pub encap: Encap,
    /// Gateway address, e.g. `10.10.10.1`.
    pub gateway: String,
    /// Subnet in CIDR form, e.g. `10.10.10.1/24`.
    pub subnet: String,
    /// Network type, `data` or `infra`.
    pub nw_type: String,
}

impl NetworkSpec {
    /// The conventional data network for `tenant`: `{tenant}-net`, VXLAN.
    pub fn for_tenant(tenant: &str, gateway: impl Into<String>, subnet: impl Into<String>) -> Self {
        Self {
            network_name: keys::tenant_network_name(tenant),
            encap: Encap::Vxlan,
            gateway: gateway.into(),
            subnet: subnet.into(),
            nw_type: "data".into(),
        }
    }
}

// ── Rule ─────────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Deny,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuleDirection {
    In,
    Out,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RuleProtocol {
    Tcp,
    Udp,
    Icmp,
}

/// Where a rule points: exactly one of endpoint group, network, or IP address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    EndpointGroup(String),
    Network(String),
    IpAddress(String),
}

/// A single allow/deny directive inside a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub rule_id: String,
    pub priority: i32,
    pub action: RuleAction,
    pub direction: RuleDirection,
    pub protocol: RuleProtocol,
    /// `None` is sent as port `0` (any port).
    pub port: Option<u16>,
    pub target: RuleTarget,
}

// ── Request bodies ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login answer. Only the token matters; everything else is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TenantRequest<'a> {
    pub key: &'a str,
    pub tenant_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetworkRequest<'a> {
    pub encap: Encap,
    pub gateway: &'a str,
    pub key: &'a str,
    pub network_name: &'a str,
    pub nw_type: &'a str,
    pub subnet: &'a str,
    pub tenant_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PolicyRequest<'a> {
    pub key: &'a str,
    pub policy_name: &'a str,
    pub tenant_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RuleRequest<'a> {
    pub tenant_name: &'a str,
    pub policy_name: &'a str,
    pub key: &'a str,
    pub rule_id: &'a str,
    pub priority: i32,
    pub action: RuleAction,
    pub to_endpoint_group: &'a str,
    pub to_network: &'a str,
    pub to_ip_address: &'a str,
    pub protocol: RuleProtocol,
    pub port: u16,
    pub direction: RuleDirection,
}

impl<'a> RuleRequest<'a> {
    pub fn new(tenant: &'a str, policy: &'a str, key: &'a str, rule: &'a RuleSpec) -> Self {
        let (to_endpoint_group, to_network, to_ip_address) = match &rule.target {
            RuleTarget::EndpointGroup(group) => (group.as_str(), "", ""),
            RuleTarget::Network(network) => ("", network.as_str(), ""),
            RuleTarget::IpAddress(addr) => ("", "", addr.as_str()),
        };
        Self {
            tenant_name: tenant,
            policy_name: policy,
            key,
            rule_id: &rule.rule_id,
            priority: rule.priority,
            action: rule.action,
            to_endpoint_group,
            to_network,
            to_ip_address,
            protocol: rule.protocol,
            port: rule.port.unwrap_or(0),
            direction: rule.direction,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EndpointGroupCreateRequest<'a> {
    pub group_name: &'a str,
    pub network_name: &'a str,
    pub policies: &'a [String],
    pub net_profile: &'a str,
    pub ext_contracts_grps: &'a [String],
    pub tenant_name: &'a str,
    pub key: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EndpointGroupUpdateRequest<'a> {
    pub group_name: &'a str,
    pub network_name: &'a str,
    pub policies: &'a [String],
    pub net_profile: &'a str,
    #[serde(rename = "links-sets")]
    pub link_sets: EmptyObject,
    pub links: EndpointGroupLinks,
    pub tenant_name: &'a str,
    pub key: &'a str,
}

/// Serializes as `{}`.
#[derive(Debug, Default, Serialize)]
pub(crate) struct EmptyObject {}

/// Relations of an endpoint group to the objects it lives under.
#[derive(Debug, Serialize)]
pub(crate) struct EndpointGroupLinks {
    #[serde(rename = "AppProfile")]
    pub app_profile: EmptyObject,
    #[serde(rename = "NetProfile")]
    pub net_profile: EmptyObject,
    #[serde(rename = "Network")]
    pub network: Link,
    #[serde(rename = "Tenant")]
    pub tenant: Link,
}

impl EndpointGroupLinks {
    pub fn new(tenant: &str, network: &str) -> Self {
        Self {
            app_profile: EmptyObject::default(),
            net_profile: EmptyObject::default(),
            network: Link {
                link_type: "network",
                key: format!("{tenant}:{network}"),
            },
            tenant: Link {
                link_type: "tenant",
                key: keys::tenant_key(tenant),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Link {
    #[serde(rename = "type")]
    pub link_type: &'static str,
    pub key: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn rule(target: RuleTarget, port: Option<u16>) -> RuleSpec {
        RuleSpec {
            rule_id: "r1".into(),
            priority: 30,
            action: RuleAction::Allow,
            direction: RuleDirection::Out,
            protocol: RuleProtocol::Icmp,
            port,
            target,
        }
    }

    #[test]
    fn rule_target_fills_exactly_one_destination() {
        let spec = rule(RuleTarget::Network("t1-net".into()), None);
        let body = serde_json::to_value(RuleRequest::new("t1", "p1", "t1:p1:r1", &spec)).unwrap();
        assert_eq!(
            body,
            json!({
                "tenantName": "t1",
                "policyName": "p1",
                "key": "t1:p1:r1",
                "ruleId": "r1",
                "priority": 30,
                "action": "allow",
                "toEndpointGroup": "",
                "toNetwork": "t1-net",
                "toIpAddress": "",
                "protocol": "icmp",
                "port": 0,
                "direction": "out"
            })
        );
    }

    #[test]
    fn rule_with_ip_target_and_port() {
        let spec = rule(RuleTarget::IpAddress("10.0.0.5".into()), Some(443));
        let body = serde_json::to_value(RuleRequest::new("t1", "p1", "t1:p1:r1", &spec)).unwrap();
        assert_eq!(body["toIpAddress"], "10.0.0.5");
        assert_eq!(body["toNetwork"], "");
        assert_eq!(body["toEndpointGroup"], "");
        assert_eq!(body["port"], 443);
    }

    #[test]
    fn negative_priority_is_sent_as_is() {
        let spec = RuleSpec {
            priority: -5,
            ..rule(RuleTarget::EndpointGroup("g1".into()), None)
        };
        let body = serde_json::to_value(RuleRequest::new("t1", "p1", "t1:p1:r1", &spec)).unwrap();
        assert_eq!(body["priority"], -5);
    }

    #[test]
    fn links_reference_tenant_and_network() {
        let links = serde_json::to_value(EndpointGroupLinks::new("t1", "t1-net")).unwrap();
        assert_eq!(
            links,
            json!({
                "AppProfile": {},
                "NetProfile": {},
                "Network": { "type": "network", "key": "t1:t1-net" },
                "Tenant": { "type": "tenant", "key": "t1" }
            })
        );
    }

    #[test]
    fn enums_parse_from_lowercase() {
        assert_eq!("deny".parse::<RuleAction>().unwrap(), RuleAction::Deny);
        assert_eq!("in".parse::<RuleDirection>().unwrap(), RuleDirection::In);
        assert_eq!("udp".parse::<RuleProtocol>().unwrap(), RuleProtocol::Udp);
        assert_eq!("vlan".parse::<Encap>().unwrap(), Encap::Vlan);
        assert!("drop".parse::<RuleAction>().is_err());
        assert_eq!(RuleProtocol::Tcp.to_string(), "tcp");
    }

    #[test]
    fn network_spec_for_tenant_uses_conventional_name() {
        let spec = NetworkSpec::for_tenant("t1", "10.1.1.1", "10.1.1.0/24");
        assert_eq!(spec.network_name, "t1-net");
        assert_eq!(spec.encap, Encap::Vxlan);
        assert_eq!(spec.nw_type, "data");
    }
}
