//! Resource key construction.
//!
//! The controller addresses every object by a colon-joined composite key.
//! The same key is used both in the URL path and in the payload's `key`
//! field. Networks are special: each tenant gets exactly one network,
//! always named `{tenant}-net`.

/// Key of a tenant: the tenant name itself.
pub fn tenant_key(tenant: &str) -> String {
    tenant.to_owned()
}

/// Name of the single network a tenant owns through this client.
pub fn tenant_network_name(tenant: &str) -> String {
    format!("{tenant}-net")
}

/// Key of a tenant's network: `{tenant}:{tenant}-net`.
pub fn network_key(tenant: &str) -> String {
    format!("{tenant}:{tenant}-net")
}

/// Key of a policy: `{tenant}:{policy}`.
pub fn policy_key(tenant: &str, policy: &str) -> String {
    format!("{tenant}:{policy}")
}

/// Key of a rule: `{tenant}:{policy}:{rule_id}`.
pub fn rule_key(tenant: &str, policy: &str, rule_id: &str) -> String {
    format!("{tenant}:{policy}:{rule_id}")
}

/// Key of an endpoint group: `{tenant}:{group}`.
pub fn endpoint_group_key(tenant: &str, group: &str) -> String {
    format!("{tenant}:{group}")
}
