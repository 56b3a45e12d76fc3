//! Ready-made tenant setups built from several client calls.
//!
//! Steps run in order and stop at the first failure; nothing already
//! created is rolled back.

use serde::Serialize;
use tracing::info;

use contiv_api::{
    ContivClient, NetworkSpec, RuleAction, RuleDirection, RuleProtocol, RuleSpec, RuleTarget, keys,
};

use crate::cli::{GlobalOpts, ProvisionArgs, ProvisionCommand};
use crate::error::CliError;
use crate::output;

const NAT_ALLOW_PRIORITY: i32 = 30;
const NAT_DENY_PRIORITY: i32 = 20;
const NAT_PROTOCOLS: [RuleProtocol; 3] = [RuleProtocol::Icmp, RuleProtocol::Tcp, RuleProtocol::Udp];

/// Keys of everything a NAT provisioning run created.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NatSummary {
    pub tenant: String,
    pub network: String,
    pub endpoint_group: String,
    pub policy: String,
    pub rules: Vec<String>,
}

/// The six NAT rules: allow r1-r3 at priority 30, deny r4-r6 at priority 20,
/// all outbound to the tenant network.
pub fn nat_rules(tenant: &str) -> Vec<RuleSpec> {
    let network = keys::tenant_network_name(tenant);
    [
        (RuleAction::Allow, NAT_ALLOW_PRIORITY),
        (RuleAction::Deny, NAT_DENY_PRIORITY),
    ]
    .into_iter()
    .flat_map(|(action, priority)| NAT_PROTOCOLS.map(|protocol| (action, priority, protocol)))
    .enumerate()
    .map(|(i, (action, priority, protocol))| RuleSpec {
        rule_id: format!("r{}", i + 1),
        priority,
        action,
        direction: RuleDirection::Out,
        protocol,
        port: None,
        target: RuleTarget::Network(network.clone()),
    })
    .collect()
}

pub async fn provision_nat(
    client: &ContivClient,
    tenant: &str,
    gateway: &str,
    subnet: &str,
    policy: &str,
    quiet: bool,
) -> Result<NatSummary, CliError> {
    let network = NetworkSpec::for_tenant(tenant, gateway, subnet);
    let group = format!("{tenant}-group");

    client.create_tenant(tenant).await?;
    output::status(&format!("✓ tenant {tenant}"), quiet);

    client.create_network(tenant, &network).await?;
    output::status(&format!("✓ network {}", network.network_name), quiet);

    client
        .create_endpoint_group(tenant, &network.network_name, &group, &[])
        .await?;
    output::status(&format!("✓ endpoint group {group}"), quiet);

    client.create_policy(tenant, policy).await?;
    output::status(&format!("✓ policy {policy}"), quiet);

    let mut rules = Vec::new();
    for rule in nat_rules(tenant) {
        client.create_rule(tenant, policy, &rule).await?;
        output::status(
            &format!("✓ rule {} ({} {})", rule.rule_id, rule.action, rule.protocol),
            quiet,
        );
        rules.push(keys::rule_key(tenant, policy, &rule.rule_id));
    }

    client
        .update_endpoint_group(tenant, &network.network_name, &group, &[policy.to_owned()])
        .await?;
    output::status(&format!("✓ {policy} attached to {group}"), quiet);

    info!(tenant, "NAT provisioning complete");
    Ok(NatSummary {
        tenant: keys::tenant_key(tenant),
        network: keys::network_key(tenant),
        endpoint_group: keys::endpoint_group_key(tenant, &group),
        policy: keys::policy_key(tenant, policy),
        rules,
    })
}

pub async fn handle(
    client: &ContivClient,
    args: ProvisionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProvisionCommand::Nat {
            tenant,
            gateway,
            subnet,
            policy,
        } => {
            let summary =
                provision_nat(client, &tenant, &gateway, &subnet, &policy, global.quiet).await?;
            output::emit(global.output, &summary, global.quiet)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nat_rules_allow_then_deny() {
        let rules = nat_rules("t1");
        let ids: Vec<_> = rules.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, ["r1", "r2", "r3", "r4", "r5", "r6"]);

        for rule in &rules[..3] {
            assert_eq!(rule.action, RuleAction::Allow);
            assert_eq!(rule.priority, 30);
        }
        for rule in &rules[3..] {
            assert_eq!(rule.action, RuleAction::Deny);
            assert_eq!(rule.priority, 20);
        }
        assert!(rules.iter().all(|r| r.direction == RuleDirection::Out
            && r.port.is_none()
            && r.target == RuleTarget::Network("t1-net".into())));
        assert_eq!(rules[0].protocol, RuleProtocol::Icmp);
        assert_eq!(rules[4].protocol, RuleProtocol::Tcp);
        assert_eq!(rules[5].protocol, RuleProtocol::Udp);
    }
}
