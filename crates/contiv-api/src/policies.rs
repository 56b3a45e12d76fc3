// Policy and rule endpoints
//
// Policies are named rule containers under a tenant. The controller's
// collection really is spelled `policys`.

use serde_json::Value;
use tracing::debug;

use crate::client::ContivClient;
use crate::error::Error;
use crate::keys;
use crate::models::{PolicyRequest, RuleRequest, RuleSpec};

impl ContivClient {
    /// Create a network policy.
    ///
    /// `POST /api/v1/policys/{tenant}:{policy}/` with
    /// `{"key", "policyName", "tenantName"}`
    pub async fn create_policy(&self, tenant: &str, policy: &str) -> Result<Value, Error> {
        let key = keys::policy_key(tenant, policy);
        debug!(key = %key, "creating policy");
        self.post(
            &format!("policys/{key}"),
            &PolicyRequest {
                key: &key,
                policy_name: policy,
                tenant_name: tenant,
            },
        )
        .await
    }

    /// Delete a network policy along with its rules.
    ///
    /// `DELETE /api/v1/policys/{tenant}:{policy}/`
    pub async fn delete_policy(&self, tenant: &str, policy: &str) -> Result<(), Error> {
        let key = keys::policy_key(tenant, policy);
        debug!(key = %key, "deleting policy");
        self.delete(&format!("policys/{key}")).await
    }

    /// Add a rule to a policy.
    ///
    /// `POST /api/v1/rules/{tenant}:{policy}:{rule_id}/`
    pub async fn create_rule(
        &self,
        tenant: &str,
        policy: &str,
        rule: &RuleSpec,
    ) -> Result<Value, Error> {
        let key = keys::rule_key(tenant, policy, &rule.rule_id);
        debug!(
            key = %key,
            priority = rule.priority,
            action = %rule.action,
            direction = %rule.direction,
            protocol = %rule.protocol,
            "creating rule"
        );
        self.post(
            &format!("rules/{key}"),
            &RuleRequest::new(tenant, policy, &key, rule),
        )
        .await
    }

    /// Remove a rule from a policy.
    ///
    /// `DELETE /api/v1/rules/{tenant}:{policy}:{rule_id}/`
    pub async fn delete_rule(&self, tenant: &str, policy: &str, rule_id: &str) -> Result<(), Error> {
        let key = keys::rule_key(tenant, policy, rule_id);
        debug!(key = %key, "deleting rule");
        self.delete(&format!("rules/{key}")).await
    }
}
