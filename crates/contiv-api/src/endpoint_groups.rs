// Endpoint group endpoints
//
// Groups live in a tenant network and carry the set of policies applied
// to their workloads. Attaching or detaching policies is done by
// re-submitting the full policy list through `update_endpoint_group`.

use serde_json::Value;
use tracing::debug;

use crate::client::ContivClient;
use crate::error::Error;
use crate::keys;
use crate::models::{
    EmptyObject, EndpointGroupCreateRequest, EndpointGroupLinks, EndpointGroupUpdateRequest,
};

impl ContivClient {
    /// Create an endpoint group with the given policies attached.
    ///
    /// `POST /api/v1/endpointGroups/{tenant}:{group}/`. `network` is the
    /// tenant network name (e.g. `t1-net`), not its key.
    pub async fn create_endpoint_group(
        &self,
        tenant: &str,
        network: &str,
        group: &str,
        policies: &[String],
    ) -> Result<Value, Error> {
        let key = keys::endpoint_group_key(tenant, group);
        debug!(key = %key, network, ?policies, "creating endpoint group");
        self.post(
            &format!("endpointGroups/{key}"),
            &EndpointGroupCreateRequest {
                group_name: group,
                network_name: network,
                policies,
                net_profile: "",
                ext_contracts_grps: &[],
                tenant_name: tenant,
                key: &key,
            },
        )
        .await
    }

    /// Replace the policy set of an endpoint group.
    ///
    /// `PUT /api/v1/endpointGroups/{tenant}:{group}/`. The body carries a
    /// `links` object pointing at `Network {key: "{tenant}:{network}"}` and
    /// `Tenant {key: "{tenant}"}`. Pass an empty slice to detach every policy.
    pub async fn update_endpoint_group(
        &self,
        tenant: &str,
        network: &str,
        group: &str,
        policies: &[String],
    ) -> Result<Value, Error> {
        let key = keys::endpoint_group_key(tenant, group);
        debug!(key = %key, network, ?policies, "updating endpoint group");
        self.put(
            &format!("endpointGroups/{key}"),
            &EndpointGroupUpdateRequest {
                group_name: group,
                network_name: network,
                policies,
                net_profile: "",
                link_sets: EmptyObject::default(),
                links: EndpointGroupLinks::new(tenant, network),
                tenant_name: tenant,
                key: &key,
            },
        )
        .await
    }

    /// Delete an endpoint group and detach all of its policies.
    ///
    /// `DELETE /api/v1/endpointGroups/{tenant}:{group}/`
    pub async fn delete_endpoint_group(&self, tenant: &str, group: &str) -> Result<(), Error> {
        let key = keys::endpoint_group_key(tenant, group);
        debug!(key = %key, "deleting endpoint group");
        self.delete(&format!("endpointGroups/{key}")).await
    }
}
