// Tenant and network endpoints
//
// A tenant owns exactly one network through this client, keyed
// `{tenant}:{tenant}-net`, so network calls are addressed by tenant alone.

use serde_json::Value;
use tracing::debug;

use crate::client::ContivClient;
use crate::error::Error;
use crate::keys;
use crate::models::{NetworkRequest, NetworkSpec, TenantRequest};

impl ContivClient {
    /// Create a tenant.
    ///
    /// `POST /api/v1/tenants/{tenant}/` with `{"key", "tenantName"}`
    pub async fn create_tenant(&self, tenant: &str) -> Result<Value, Error> {
        let key = keys::tenant_key(tenant);
        debug!(tenant, "creating tenant");
        self.post(
            &format!("tenants/{key}"),
            &TenantRequest {
                key: &key,
                tenant_name: tenant,
            },
        )
        .await
    }

    /// Delete a tenant.
    ///
    /// `DELETE /api/v1/tenants/{tenant}/`
    pub async fn delete_tenant(&self, tenant: &str) -> Result<(), Error> {
        debug!(tenant, "deleting tenant");
        self.delete(&format!("tenants/{}", keys::tenant_key(tenant)))
            .await
    }

    /// Create the tenant's network.
    ///
    /// `POST /api/v1/networks/{tenant}:{tenant}-net/`. The key in both the
    /// path and the body is derived from `tenant`; `spec.network_name` only
    /// fills the `networkName` field.
    pub async fn create_network(&self, tenant: &str, spec: &NetworkSpec) -> Result<Value, Error> {
        let key = keys::network_key(tenant);
        debug!(tenant, key = %key, network = %spec.network_name, "creating network");
        self.post(
            &format!("networks/{key}"),
            &NetworkRequest {
                encap: spec.encap,
                gateway: &spec.gateway,
                key: &key,
                network_name: &spec.network_name,
                nw_type: &spec.nw_type,
                subnet: &spec.subnet,
                tenant_name: tenant,
            },
        )
        .await
    }

    /// Delete the tenant's network.
    ///
    /// `DELETE /api/v1/networks/{tenant}:{tenant}-net/`
    pub async fn delete_network(&self, tenant: &str) -> Result<(), Error> {
        let key = keys::network_key(tenant);
        debug!(tenant, key = %key, "deleting network");
        self.delete(&format!("networks/{key}")).await
    }
}
