#![allow(clippy::unwrap_used)]
// Integration tests for `ContivClient` using wiremock.

use std::io;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use tracing_subscriber::fmt::MakeWriter;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use contiv_api::{
    ConnectionConfig, ContivClient, Error, NetworkSpec, RuleAction, RuleDirection, RuleProtocol,
    RuleSpec, RuleTarget, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> ConnectionConfig {
    ConnectionConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        username: "admin".into(),
        password: SecretString::from("admin"),
        transport: TransportConfig::default(),
    }
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth_proxy/login/"))
        .and(body_json(json!({ "username": "admin", "password": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })))
        .mount(server)
        .await;
}

/// Start a stub controller and return a client that already holds token `abc`.
async fn setup() -> (MockServer, ContivClient) {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    let client = ContivClient::connect(&config_for(&server)).await.unwrap();
    (server, client)
}

/// Collects formatted log output so tests can count warnings.
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn nat_rule(rule_id: &str, priority: i32, action: RuleAction) -> RuleSpec {
    RuleSpec {
        rule_id: rule_id.into(),
        priority,
        action,
        direction: RuleDirection::Out,
        protocol: RuleProtocol::Tcp,
        port: None,
        target: RuleTarget::Network("t1-net".into()),
    }
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_then_create_tenant_sends_token() {
    let (server, client) = setup().await;
    assert!(client.has_token());

    Mock::given(method("POST"))
        .and(path("/api/v1/tenants/tenant2/"))
        .and(header("X-Auth-Token", "abc"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "key": "tenant2", "tenantName": "tenant2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "key": "tenant2", "tenantName": "tenant2" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_tenant("tenant2").await.unwrap();
    assert_eq!(created["tenantName"], "tenant2");
}

#[tokio::test]
async fn test_login_request_carries_no_token() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    let client = ContivClient::new(&config_for(&server)).unwrap();

    client.login().await.unwrap();
    // A second login happens while a token is stored; it must still go out bare.
    client.login().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for req in &requests {
        assert_eq!(req.url.path(), "/api/v1/auth_proxy/login/");
        assert!(req.headers.get("x-auth-token").is_none());
    }
}

#[tokio::test]
async fn test_rejected_login_still_builds_client() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth_proxy/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tenants/t1/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing token"))
        .mount(&server)
        .await;

    let client = ContivClient::connect(&config_for(&server)).await.unwrap();
    assert!(!client.has_token());

    let err = client.create_tenant("t1").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 401, .. }), "got: {err:?}");

    let requests = server.received_requests().await.unwrap();
    let tenant_req = requests
        .iter()
        .find(|r| r.url.path() == "/api/v1/tenants/t1/")
        .unwrap();
    assert!(tenant_req.headers.get("x-auth-token").is_none());
}

#[tokio::test]
async fn test_login_failure_is_reported_by_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth_proxy/login/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = ContivClient::new(&config_for(&server)).unwrap();
    let result = client.login().await;

    match result {
        Err(Error::Api { status, ref body }) => {
            assert_eq!(status, 403);
            assert_eq!(body, "Forbidden");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(!client.has_token());
}

#[tokio::test]
async fn test_login_answer_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth_proxy/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": "admin" })))
        .mount(&server)
        .await;

    let client = ContivClient::new(&config_for(&server)).unwrap();
    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
    assert!(!client.has_token());
}

#[tokio::test]
async fn test_empty_token_is_rejected() {
    let server = MockServer::start().await;
    mount_login(&server, "").await;

    let client = ContivClient::new(&config_for(&server)).unwrap();
    let result = client.login().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.has_token());
}

#[tokio::test]
async fn test_connect_survives_empty_token() {
    let server = MockServer::start().await;
    mount_login(&server, "").await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tenants/t1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContivClient::connect(&config_for(&server)).await.unwrap();
    assert!(!client.has_token());

    client.create_tenant("t1").await.unwrap();
    let requests = server.received_requests().await.unwrap();
    let create = requests
        .iter()
        .find(|r| r.url.path() == "/api/v1/tenants/t1/")
        .unwrap();
    assert!(!create.headers.contains_key("x-auth-token"));
}

#[tokio::test]
async fn test_unreachable_controller_is_a_transport_error() {
    let config = ConnectionConfig {
        base_url: Url::parse("http://127.0.0.1:1").unwrap(),
        username: "admin".into(),
        password: SecretString::from("admin"),
        transport: TransportConfig::default(),
    };

    let err = ContivClient::connect(&config).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
    assert!(err.is_connection());
}

// ── Tenant / network tests ──────────────────────────────────────────

#[tokio::test]
async fn test_create_network_key_ignores_network_name() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/networks/t1:t1-net/"))
        .and(header("X-Auth-Token", "abc"))
        .and(body_json(json!({
            "encap": "vxlan",
            "gateway": "10.10.10.1",
            "key": "t1:t1-net",
            "networkName": "something-else",
            "nwType": "data",
            "subnet": "10.10.10.1/24",
            "tenantName": "t1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "t1:t1-net" })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = NetworkSpec {
        network_name: "something-else".into(),
        ..NetworkSpec::for_tenant("t1", "10.10.10.1", "10.10.10.1/24")
    };
    let created = client.create_network("t1", &spec).await.unwrap();
    assert_eq!(created["key"], "t1:t1-net");
}

#[tokio::test]
async fn test_deletes_hit_computed_keys() {
    let (server, client) = setup().await;

    for resource_path in [
        "/api/v1/tenants/t1/",
        "/api/v1/networks/t1:t1-net/",
        "/api/v1/policys/t1:p1/",
        "/api/v1/rules/t1:p1:r1/",
        "/api/v1/endpointGroups/t1:g1/",
    ] {
        Mock::given(method("DELETE"))
            .and(path(resource_path))
            .and(header("X-Auth-Token", "abc"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.delete_tenant("t1").await.unwrap();
    client.delete_network("t1").await.unwrap();
    client.delete_policy("t1", "p1").await.unwrap();
    client.delete_rule("t1", "p1", "r1").await.unwrap();
    client.delete_endpoint_group("t1", "g1").await.unwrap();
}

// ── Policy / rule tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_create_policy() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/policys/t1:nat-policy/"))
        .and(body_json(json!({
            "key": "t1:nat-policy",
            "policyName": "nat-policy",
            "tenantName": "t1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "t1:nat-policy" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_policy("t1", "nat-policy").await.unwrap();
    assert_eq!(created["key"], "t1:nat-policy");
}

#[tokio::test]
async fn test_create_rule_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/rules/t1:nat-policy:r4/"))
        .and(body_json(json!({
            "tenantName": "t1",
            "policyName": "nat-policy",
            "key": "t1:nat-policy:r4",
            "ruleId": "r4",
            "priority": 20,
            "action": "deny",
            "toEndpointGroup": "",
            "toNetwork": "t1-net",
            "toIpAddress": "",
            "protocol": "tcp",
            "port": 0,
            "direction": "out"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ruleId": "r4" })))
        .expect(1)
        .mount(&server)
        .await;

    let rule = nat_rule("r4", 20, RuleAction::Deny);
    let created = client.create_rule("t1", "nat-policy", &rule).await.unwrap();
    assert_eq!(created["ruleId"], "r4");
}

#[tokio::test]
async fn test_delete_policy_not_found_warns_once() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/policys/t1:missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("policy t1:missing not found"))
        .mount(&server)
        .await;

    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .finish();
    let result = {
        let _guard = tracing::subscriber::set_default(subscriber);
        client.delete_policy("t1", "missing").await
    };

    match result {
        Err(Error::Api { status, ref body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "policy t1:missing not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }

    let logs = capture.contents();
    let warnings: Vec<&str> = logs.lines().filter(|l| l.contains("WARN")).collect();
    assert_eq!(warnings.len(), 1, "logs:\n{logs}");
    assert!(warnings[0].contains("policy t1:missing not found"));
}

#[tokio::test]
async fn test_non_200_success_codes_are_failures() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/policys/t1:p1/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "key": "t1:p1" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/policys/t1:p1/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let created = client.create_policy("t1", "p1").await;
    assert!(matches!(created, Err(Error::Api { status: 201, .. })));

    let deleted = client.delete_policy("t1", "p1").await;
    assert!(matches!(deleted, Err(Error::Api { status: 204, .. })));
}

#[tokio::test]
async fn test_conflict_and_server_error_collapse_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tenants/dup/"))
        .respond_with(ResponseTemplate::new(409).set_body_string("exists"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tenants/boom/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let conflict = client.create_tenant("dup").await.unwrap_err();
    let crashed = client.create_tenant("boom").await.unwrap_err();
    assert!(conflict.is_rejected() && crashed.is_rejected());
    assert_eq!(conflict.status(), Some(409));
    assert_eq!(crashed.status(), Some(500));
}

#[tokio::test]
async fn test_invalid_json_answer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tenants/t1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let result = client.create_tenant("t1").await;
    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "<html>ok</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Endpoint group tests ────────────────────────────────────────────

#[tokio::test]
async fn test_create_endpoint_group_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/endpointGroups/t1:t1-group/"))
        .and(header("X-Auth-Token", "abc"))
        .and(body_json(json!({
            "groupName": "t1-group",
            "networkName": "t1-net",
            "policies": [],
            "netProfile": "",
            "extContractsGrps": [],
            "tenantName": "t1",
            "key": "t1:t1-group"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "t1:t1-group" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_endpoint_group("t1", "t1-net", "t1-group", &[])
        .await
        .unwrap();
    assert_eq!(created["key"], "t1:t1-group");
}

#[tokio::test]
async fn test_update_endpoint_group_links() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/endpointGroups/t1:g1/"))
        .and(header("X-Auth-Token", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": "t1:g1" })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_endpoint_group("t1", "t1-net", "g1", &["p1".to_owned()])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    let body: serde_json::Value = put.body_json().unwrap();
    assert_eq!(
        body,
        json!({
            "groupName": "g1",
            "networkName": "t1-net",
            "policies": ["p1"],
            "netProfile": "",
            "links-sets": {},
            "links": {
                "AppProfile": {},
                "NetProfile": {},
                "Network": { "type": "network", "key": "t1:t1-net" },
                "Tenant": { "type": "tenant", "key": "t1" }
            },
            "tenantName": "t1",
            "key": "t1:g1"
        })
    );
}

#[tokio::test]
async fn test_every_request_url_ends_with_slash() {
    let (server, client) = setup().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    client.create_tenant("t1").await.unwrap();
    client
        .create_network("t1", &NetworkSpec::for_tenant("t1", "10.1.1.1", "10.1.1.0/24"))
        .await
        .unwrap();
    client.create_policy("t1", "p1").await.unwrap();
    client
        .create_rule("t1", "p1", &nat_rule("r1", 30, RuleAction::Allow))
        .await
        .unwrap();
    client
        .create_endpoint_group("t1", "t1-net", "g1", &["p1".to_owned()])
        .await
        .unwrap();
    client
        .update_endpoint_group("t1", "t1-net", "g1", &[])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 7);
    for req in &requests {
        assert!(
            req.url.path().ends_with('/'),
            "missing trailing slash: {}",
            req.url
        );
    }
}
