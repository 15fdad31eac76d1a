// Copyright 2026 The anf contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use anf::config::Config;
use anf::netapp::{ExportPolicyRule, ProtocolType, ServiceLevel, MIN_POOL_SIZE, MIN_VOLUME_SIZE};
use anf::{workflow, ErrorKind, ProvisioningState, WaitOptions};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

const ACCOUNT: &str =
    "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.NetApp/netAppAccounts/account01";

fn pool_id() -> String {
    format!("{}/capacityPools/pool01", ACCOUNT)
}

fn volume_id() -> String {
    format!("{}/capacityPools/pool01/volumes/vol01", ACCOUNT)
}

fn account_body(state: &str) -> Value {
    json!({
        "id": ACCOUNT,
        "name": "account01",
        "type": "Microsoft.NetApp/netAppAccounts",
        "location": "westus",
        "properties": {"provisioningState": state}
    })
}

fn pool_body(state: &str) -> Value {
    json!({
        "id": pool_id(),
        "name": "account01/pool01",
        "location": "westus",
        "properties": {
            "provisioningState": state,
            "serviceLevel": "Standard",
            "size": MIN_POOL_SIZE,
            "poolId": "9760acf5-4638-11e7-9bdb-020073ca7778"
        }
    })
}

fn volume_body(state: &str) -> Value {
    json!({
        "id": volume_id(),
        "name": "account01/pool01/vol01",
        "location": "westus",
        "properties": {
            "provisioningState": state,
            "creationToken": "vol01",
            "serviceLevel": "Standard",
            "usageThreshold": MIN_VOLUME_SIZE,
            "subnetId": "/subnets/anf",
            "protocolTypes": ["NFSv4.1"],
            "exportPolicy": {"rules": [{
                "ruleIndex": 1,
                "unixReadOnly": false,
                "unixReadWrite": true,
                "cifs": false,
                "nfsv3": false,
                "nfsv41": true,
                "allowedClients": "0.0.0.0"
            }]},
            "fileSystemId": "fs1",
            "mountTargets": [{
                "mountTargetId": "mt1",
                "fileSystemId": "fs1",
                "ipAddress": "10.0.0.4"
            }]
        }
    })
}

async fn set_up() -> (MockServer, anf::Cloud) {
    INIT.call_once(|| {
        env_logger::init();
    });

    let server = MockServer::start().await;
    let cloud = anf::Cloud::new(anf::auth::StaticToken::new("tok"), "sub1")
        .with_endpoint(server.uri());
    (server, cloud)
}

fn options() -> WaitOptions {
    WaitOptions::new(Duration::from_millis(20), Duration::from_secs(5))
}

/// Creation: PUT answers `state`, then GET answers `Creating` `pending` times
/// before settling on `final_state`.
async fn mock_creation(
    server: &MockServer,
    id: &str,
    body: fn(&str) -> Value,
    pending: u64,
    final_state: &str,
) {
    Mock::given(method("PUT"))
        .and(path(id))
        .and(query_param("api-version", "2019-11-01"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(body("Accepted")))
        .expect(1)
        .mount(server)
        .await;

    if pending > 0 {
        Mock::given(method("GET"))
            .and(path(id))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("Creating")))
            .up_to_n_times(pending)
            .with_priority(1)
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(final_state)))
        .with_priority(3)
        .mount(server)
        .await;
}

/// Deletion: DELETE is accepted, GET answers `Deleting` once, then 404.
async fn mock_deletion(server: &MockServer, id: &str, body: fn(&str) -> Value) {
    Mock::given(method("DELETE"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body("Deleting")))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "ResourceNotFound", "message": "The resource was not found"}
        })))
        .with_priority(2)
        .mount(server)
        .await;
}

/// Whole life of a resource: created, ready on the first lookup, deleted.
async fn mock_lifecycle(server: &MockServer, id: &str, body: fn(&str) -> Value) {
    Mock::given(method("PUT"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(201).set_body_json(body("Accepted")))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body("Succeeded")))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(id))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "ResourceNotFound", "message": "The resource was not found"}
        })))
        .with_priority(2)
        .mount(server)
        .await;
}

fn workflow_config(should_cleanup: bool) -> Config {
    Config {
        subscription_id: Some("sub1".into()),
        resource_group: "rg1".into(),
        subnet_id: "/subnets/anf".into(),
        should_cleanup,
        ..Config::default()
    }
}

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&str)) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    (messages, move |msg: &str| {
        sink.lock().unwrap().push(msg.to_string())
    })
}

#[tokio::test]
async fn test_provision_and_cleanup() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 2, "Succeeded").await;
    mock_creation(&server, &pool_id(), pool_body, 1, "Succeeded").await;
    Mock::given(method("PUT"))
        .and(path(volume_id()))
        .and(body_partial_json(json!({
            "location": "westus",
            "properties": {
                "creationToken": "vol01",
                "subnetId": "/subnets/anf",
                "protocolTypes": ["NFSv4.1"],
                "exportPolicy": {"rules": [{"ruleIndex": 1, "nfsv41": true, "unixReadWrite": true}]}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(volume_body("Accepted")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(volume_id()))
        .respond_with(ResponseTemplate::new(200).set_body_json(volume_body("Succeeded")))
        .with_priority(3)
        .mount(&server)
        .await;

    let account = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect("Cannot request an account")
        .wait_with(options())
        .await
        .expect("Account was not provisioned");
    assert_eq!(account.name(), "account01");
    assert_eq!(account.provisioning_state(), ProvisioningState::Succeeded);

    let pool = account
        .new_pool("pool01", ServiceLevel::Standard, MIN_POOL_SIZE)
        .create()
        .await
        .expect("Cannot request a pool")
        .wait_with(options())
        .await
        .expect("Pool was not provisioned");
    assert_eq!(pool.id().as_ref(), pool_id());
    assert_eq!(pool.account_name(), Some("account01"));
    assert_eq!(pool.size(), MIN_POOL_SIZE);

    let volume = pool
        .new_volume("vol01", MIN_VOLUME_SIZE)
        .with_subnet_id("/subnets/anf")
        .with_protocol_type(ProtocolType::Nfsv41)
        .with_export_rule(ExportPolicyRule::nfsv41(1, "0.0.0.0"))
        .create()
        .await
        .expect("Cannot request a volume")
        .wait_with(options())
        .await
        .expect("Volume was not provisioned");
    assert_eq!(volume.pool_name(), Some("pool01"));
    assert_eq!(volume.mount_targets()[0].ip_address, "10.0.0.4");
    assert_eq!(volume.creation_token(), "vol01");

    mock_deletion(&server, &volume_id(), volume_body).await;
    volume
        .delete()
        .await
        .expect("Cannot request volume deletion")
        .wait_with(options())
        .await
        .expect("Volume was not deleted");

    mock_deletion(&server, &pool_id(), pool_body).await;
    pool.delete()
        .await
        .expect("Cannot request pool deletion")
        .wait_with(options())
        .await
        .expect("Pool was not deleted");

    mock_deletion(&server, ACCOUNT, account_body).await;
    account
        .delete()
        .await
        .expect("Cannot request account deletion")
        .wait_with(options())
        .await
        .expect("Account was not deleted");
}

#[tokio::test]
async fn test_get_resources() {
    let (server, cloud) = set_up().await;
    Mock::given(method("GET"))
        .and(path(volume_id()))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(volume_body("Succeeded")))
        .mount(&server)
        .await;

    let volume = cloud
        .get_volume("rg1", "account01", "pool01", "vol01")
        .await
        .expect("Cannot get the volume");
    assert_eq!(volume.name(), "vol01");
    assert_eq!(volume.protocol_types(), &vec![ProtocolType::Nfsv41]);

    let err = cloud
        .get_pool("rg1", "account01", "pool02")
        .await
        .expect_err("Unexpected pool");
    assert_eq!(err.kind(), ErrorKind::ResourceNotFound);
}

#[tokio::test]
async fn test_provisioning_failed() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 1, "Failed").await;

    let err = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect("Cannot request an account")
        .wait_with(options())
        .await
        .expect_err("Account must not be provisioned");
    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert!(err.to_string().contains("Failed"));
}

#[tokio::test]
async fn test_provisioning_vanished() {
    let (server, cloud) = set_up().await;
    Mock::given(method("PUT"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(201).set_body_json(account_body("Creating")))
        .mount(&server)
        .await;

    let err = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect("Cannot request an account")
        .wait_with(options())
        .await
        .expect_err("Account must not be provisioned");
    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert!(err.to_string().contains("NotFound"));
}

#[tokio::test]
async fn test_provisioning_timeout() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 0, "Creating").await;

    let err = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect("Cannot request an account")
        .wait_with(WaitOptions::new(
            Duration::from_millis(20),
            Duration::from_millis(200),
        ))
        .await
        .expect_err("Account must not be provisioned");
    assert_eq!(err.kind(), ErrorKind::OperationTimedOut);
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 0, "Succeeded").await;
    Mock::given(method("GET"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;

    let account = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect("Cannot request an account")
        .wait_with(options())
        .await
        .expect("Account was not provisioned");
    assert_eq!(account.provisioning_state(), ProvisioningState::Succeeded);
}

#[tokio::test]
async fn test_create_conflict() {
    let (server, cloud) = set_up().await;
    Mock::given(method("PUT"))
        .and(path(ACCOUNT))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": {"code": "Conflict", "message": "Another operation is in progress"}
        })))
        .mount(&server)
        .await;

    let err = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect_err("Creation must fail");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        err.message(),
        Some("Conflict: Another operation is in progress")
    );
}

#[tokio::test]
async fn test_pool_too_small() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 0, "Succeeded").await;

    let account = cloud
        .new_account("rg1", "account01", "westus")
        .create()
        .await
        .expect("Cannot request an account")
        .into_inner();
    let err = account
        .new_pool("pool01", ServiceLevel::Premium, 1024)
        .create()
        .await
        .expect_err("Creation must fail");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_workflow_with_cleanup() {
    let (server, cloud) = set_up().await;
    mock_lifecycle(&server, ACCOUNT, account_body).await;
    mock_lifecycle(&server, &pool_id(), pool_body).await;
    mock_lifecycle(&server, &volume_id(), volume_body).await;

    let (messages, report) = recorder();
    let outcome = workflow::provision(&cloud, &workflow_config(true), &options(), report)
        .await
        .expect("Workflow failed");
    assert_eq!(outcome.account.as_ref(), ACCOUNT);
    assert_eq!(outcome.pool.as_ref(), pool_id());
    assert_eq!(outcome.volume.as_ref(), volume_id());
    assert_eq!(outcome.mount_targets, vec!["10.0.0.4:/vol01".to_string()]);
    assert!(outcome.cleaned_up);

    let messages = messages.lock().unwrap();
    let position = |text: &str| {
        messages
            .iter()
            .position(|m| m.contains(text))
            .unwrap_or_else(|| panic!("No message {:?} in {:?}", text, messages))
    };
    assert!(position("Account Resource Id") < position("Capacity Pool Resource Id"));
    assert!(position("Capacity Pool Resource Id") < position("Volume Resource Id"));
    assert!(position("Mount target: 10.0.0.4:/vol01") < position("Cleaning up"));
    assert!(position("Deleted volume") < position("Deleted capacity pool"));
    assert!(position("Deleted capacity pool") < position("Deleted account"));
}

#[tokio::test]
async fn test_workflow_without_cleanup() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 0, "Succeeded").await;
    mock_creation(&server, &pool_id(), pool_body, 0, "Succeeded").await;
    mock_creation(&server, &volume_id(), volume_body, 1, "Succeeded").await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let (messages, report) = recorder();
    let outcome = workflow::provision(&cloud, &workflow_config(false), &options(), report)
        .await
        .expect("Workflow failed");
    assert!(!outcome.cleaned_up);
    assert_eq!(outcome.mount_targets.len(), 1);

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|m| m.contains("Volume Resource Id")));
    assert!(!messages.iter().any(|m| m.contains("Cleaning up")));
}

#[tokio::test]
async fn test_workflow_stops_on_failure() {
    let (server, cloud) = set_up().await;
    mock_creation(&server, ACCOUNT, account_body, 0, "Succeeded").await;
    mock_creation(&server, &pool_id(), pool_body, 1, "Failed").await;
    Mock::given(method("PUT"))
        .and(path(volume_id()))
        .respond_with(ResponseTemplate::new(201).set_body_json(volume_body("Accepted")))
        .expect(0)
        .mount(&server)
        .await;

    let (messages, report) = recorder();
    let err = workflow::provision(&cloud, &workflow_config(true), &options(), report)
        .await
        .expect_err("Workflow must fail");
    assert_eq!(err.kind(), ErrorKind::OperationFailed);
    assert!(!messages
        .lock()
        .unwrap()
        .iter()
        .any(|m| m.contains("Capacity Pool Resource Id")));
}

#[tokio::test]
async fn test_workflow_rejects_invalid_config() {
    let (server, cloud) = set_up().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        subnet_id: String::new(),
        ..workflow_config(false)
    };
    let err = workflow::provision(&cloud, &config, &options(), |_| {})
        .await
        .expect_err("Workflow must not start");
    assert_eq!(err.kind(), ErrorKind::InvalidConfig);
}
