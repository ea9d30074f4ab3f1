//! DevOps API provisioning flow against a scripted control plane.

use serde_json::json;
use stargate::devops::{CloudProvider, CreateDatabaseRequest, DatabaseStatus, DevopsClient, Tier};
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::init_tracing;

const TOKEN: &str = "AstraCS:integration";

fn database(status: &str, keyspaces: &[&str]) -> serde_json::Value {
    json!({
        "id": "db-1",
        "info": {
            "name": "orders",
            "keyspace": "app",
            "keyspaces": keyspaces,
            "cloudProvider": "AWS",
            "tier": "serverless",
            "region": "us-east-1"
        },
        "status": status,
        "creationTime": "2021-03-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_provisioning_flow() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/availableRegions"))
        .and(bearer_token(TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"tier": "serverless", "cloudProvider": "AWS", "region": "us-east-1"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases"))
        .and(bearer_token(TOKEN))
        .respond_with(
            ResponseTemplate::new(201).insert_header("Location", "/v2/databases/db-1"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(database("PENDING", &["app"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(database("ACTIVE", &["app"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db-1/keyspaces/audit"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/databases/db-1/terminate"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let devops = DevopsClient::with_base_url(&server.uri(), TOKEN)?;

    let regions = devops.regions_by_tier().await?;
    assert!(regions[&Tier::Serverless][&CloudProvider::Aws]
        .iter()
        .any(|r| r.region == "us-east-1"));

    let id = devops
        .create_database(
            &CreateDatabaseRequest::builder()
                .name("orders")
                .keyspace("app")
                .cloud_provider(CloudProvider::Aws)
                .region("us-east-1")
                .tier(Tier::Serverless)
                .build(),
        )
        .await?;
    assert_eq!(id, "db-1");

    let pending = devops.find_database(&id).await?.ok_or_else(|| anyhow::anyhow!("missing"))?;
    assert_eq!(pending.status, DatabaseStatus::Pending);
    let active = devops.find_database(&id).await?.ok_or_else(|| anyhow::anyhow!("missing"))?;
    assert!(active.status.is_active());

    devops.create_keyspace(&id, "audit").await?;
    devops.terminate_database(&id).await?;
    Ok(())
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/databases/db-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let devops = DevopsClient::with_base_url(&server.uri(), "AstraCS:revoked")?;
    let err = devops.find_database("db-1").await.unwrap_err();
    assert_eq!(err.kind(), stargate::ErrorKind::Unauthorized);
    assert_eq!(err.body(), Some("bad token"));
    Ok(())
}
