//! Token lifecycle tests against the fake document API.

use futures::future::join_all;
use stargate::{ErrorKind, TokenState, UnauthorizedPolicy};

use crate::common::FakeStargate;

#[tokio::test]
async fn test_connect_exchanges_credentials_once() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;

    client.connect().await?;
    client.connect().await?;
    let people = client.namespace("app").collection("people");
    people.create_document(&serde_json::json!({"name": "alice"})).await?;

    assert_eq!(fake.exchanges(), 1);
    assert_eq!(client.token_state(), TokenState::Valid);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_first_calls_share_one_exchange() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;

    let calls = (0..16).map(|i| {
        let doc = client.namespace("app").collection("people").document(format!("p{}", i));
        async move { doc.upsert(&serde_json::json!({"n": i})).await }
    });
    for result in join_all(calls).await {
        result?;
    }

    assert_eq!(fake.exchanges(), 1);
    assert_eq!(fake.document_count(), 16);
    Ok(())
}

#[tokio::test]
async fn test_revoked_token_with_invalidate_policy() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client_with(UnauthorizedPolicy::Invalidate)?;
    let doc = client.namespace("app").collection("people").document("alice");

    doc.upsert(&serde_json::json!({"name": "alice"})).await?;
    fake.revoke_tokens();

    // The failing call is not retried; it only drops the cached token.
    let err = doc.exist().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(client.token_state(), TokenState::Empty);

    assert!(doc.exist().await?);
    assert_eq!(fake.exchanges(), 2);
    Ok(())
}

#[tokio::test]
async fn test_revoked_token_with_keep_policy() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client_with(UnauthorizedPolicy::Keep)?;
    let doc = client.namespace("app").collection("people").document("alice");

    doc.upsert(&serde_json::json!({"name": "alice"})).await?;
    fake.revoke_tokens();

    for _ in 0..2 {
        let err = doc.exist().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }
    assert_eq!(client.token_state(), TokenState::Valid);
    assert_eq!(fake.exchanges(), 1);

    client.invalidate_token();
    assert!(doc.exist().await?);
    assert_eq!(fake.exchanges(), 2);
    Ok(())
}

#[tokio::test]
async fn test_wrong_password_is_auth_error() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let config = stargate::ClientConfig::builder()
        .base_url(fake.server.uri())
        .username("cassandra")
        .password("wrong")
        .build()?;
    let client = stargate::Client::new(config)?;

    let err = client.namespace("app").collection("people").document("x").exist().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.status(), Some(401));
    assert_eq!(client.token_state(), TokenState::Empty);
    Ok(())
}
