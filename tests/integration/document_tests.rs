//! Document round trips against the fake document API.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stargate::{Document, PageRequest};

use crate::common::FakeStargate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    name: String,
    age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
}

fn alice() -> Person {
    Person {
        name: "alice".into(),
        age: 42,
        city: None,
    }
}

#[tokio::test]
async fn test_upsert_then_find() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;
    let doc = client.namespace("ns1").collection("coll1").document("d1");

    assert!(!doc.exist().await?);
    assert_eq!(doc.upsert(&alice()).await?, "d1");
    assert!(doc.exist().await?);
    assert_eq!(doc.find::<Person>().await?, Some(alice()));
    Ok(())
}

#[tokio::test]
async fn test_update_merges_fields() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;
    let doc = client.namespace("ns1").collection("coll1").document("d1");

    doc.upsert(&alice()).await?;
    doc.update(&json!({"city": "Paris"})).await?;

    let found: Person = doc.find().await?.ok_or_else(|| anyhow::anyhow!("document missing"))?;
    assert_eq!(found.city.as_deref(), Some("Paris"));
    assert_eq!(found.age, 42);
    Ok(())
}

#[tokio::test]
async fn test_delete_then_exist_is_false() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;
    let doc = client.namespace("ns1").collection("coll1").document("d1");

    doc.upsert(&alice()).await?;
    assert!(doc.delete().await?);
    assert!(!doc.exist().await?);
    assert!(!doc.delete().await?);
    assert_eq!(doc.find::<Person>().await?, None);
    Ok(())
}

#[tokio::test]
async fn test_created_documents_are_listed() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;
    let people = client.namespace("ns1").collection("people");
    let other = client.namespace("ns1").collection("other");

    let id = people.create_document(&alice()).await?;
    people.document("bob").upsert(&Person { name: "bob".into(), age: 7, city: None }).await?;
    other.document("carol").upsert(&json!({"name": "carol", "age": 30})).await?;

    let page = people.find_page::<Person>(&PageRequest::new().page_size(20)).await?;
    assert!(!page.has_more());
    assert_eq!(page.len(), 2);
    assert!(page.documents.contains(&Document { id, body: alice() }));

    let all = people.find_all::<Person>().await?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_invalid_address_makes_no_request() -> anyhow::Result<()> {
    let fake = FakeStargate::start().await;
    let client = fake.client()?;

    let err = client.namespace("").collection("coll1").document("d1").exist().await.unwrap_err();
    assert_eq!(err.kind(), stargate::ErrorKind::Validation);
    assert!(fake.server.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}
