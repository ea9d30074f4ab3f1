//! Configuration resolution through the public API.

use std::collections::HashMap;
use std::time::Duration;

use stargate::config::{ASTRA_DB_ID, ASTRA_DB_PASSWORD, ASTRA_DB_REGION, ASTRA_DB_USERNAME, TOKEN_TTL};
use stargate::{ClientConfig, ClientConfigBuilder, Credentials, ErrorKind};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_astra_settings_resolve_base_url() -> anyhow::Result<()> {
    let config = ClientConfigBuilder::from_lookup(lookup(&[
        (ASTRA_DB_ID, "0000-1111"),
        (ASTRA_DB_REGION, "us-east1"),
        (ASTRA_DB_USERNAME, "admin"),
        (ASTRA_DB_PASSWORD, "secret"),
        (TOKEN_TTL, "60"),
    ]))
    .build()?;

    assert_eq!(
        config.base_url(),
        "https://0000-1111-us-east1.apps.astra.datastax.com/api/rest"
    );
    assert_eq!(config.token_ttl(), Duration::from_secs(60));
    assert!(matches!(config.credentials(), Credentials::Password(_)));
    Ok(())
}

#[test]
fn test_missing_settings_are_all_reported() {
    let err = ClientConfigBuilder::from_lookup(lookup(&[(ASTRA_DB_ID, "0000-1111")]))
        .build()
        .unwrap_err();

    assert_eq!(err.missing(), ["region (or base_url)", "username", "password"]);
    let sdk_err = stargate::Error::from(err);
    assert_eq!(sdk_err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_bad_ttl_is_invalid() {
    let err = ClientConfigBuilder::from_lookup(lookup(&[
        ("BASE_URL", "http://localhost:8082"),
        ("USERNAME", "cassandra"),
        ("PASSWORD", "cassandra"),
        (TOKEN_TTL, "soon"),
    ]))
    .build()
    .unwrap_err();

    assert!(err.missing().is_empty());
    assert_eq!(err.invalid().len(), 1);
}

#[test]
fn test_client_debug_never_shows_password() -> anyhow::Result<()> {
    let config = ClientConfig::builder()
        .base_url("http://localhost:8082")
        .username("cassandra")
        .password("s3cr3t-value")
        .build()?;
    assert!(!format!("{:?}", config).contains("s3cr3t-value"));

    let client = stargate::Client::new(config)?;
    assert!(!format!("{:?}", client).contains("s3cr3t-value"));
    Ok(())
}
