//! Common test harness for Stargate SDK integration tests.
//!
//! [`FakeStargate`] serves the auth endpoint and the document endpoints from
//! an in-memory store. Tokens it issues stay valid until
//! [`FakeStargate::revoke_tokens`] is called.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use stargate::{Client, ClientConfig, UnauthorizedPolicy};
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const USERNAME: &str = "cassandra";
pub const PASSWORD: &str = "cassandra";

static TRACING: Once = Once::new();

/// Installs a log subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
struct State {
    documents: Mutex<BTreeMap<(String, String, String), Value>>,
    tokens: Mutex<HashSet<String>>,
    exchanges: AtomicUsize,
}

/// Issues a fresh token per credential exchange.
struct AuthResponder(Arc<State>);

impl Respond for AuthResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        if body["username"] != USERNAME || body["password"] != PASSWORD {
            return ResponseTemplate::new(401).set_body_string("invalid credentials");
        }
        let n = self.0.exchanges.fetch_add(1, Ordering::SeqCst) + 1;
        let token = format!("tok-{}", n);
        self.0.tokens.lock().insert(token.clone());
        ResponseTemplate::new(201).set_body_json(json!({"authToken": token}))
    }
}

/// Serves `/v2/namespaces/{ns}/collections/{coll}[/{id}]` from memory.
struct DocumentResponder(Arc<State>);

impl DocumentResponder {
    fn authorized(&self, request: &Request) -> bool {
        request
            .headers
            .get("x-cassandra-token")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|token| self.0.tokens.lock().contains(token))
    }
}

impl Respond for DocumentResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if !self.authorized(request) {
            return ResponseTemplate::new(401).set_body_string("invalid token");
        }

        let segments: Vec<&str> = request.url.path().trim_start_matches('/').split('/').collect();
        let body: Option<Value> = serde_json::from_slice(&request.body).ok();
        let mut documents = self.0.documents.lock();

        match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["v2", "namespaces", ns, "collections", coll]) => {
                let Some(body) = body else {
                    return ResponseTemplate::new(400).set_body_string("missing body");
                };
                let id = Uuid::new_v4().to_string();
                documents.insert(key(ns, coll, &id), body);
                ResponseTemplate::new(201).set_body_json(json!({"documentId": id}))
            },
            ("GET", ["v2", "namespaces", ns, "collections", coll]) => {
                let data: Map<String, Value> = documents
                    .iter()
                    .filter(|((n, c, _), _)| n == ns && c == coll)
                    .map(|((_, _, id), doc)| (id.clone(), doc.clone()))
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({"data": data}))
            },
            ("GET", ["v2", "namespaces", ns, "collections", coll, id]) => {
                match documents.get(&key(ns, coll, id)) {
                    Some(doc) => ResponseTemplate::new(200).set_body_json(doc),
                    None => ResponseTemplate::new(404),
                }
            },
            ("PUT", ["v2", "namespaces", ns, "collections", coll, id]) => {
                let Some(body) = body else {
                    return ResponseTemplate::new(400).set_body_string("missing body");
                };
                documents.insert(key(ns, coll, id), body);
                ResponseTemplate::new(200).set_body_json(json!({"documentId": id}))
            },
            ("PATCH", ["v2", "namespaces", ns, "collections", coll, id]) => {
                let Some(Value::Object(patch)) = body else {
                    return ResponseTemplate::new(400).set_body_string("patch must be an object");
                };
                let doc = documents
                    .entry(key(ns, coll, id))
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(fields) = doc {
                    fields.extend(patch);
                }
                ResponseTemplate::new(200).set_body_json(json!({"documentId": id}))
            },
            ("DELETE", ["v2", "namespaces", ns, "collections", coll, id]) => {
                match documents.remove(&key(ns, coll, id)) {
                    Some(_) => ResponseTemplate::new(204),
                    None => ResponseTemplate::new(404),
                }
            },
            _ => ResponseTemplate::new(405),
        }
    }
}

fn key(ns: &str, coll: &str, id: &str) -> (String, String, String) {
    (ns.to_string(), coll.to_string(), id.to_string())
}

/// An in-process document API.
pub struct FakeStargate {
    pub server: MockServer,
    state: Arc<State>,
}

impl FakeStargate {
    pub async fn start() -> Self {
        init_tracing();
        let server = MockServer::start().await;
        let state = Arc::new(State::default());

        Mock::given(method("POST"))
            .and(path("/v1/auth/"))
            .respond_with(AuthResponder(state.clone()))
            .mount(&server)
            .await;
        Mock::given(path_regex(r"^/v2/namespaces/[^/]+/collections/[^/]+(/[^/]+)?$"))
            .respond_with(DocumentResponder(state.clone()))
            .mount(&server)
            .await;

        Self { server, state }
    }

    /// A client with the default 401 policy.
    pub fn client(&self) -> anyhow::Result<Client> {
        self.client_with(UnauthorizedPolicy::default())
    }

    pub fn client_with(&self, policy: UnauthorizedPolicy) -> anyhow::Result<Client> {
        let config = ClientConfig::builder()
            .base_url(self.server.uri())
            .username(USERNAME)
            .password(PASSWORD)
            .unauthorized_policy(policy)
            .build()?;
        Ok(Client::new(config)?)
    }

    /// Number of credential exchanges served so far.
    pub fn exchanges(&self) -> usize {
        self.state.exchanges.load(Ordering::SeqCst)
    }

    /// Makes every issued token invalid, as a server restart would.
    pub fn revoke_tokens(&self) {
        self.state.tokens.lock().clear();
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.state.documents.lock().len()
    }
}
