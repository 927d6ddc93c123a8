use std::net::SocketAddr;

use armada_server::{build_router, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn start_server(api_key: Option<&str>) -> anyhow::Result<TestApp> {
    let app = build_router(AppState::in_memory(api_key.map(str::to_string)));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp {
        base_url,
        client: reqwest::Client::new(),
    })
}

fn nginx_spec(name: &str) -> Value {
    json!({
        "annotations": { "name": name },
        "template": {
            "runtime": {
                "container": {
                    "image": { "reference": "nginx:latest" },
                    "resources": {
                        "limits": { "nano_cpus": 2000000, "memory_bytes": 8388608 }
                    }
                }
            }
        }
    })
}

async fn create(app: &TestApp, spec: Value) -> anyhow::Result<Value> {
    let resp = app
        .client
        .post(app.url("/v1/services"))
        .json(&json!({ "spec": spec }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await?;
    Ok(body["service"].clone())
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = start_server(Some("secret")).await?;
    let resp = app.client.get(app.url("/health")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn service_lifecycle() -> anyhow::Result<()> {
    let app = start_server(None).await?;

    let created = create(&app, nginx_spec("web")).await?;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["spec"]["annotations"]["name"], "web");
    let version = created["meta"]["version"].clone();

    // get
    let resp = app.client.get(app.url(&format!("/v1/services/{id}"))).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await?;
    assert_eq!(fetched["service"], created);

    // update
    let mut new_spec = nginx_spec("web");
    new_spec["instances"] = json!(3);
    let resp = app
        .client
        .put(app.url(&format!("/v1/services/{id}")))
        .json(&json!({ "version": version, "spec": new_spec }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await?;
    assert_eq!(updated["service"]["spec"]["instances"], 3);
    assert!(
        updated["service"]["meta"]["version"]["index"].as_u64()
            > version["index"].as_u64()
    );

    // stale update
    let resp = app
        .client
        .put(app.url(&format!("/v1/services/{id}")))
        .json(&json!({ "version": version, "spec": nginx_spec("web") }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "conflict");

    // list
    let resp = app.client.get(app.url("/v1/services")).send().await?;
    let listed: Value = resp.json().await?;
    assert_eq!(listed["services"].as_array().unwrap().len(), 1);

    // remove
    let resp = app
        .client
        .delete(app.url(&format!("/v1/services/{id}")))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.client.get(app.url(&format!("/v1/services/{id}"))).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "not_found");
    Ok(())
}

#[tokio::test]
async fn invalid_specs_are_rejected() -> anyhow::Result<()> {
    let app = start_server(None).await?;

    let mut small_cpu = nginx_spec("web");
    small_cpu["template"]["runtime"]["container"]["resources"]["limits"]["nano_cpus"] =
        json!(500000);
    let resp = app
        .client
        .post(app.url("/v1/services"))
        .json(&json!({ "spec": small_cpu }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "invalid_argument");
    let message = err["message"].as_str().unwrap();
    assert!(message.contains("500000") && message.contains("1000000"), "{message}");

    let plugin = json!({
        "annotations": { "name": "web" },
        "template": { "runtime": { "plugin": { "name": "csi" } } }
    });
    let resp = app
        .client
        .post(app.url("/v1/services"))
        .json(&json!({ "spec": plugin }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);

    let resp = app
        .client
        .post(app.url("/v1/services"))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .client
        .put(app.url("/v1/services/abc"))
        .json(&json!({ "spec": nginx_spec("web") }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let listed: Value = app
        .client
        .get(app.url("/v1/services"))
        .send()
        .await?
        .json()
        .await?;
    assert!(listed["services"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_get_error_bodies() -> anyhow::Result<()> {
    let app = start_server(None).await?;

    let mut mistyped = nginx_spec("web");
    mistyped["template"]["runtime"]["container"]["resources"]["limits"]["nano_cpus"] =
        json!("lots");
    let resp = app
        .client
        .post(app.url("/v1/services"))
        .json(&json!({ "spec": mistyped }))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "invalid_argument");

    let resp = app
        .client
        .post(app.url("/v1/services"))
        .body(json!({ "spec": nginx_spec("web") }).to_string())
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "invalid_argument");

    let resp = app
        .client
        .put(app.url("/v1/services/abc"))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "invalid_argument");
    Ok(())
}

#[tokio::test]
async fn list_filters_by_query() -> anyhow::Result<()> {
    let app = start_server(None).await?;
    create(&app, nginx_spec("web-frontend")).await?;
    create(&app, nginx_spec("web-backend")).await?;
    create(&app, nginx_spec("db")).await?;

    let web: Value = app
        .client
        .get(app.url("/v1/services?query=web"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(web["services"].as_array().unwrap().len(), 2);

    let none: Value = app
        .client
        .get(app.url("/v1/services?query=zzz"))
        .send()
        .await?
        .json()
        .await?;
    assert!(none["services"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn api_key_is_enforced() -> anyhow::Result<()> {
    let app = start_server(Some("secret")).await?;

    let resp = app.client.get(app.url("/v1/services")).send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "unauthenticated");

    let resp = app
        .client
        .get(app.url("/v1/services"))
        .header("Authorization", "Bearer wrong")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let err: Value = resp.json().await?;
    assert_eq!(err["code"], "unauthenticated");
    assert!(err["message"].as_str().is_some_and(|m| !m.is_empty()));

    let resp = app
        .client
        .get(app.url("/v1/services"))
        .bearer_auth("secret")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = start_server(None).await?;
    let doc: Value = app
        .client
        .get(app.url("/api-docs/openapi.json"))
        .send()
        .await?
        .json()
        .await?;
    assert!(doc["paths"]["/v1/services"].is_object());
    Ok(())
}
