//! Engine HTTP surface

#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use permgraph::{catalog, server::router};
use serde_json::{json, Value};
use tower::util::ServiceExt;

async fn call(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    let req = match body {
        Some(b) => req.body(Body::from(b.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = router(catalog()).oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

#[tokio::test]
async fn health_and_tree() {
    let (status, body) = call("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = call("GET", "/tree", None).await;
    assert_eq!(status, StatusCode::OK);
    let roots = body.as_array().unwrap();
    assert_eq!(roots[0]["id"], "dashboard");
    assert!(roots[0]["children"].is_array());
}

#[tokio::test]
async fn labels_fall_back_to_id() {
    let (_, body) = call("GET", "/labels/enquiry:read", None).await;
    assert_eq!(body, json!({"id": "enquiry:read", "label": "View Enquiries"}));
    let (_, body) = call("GET", "/labels/nonexistent:id", None).await;
    assert_eq!(body["label"], "nonexistent:id");
}

#[tokio::test]
async fn toggle_resolves_dependencies() {
    let (status, body) = call(
        "POST",
        "/selection/toggle",
        Some(json!({"selection": [], "id": "service:air_logistics:write"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["selection"],
        json!(["enquiry:edit", "service:air_logistics:read", "service:air_logistics:write"])
    );

    let (status, _) = call("POST", "/selection/toggle", Some(json!({"id": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rows_and_graph() {
    let (_, rows) = call("POST", "/selection/rows", Some(json!({"selection": ["admin:roles:read"], "expanded": ["admin", "admin:roles"]}))).await;
    let rows = rows.as_array().unwrap();
    let checked: Vec<&Value> = rows.iter().filter(|r| r["checked"] == true).collect();
    assert_eq!(checked.len(), 1);
    assert_eq!(checked[0]["id"], "admin:roles:read");
    assert_eq!(checked[0]["depth"], 2);

    let (_, graph) = call("POST", "/selection/graph", Some(json!({"selection": ["admin:roles:read"]}))).await;
    let ids: Vec<&str> = graph["nodes"].as_array().unwrap().iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["admin", "admin:roles", "admin:roles:read"]);
}
