//! HttpStore against a mock REST backend

use permgraph::config::base_url;
use permgraph::{Config, Error, HttpStore, NewRole, RoleStore, RoleUpdate, UserDirectory};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup(token: Option<&str>) -> (MockServer, HttpStore) {
    let server = MockServer::start().await;
    let cfg = Config {
        api_url: base_url(&format!("{}/api", server.uri())).unwrap(),
        api_token: token.map(String::from),
        ..Config::default()
    };
    let store = HttpStore::new(&cfg).unwrap();
    (server, store)
}

#[tokio::test]
async fn list_roles_decodes_mongo_ids() {
    let (server, store) = setup(Some("secret")).await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "r1", "name": "Ops", "permissions": ["enquiry:read"]},
            {"_id": "r2", "name": "Empty"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let roles = store.list_roles().await.unwrap();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].id, "r1");
    assert!(roles[1].permissions.is_empty());
}

#[tokio::test]
async fn create_and_update_send_documented_bodies() {
    let (server, store) = setup(None).await;
    Mock::given(method("POST"))
        .and(path("/api/roles"))
        .and(body_json(json!({"name": "Desk", "permissions": ["a", "b"]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"_id": "r7", "name": "Desk", "permissions": ["a", "b"]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/roles"))
        .and(body_json(json!({"id": "r7", "name": "Desk 2", "permissions": ["a"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "r7", "name": "Desk 2", "permissions": ["a"]})))
        .expect(1)
        .mount(&server)
        .await;

    let created = store
        .create_role(&NewRole { name: "Desk".into(), permissions: vec!["a".into(), "b".into()] })
        .await
        .unwrap();
    assert_eq!(created.id, "r7");
    let updated = store
        .update_role(&RoleUpdate { id: "r7".into(), name: "Desk 2".into(), permissions: vec!["a".into()] })
        .await
        .unwrap();
    assert_eq!(updated.name, "Desk 2");
}

#[tokio::test]
async fn user_lookup_and_assignment() {
    let (server, store) = setup(None).await;
    Mock::given(method("GET"))
        .and(path("/api/users/ops@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"_id": "u1", "fullName": "Asha Rao", "role": "r1"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/u1/role"))
        .and(body_json(json!({"roleId": "r2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let user = store.find_user("ops@example.com").await.unwrap();
    assert_eq!(user.full_name, "Asha Rao");
    assert_eq!(user.role.as_deref(), Some("r1"));
    store.assign_role(&user.id, "r2").await.unwrap();
}

#[tokio::test]
async fn server_errors_carry_status_and_message() {
    let (server, store) = setup(None).await;
    Mock::given(method("POST"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "role name already exists"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = store.create_role(&NewRole { name: "Ops".into(), permissions: vec![] }).await.unwrap_err();
    assert_eq!(err, Error::Server { status: 409, message: "role name already exists".into() });
    let err = store.list_roles().await.unwrap_err();
    assert_eq!(err, Error::Server { status: 502, message: "bad gateway".into() });
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let (server, store) = setup(None).await;
    Mock::given(method("GET"))
        .and(path("/api/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;
    assert!(matches!(store.list_roles().await, Err(Error::Decode(_))));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    // grab a free port and release it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let cfg = Config { api_url: base_url(&format!("http://127.0.0.1:{port}/api")).unwrap(), ..Config::default() };
    let store = HttpStore::new(&cfg).unwrap();
    let err = store.list_roles().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}
