use client::api::RequestDispatcher;
use client::auth::session_store::{MemorySessionStore, SessionStore};
use client::auth::types::Credential;
use client::config::ApiConfig;
use client::model::{UserCreate, UserRole};
use client::services::{AdminUserService, AlarmService, ChatService, FileManagerService, UserService};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// Matcher for multipart bodies; the boundary is generated per request, so
// only the prefix of the content type can be checked.
struct IsMultipart;

impl wiremock::Match for IsMultipart {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"))
    }
}

fn dispatcher_for(store: &Arc<MemorySessionStore>) -> Arc<RequestDispatcher> {
    Arc::new(RequestDispatcher::new(reqwest::Client::new(), store.clone()))
}

#[tokio::test]
async fn chat_service_decodes_the_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_string_contains("lowest stock"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "Warehouse B"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let service = ChatService::new(dispatcher_for(&store), ApiConfig::new(server.uri()));

    let answer = service
        .ask_question("which warehouse has the lowest stock?")
        .await
        .success()
        .expect("chat answer");
    assert_eq!(answer.response, json!("Warehouse B"));
}

#[tokio::test]
async fn alarm_creation_passes_the_description_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/alarm_management/create"))
        .and(query_param("user_input", "alert when stock < 5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let service = AlarmService::new(dispatcher_for(&store), ApiConfig::new(server.uri()));

    assert!(service.create("alert when stock < 5").await.is_success());
}

#[tokio::test]
async fn csv_upload_goes_out_as_multipart_with_table_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/file_manager/upload/csv/"))
        .and(IsMultipart)
        .and(body_string_contains("name=\"table_name\""))
        .and(body_string_contains("inventory"))
        .and(body_string_contains("name=\"file\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let service = FileManagerService::new(dispatcher_for(&store), ApiConfig::new(server.uri()));

    let outcome = service
        .upload_csv("inventory", "inventory.csv", b"sku,qty\nA-1,3\n".to_vec())
        .await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn user_service_decodes_typed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": {
                "id": 7,
                "full_name": "Ada Lovelace",
                "username": "ada",
                "email": "ada@example.com",
                "created_at": "2024-01-01T12:00:00"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let service = UserService::new(dispatcher_for(&store), ApiConfig::new(server.uri()));

    let envelope = service
        .register(&UserCreate {
            full_name: "Ada Lovelace".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
        })
        .await
        .success()
        .expect("register response");
    assert!(envelope.success);
    assert_eq!(envelope.response.expect("user").username, "ada");
}

#[tokio::test]
async fn promote_to_admin_sends_a_role_only_update() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/admin/users/7"))
        .and(body_string_contains("\"role\":\"admin\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let service = AdminUserService::new(dispatcher_for(&store), ApiConfig::new(server.uri()));

    assert!(service.promote_to_admin(7).await.is_success());
}

#[tokio::test]
async fn services_reuse_the_shared_dispatcher_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(wiremock::matchers::header("authorization", "Bearer tok-admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": {
                "general_metrics": {
                    "total_users": 1,
                    "total_admins": 1,
                    "total_questions_asked": 0
                },
                "users_info": [
                    {"name": "Ada", "email": "ada@example.com", "role": "admin", "questions_asked": 0}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.store(&Credential::bearer("tok-admin"));
    let service = AdminUserService::new(dispatcher_for(&store), ApiConfig::new(server.uri()));

    let envelope = service.list_all().await.success().expect("overview");
    let overview = envelope.response.expect("payload");
    assert_eq!(overview.users_info[0].role, UserRole::Admin);
}
