//! Integration tests for the contact desk.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use reqwest::Client;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::models::{seed_contacts, ContactFormData, FilterUpdate};
use crate::service::{ContactService, HttpContactService, InMemoryContactService, ServiceLatency};
use crate::store::ContactStore;
use crate::{create_router, AppError, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    service: Arc<InMemoryContactService>,
}

impl TestFixture {
    async fn new() -> Self {
        let service = Arc::new(InMemoryContactService::seeded(ServiceLatency::none()));
        let state = AppState {
            service: service.clone(),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestFixture {
            client: Client::new(),
            base_url,
            service,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn store(&self) -> ContactStore {
        ContactStore::new(Arc::new(HttpContactService::with_client(
            self.client.clone(),
            &self.base_url,
        )))
    }
}

fn form(name: &str) -> ContactFormData {
    ContactFormData::new(name, "dana@fbi.gov", "FBI", "+1 (555) 010-0000")
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_list_contacts() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/contacts"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    let contacts = body["data"].as_array().unwrap();
    assert_eq!(contacts.len(), 3);
    assert_eq!(contacts[0]["name"], "John Smith");
    assert_eq!(contacts[1]["company"], "TechStart");
    assert!(contacts[2]["createdAt"].is_string());
}

#[tokio::test]
async fn test_contact_crud() {
    let fixture = TestFixture::new().await;

    // Create contact
    let create_resp = fixture
        .client
        .post(fixture.url("/api/contacts"))
        .json(&json!({
            "name": "Dana Scully",
            "email": "dana@fbi.gov",
            "company": "FBI",
            "phone": "+1 (555) 010-0000"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    let contact_id = create_body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(create_body["data"]["name"], "Dana Scully");
    assert_eq!(
        create_body["data"]["createdAt"],
        create_body["data"]["updatedAt"]
    );

    // Get contact
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/contacts/{}", contact_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(get_resp.status(), 200);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["email"], "dana@fbi.gov");

    // Update contact
    let update_resp = fixture
        .client
        .put(fixture.url(&format!("/api/contacts/{}", contact_id)))
        .json(&json!({
            "name": "Dana K. Scully",
            "email": "dana@fbi.gov"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(update_resp.status(), 200);
    let update_body: Value = update_resp.json().await.unwrap();
    assert_eq!(update_body["data"]["name"], "Dana K. Scully");
    assert_eq!(update_body["data"]["company"], "");
    assert_eq!(update_body["data"]["id"], contact_id.as_str());

    // Delete contact
    let delete_resp = fixture
        .client
        .delete(fixture.url(&format!("/api/contacts/{}", contact_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(delete_resp.status(), 200);
    let delete_body: Value = delete_resp.json().await.unwrap();
    assert_eq!(delete_body["success"], true);

    // Verify deleted
    let get_deleted_resp = fixture
        .client
        .get(fixture.url(&format!("/api/contacts/{}", contact_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(get_deleted_resp.status(), 404);
    assert_eq!(fixture.service.len().await, 3);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Create contact without a name
    let resp = fixture
        .client
        .post(fixture.url("/api/contacts"))
        .json(&json!({ "name": "", "email": "nobody@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Update contact with a blank email
    let resp2 = fixture
        .client
        .put(fixture.url("/api/contacts/1"))
        .json(&json!({ "name": "John Smith", "email": "   " }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 400);
    assert_eq!(fixture.service.len().await, 3);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/contacts/non-existent-id"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(
        body["error"]["message"],
        "Contact non-existent-id not found"
    );

    let resp2 = fixture
        .client
        .put(fixture.url("/api/contacts/non-existent-id"))
        .json(&json!({ "name": "Ghost", "email": "ghost@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp2.status(), 404);

    let resp3 = fixture
        .client
        .delete(fixture.url("/api/contacts/non-existent-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp3.status(), 404);
}

#[tokio::test]
async fn test_router_without_network() {
    let service = Arc::new(InMemoryContactService::seeded(ServiceLatency::none()));
    let app = create_router(AppState { service });

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/contacts/2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["name"], "Sarah Johnson");

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contacts")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"Fox Mulder","email":""}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_over_http() {
    let fixture = TestFixture::new().await;
    let store = fixture.store();

    store.load_contacts().await;
    let state = store.snapshot();
    assert_eq!(state.contacts(), seed_contacts().as_slice());
    assert!(state.load_error().is_none());

    // Filters
    store.set_filters(FilterUpdate::search("tech"));
    assert_eq!(store.snapshot().filtered_contacts()[0].name, "Sarah Johnson");
    store.clear_filters();

    // Create
    let created = store.create_contact(&form("Dana Scully")).await.unwrap();
    assert!(!created.is_placeholder());
    assert_eq!(store.snapshot().contacts().len(), 4);
    assert_eq!(
        fixture.service.get(&created.id).await.unwrap(),
        Some(created.clone())
    );

    // Update
    let updated = store
        .update_contact(&created.id, &form("Dana K. Scully"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Dana K. Scully");
    assert_eq!(store.snapshot().contact(&created.id), Some(&updated));

    // Delete
    store.delete_contact(&created.id).await.unwrap();
    assert!(store.snapshot().contact(&created.id).is_none());
    assert!(fixture.service.get(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_rolls_back_when_server_rejects() {
    let fixture = TestFixture::new().await;
    let store = fixture.store();
    store.load_contacts().await;
    let before = store.snapshot();

    // Another client removed John behind our back.
    fixture.service.delete("1").await.unwrap();

    let err = store
        .update_contact("1", &form("Jane Smith"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(store.snapshot(), before);

    let err = store.delete_contact("1").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_store_load_failure_when_server_down() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = ContactStore::new(Arc::new(HttpContactService::new(format!(
        "http://{}",
        addr
    ))));
    store.load_contacts().await;

    let state = store.snapshot();
    assert!(state.contacts().is_empty());
    assert!(!state.is_loading());
    assert!(state.load_error().is_some());
}
