mod common;

use axum::http::StatusCode;
use common::{TestApp, body_json};
use serde_json::json;

const JANE: &str = r#"{"name":"Jane Wanjiku","email":"jane@example.com","contact":"+254712345678"}"#;

#[tokio::test]
async fn create_then_fetch_returns_same_fields() {
    let app = TestApp::new();

    let response = app.send_json("POST", "/api/v1/customers", JANE).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "success");
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app.get(&format!("/api/v1/customers/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(
        fetched["data"],
        json!({
            "id": id,
            "name": "Jane Wanjiku",
            "email": "jane@example.com",
            "contact": "+254712345678"
        })
    );
}

#[tokio::test]
async fn list_is_paginated_and_searchable() {
    let app = TestApp::new();
    for i in 1..=3 {
        app.store
            .insert_customer(&format!("Customer {i}"), &format!("c{i}@example.com"), "+2547");
    }
    app.store.insert_customer("Odhiambo", "odhiambo@shop.co.ke", "+2547");

    let body = body_json(app.get("/api/v1/customers?page=2&page_size=3").await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["pagination"],
        json!({"page": 2, "page_size": 3, "total_items": 4, "total_pages": 2})
    );

    let body = body_json(app.get("/api/v1/customers?search=SHOP.co").await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Odhiambo");
}

#[tokio::test]
async fn pages_past_the_end_keep_the_real_totals() {
    let app = TestApp::new();
    for i in 1..=3 {
        app.store
            .insert_customer(&format!("Customer {i}"), &format!("c{i}@example.com"), "+2547");
    }

    let response = app.get("/api/v1/customers?page=99&page_size=10").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(
        body["pagination"],
        json!({"page": 99, "page_size": 10, "total_items": 3, "total_pages": 1})
    );
}

#[tokio::test]
async fn largest_page_number_is_an_empty_list() {
    let app = TestApp::new();
    app.store.insert_customer("Jane", "jane@example.com", "+2547");

    for uri in [
        "/api/v1/customers?page=2147483647&page_size=100",
        "/api/v1/orders?page=2147483647&page_size=100",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = body_json(response).await;
        assert!(body["data"].as_array().unwrap().is_empty(), "{uri}");
        assert_eq!(body["pagination"]["page"], 2147483647, "{uri}");
    }
}

#[tokio::test]
async fn empty_payloads_are_rejected() {
    let app = TestApp::new();

    for body in ["", "{}", "[]"] {
        let response = app.send_json("POST", "/api/v1/customers", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "No data provided!");
    }
}

#[tokio::test]
async fn missing_fields_are_reported_in_order() {
    let app = TestApp::new();

    let cases = [
        (r#"{"email":"a@b.co","contact":"1"}"#, "name"),
        (r#"{"name":"A","contact":"1"}"#, "email"),
        (r#"{"name":"A","email":"a@b.co"}"#, "contact"),
    ];

    for (body, field) in cases {
        let response = app.send_json("POST", "/api/v1/customers", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            format!("Missing {field} field in the data provided!")
        );
    }
    assert!(app.store.customers().is_empty());
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::new();

    let response = app
        .send_json(
            "POST",
            "/api/v1/customers",
            r#"{"name":"Jane","email":"not-an-email","contact":"+254712345678"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "email: Email must be a valid address"
    );
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::new();
    app.send_json("POST", "/api/v1/customers", JANE).await;

    let response = app.send_json("POST", "/api/v1/customers", JANE).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.store.customers().len(), 1);
}

#[tokio::test]
async fn update_changes_only_the_target() {
    let app = TestApp::new();
    let jane = app
        .store
        .insert_customer("Jane", "jane@example.com", "+254712345678");
    let other = app
        .store
        .insert_customer("Otieno", "otieno@example.com", "+254700000000");

    let response = app
        .send_json(
            "PUT",
            &format!("/api/v1/customers/{}", jane.id),
            r#"{"name":"Jane W.","email":"jane.w@example.com","contact":"+254799999999"}"#,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Jane W.");
    assert_eq!(body["data"]["email"], "jane.w@example.com");

    let customers = app.store.customers();
    assert!(customers.contains(&other));
    assert_eq!(customers.len(), 2);
}

#[tokio::test]
async fn update_of_missing_customer_is_not_found() {
    let app = TestApp::new();

    let response = app.send_json("PUT", "/api/v1/customers/42", JANE).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Customer not found");
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let app = TestApp::new();

    let response = app.send_json("PUT", "/api/v1/customers/42", "{}").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "No data provided!");
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = TestApp::new();
    let jane = app
        .store
        .insert_customer("Jane", "jane@example.com", "+254712345678");

    let response = app.delete(&format!("/api/v1/customers/{}", jane.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Customer deleted");

    let response = app.get(&format!("/api/v1/customers/{}", jane.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.delete(&format!("/api/v1/customers/{}", jane.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_customer_removes_their_orders() {
    let app = TestApp::new();
    let jane = app
        .store
        .insert_customer("Jane", "jane@example.com", "+254712345678");
    app.send_json(
        "POST",
        "/api/v1/orders",
        &format!(r#"{{"customer_id":{},"item":"Tea","amount":"120.00"}}"#, jane.id),
    )
    .await;
    assert_eq!(app.store.orders().len(), 1);

    app.delete(&format!("/api/v1/customers/{}", jane.id)).await;
    assert!(app.store.orders().is_empty());
}

#[tokio::test]
async fn health_metrics_and_docs_are_served() {
    let app = TestApp::new();
    app.get("/api/v1/customers").await;

    assert_eq!(app.get("/health").await.status(), StatusCode::OK);

    let metrics = common::body_text(app.get("/metrics").await).await;
    assert!(metrics.contains("customer_service_request_counter"));

    let doc = body_json(app.get("/api-docs/openapi.json").await).await;
    assert!(doc["paths"]["/api/v1/orders/{id}"].is_object());
}
