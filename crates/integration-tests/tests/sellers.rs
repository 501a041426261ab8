//! Integration tests for seller and address CRUD.
//!
//! These tests require:
//! - A migrated `PostgreSQL` database (cargo run -p delivery-cli -- migrate)
//! - The delivery server running (cargo run -p delivery-server)
//!
//! Run with: cargo test -p delivery-integration-tests -- --ignored

use delivery_integration_tests::{TestContext, unique_cnpj, unique_email};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn register(ctx: &TestContext, body: &Value) -> (StatusCode, Value) {
    let resp = ctx
        .client
        .post(ctx.url("/seller"))
        .json(body)
        .send()
        .await
        .expect("Failed to register seller");
    let status = resp.status();
    (status, resp.json().await.unwrap_or(Value::Null))
}

fn seller_body() -> Value {
    json!({
        "name": "Loja Integração",
        "email": unique_email(),
        "password": "12345678",
        "phoneNumber": 1_112_345_678_i64,
        "cnpj": unique_cnpj(),
    })
}

#[tokio::test]
#[ignore = "Requires running delivery server and database"]
async fn test_seller_lifecycle() {
    let ctx = TestContext::new();

    let (status, created) = register(&ctx, &seller_body()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    let id = created["id"].as_str().unwrap().to_owned();

    let resp = ctx
        .client
        .get(ctx.url(&format!("/seller/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .put(ctx.url("/seller"))
        .json(&json!({ "id": id, "name": "Loja Renomeada" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["name"], "Loja Renomeada");

    let resp = ctx
        .client
        .delete(ctx.url(&format!("/seller/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ctx
        .client
        .get(ctx.url(&format!("/seller/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running delivery server and database"]
async fn test_duplicate_email_rejected() {
    let ctx = TestContext::new();
    let body = seller_body();

    let (status, _) = register(&ctx, &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut duplicate = seller_body();
    duplicate["email"] = body["email"].clone();
    let (status, error) = register(&ctx, &duplicate).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Email already in use.");
}

#[tokio::test]
#[ignore = "Requires running delivery server and database"]
async fn test_invalid_seller_rejected() {
    let ctx = TestContext::new();
    let mut body = seller_body();
    body["email"] = json!("nameemail.org");

    let (status, error) = register(&ctx, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Email has incorrect format.");
}

#[tokio::test]
#[ignore = "Requires running delivery server, database and ViaCEP access"]
async fn test_register_address_by_cep() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/address"))
        .json(&json!({ "cep": "04555-000", "complement": "", "number": 123 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let address: Value = resp.json().await.unwrap();
    assert_eq!(address["state"], "SP");
    assert_eq!(address["number"], 123);

    let resp = ctx.client.get(ctx.url("/address")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
