//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness
//! GET    /health/ready          - Readiness (database)
//!
//! # Fee quote
//! POST   /v1/consulta-endereco  - { "cep": "..." } -> fee + address
//!
//! # Sellers
//! POST   /seller                - Register (201)
//! GET    /seller                - List (204 when empty)
//! PUT    /seller                - Update
//! GET    /seller/{id}           - Show
//! DELETE /seller/{id}           - Delete (204)
//!
//! # Addresses
//! POST   /address               - Register by CEP (201)
//! GET    /address               - List (204 when empty)
//! ```

pub mod addresses;
pub mod fee;
pub mod sellers;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the API routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/consulta-endereco", post(fee::quote))
        .route(
            "/seller",
            get(sellers::list)
                .post(sellers::register)
                .put(sellers::update),
        )
        .route("/seller/{id}", get(sellers::show).delete(sellers::delete))
        .route("/address", get(addresses::list).post(addresses::register))
}

/// Build the full application router with health checks, tracing and request IDs.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        // Request ID runs inside the trace span so it can record into it
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use chrono::Utc;
    use delivery_core::{Cep, Cnpj, Email, SellerId};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::db::{MockAddressRepository, MockSellerRepository};
    use crate::models::Seller;
    use crate::services::lookup::{AddressRecord, LookupError, MockAddressLookupClient};

    fn lazy_pool() -> sqlx::PgPool {
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/delivery_test")
            .unwrap()
    }

    fn lookup_returning(
        result: Result<Option<AddressRecord>, LookupError>,
    ) -> MockAddressLookupClient {
        let mut client = MockAddressLookupClient::new();
        client.expect_lookup().return_once(move |_| result);
        client
    }

    fn sao_paulo() -> AddressRecord {
        AddressRecord {
            street: "Rua Doutor Luiz Migliano".to_owned(),
            complement: String::new(),
            district: "Jardim Vazame".to_owned(),
            city: "São Paulo".to_owned(),
            state: "SP".to_owned(),
        }
    }

    fn app_with(
        lookup: MockAddressLookupClient,
        sellers: MockSellerRepository,
        addresses: MockAddressRepository,
    ) -> Router {
        app(AppState::from_parts(
            lazy_pool(),
            Arc::new(lookup),
            Arc::new(sellers),
            Arc::new(addresses),
        ))
    }

    fn quote_app(lookup: MockAddressLookupClient) -> Router {
        app_with(
            lookup,
            MockSellerRepository::new(),
            MockAddressRepository::new(),
        )
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn seller() -> Seller {
        let now = Utc::now();
        Seller {
            id: SellerId::generate(),
            name: "Name".to_owned(),
            email: Email::parse("name@email.com").unwrap(),
            cnpj: Cnpj::parse("09876543211234").unwrap(),
            phone_number: None,
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = quote_app(MockAddressLookupClient::new())
            .oneshot(get_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_quote_ok() {
        let app = quote_app(lookup_returning(Ok(Some(sao_paulo()))));

        let (status, json) = send(
            app,
            json_request("POST", "/v1/consulta-endereco", r#"{"cep":"04851280"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["fee"], "7.85");
        assert_eq!(json["address"]["state"], "SP");
        assert_eq!(json["address"]["cep"], "04851280");
    }

    #[tokio::test]
    async fn test_quote_invalid_cep() {
        let mut lookup = MockAddressLookupClient::new();
        lookup.expect_lookup().times(0);

        let (status, json) = send(
            quote_app(lookup),
            json_request("POST", "/v1/consulta-endereco", r#"{"cep":"123456789"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation");
        assert_eq!(
            json["message"],
            "Please verify if cep has 8 numbers, and numbers only."
        );
    }

    #[tokio::test]
    async fn test_quote_not_found() {
        let (status, json) = send(
            quote_app(lookup_returning(Ok(None))),
            json_request("POST", "/v1/consulta-endereco", r#"{"cep":"99999999"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Address not found for given cep.");
    }

    #[tokio::test]
    async fn test_quote_upstream_timeout() {
        let (status, json) = send(
            quote_app(lookup_returning(Err(LookupError::Timeout("5s".into())))),
            json_request("POST", "/v1/consulta-endereco", r#"{"cep":"04851280"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(json["kind"], "upstream_timeout");
    }

    #[tokio::test]
    async fn test_quote_upstream_unavailable() {
        let (status, _) = send(
            quote_app(lookup_returning(Err(LookupError::Transport("refused".into())))),
            json_request("POST", "/v1/consulta-endereco", r#"{"cep":"04851280"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[rstest::rstest]
    #[case::null(r#"{"cep":null}"#)]
    #[case::number(r#"{"cep":4851280}"#)]
    #[case::object(r#"{"cep":{"value":"04851280"}}"#)]
    #[case::missing("{}")]
    #[tokio::test]
    async fn test_quote_non_string_cep_is_validation_error(#[case] body: &str) {
        let mut lookup = MockAddressLookupClient::new();
        lookup.expect_lookup().times(0);

        let (status, json) = send(
            quote_app(lookup),
            json_request("POST", "/v1/consulta-endereco", body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation");
        assert_eq!(
            json["message"],
            "Please verify if cep has 8 numbers, and numbers only."
        );
    }

    #[tokio::test]
    async fn test_quote_malformed_body() {
        let (status, json) = send(
            quote_app(MockAddressLookupClient::new()),
            json_request("POST", "/v1/consulta-endereco", "{not json"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation");
    }

    #[tokio::test]
    async fn test_register_seller_created() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_find_by_email().returning(|_| Ok(None));
        sellers.expect_find_by_cnpj().returning(|_| Ok(None));
        sellers.expect_insert().returning(|new| {
            Ok(Seller {
                id: new.id,
                name: new.name.clone(),
                email: new.email.clone(),
                cnpj: new.cnpj.clone(),
                phone_number: new.phone_number,
                password_hash: new.password_hash.clone(),
                ..seller()
            })
        });

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let (status, json) = send(
            app,
            json_request(
                "POST",
                "/seller",
                r#"{"name":"Name","email":"name@email.com","password":"12345678","phoneNumber":1112345678,"cnpj":"09876543211234"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["email"], "name@email.com");
        assert_eq!(json["phoneNumber"], 1_112_345_678);
        assert!(json.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_seller_conflict_is_bad_request() {
        let mut sellers = MockSellerRepository::new();
        sellers
            .expect_find_by_email()
            .returning(|_| Ok(Some(seller())));
        sellers.expect_insert().times(0);

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let (status, json) = send(
            app,
            json_request(
                "POST",
                "/seller",
                r#"{"name":"Name","email":"name@email.com","password":"12345678","cnpj":"09876543211234"}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "conflict");
        assert_eq!(json["message"], "Email already in use.");
    }

    #[tokio::test]
    async fn test_list_sellers_empty_is_no_content() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_find_all().returning(|| Ok(Vec::new()));

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let (status, json) = send(app, get_request("/seller")).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(json.is_null());
    }

    #[tokio::test]
    async fn test_list_sellers() {
        let mut sellers = MockSellerRepository::new();
        sellers
            .expect_find_all()
            .returning(|| Ok(vec![seller(), seller()]));

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let (status, json) = send(app, get_request("/seller")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_show_seller_not_found() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_find_by_id().returning(|_| Ok(None));

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let uri = format!("/seller/{}", SellerId::generate());
        let (status, json) = send(app, get_request(&uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Seller not found.");
    }

    #[tokio::test]
    async fn test_show_seller_bad_id() {
        let mut sellers = MockSellerRepository::new();
        sellers.expect_find_by_id().times(0);

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let (status, _) = send(app, get_request("/seller/not-a-uuid")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_seller() {
        let existing = seller();
        let id = existing.id;

        let mut sellers = MockSellerRepository::new();
        sellers
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(existing)));
        sellers.expect_delete().times(1).returning(|_| Ok(true));

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/seller/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app, request).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_update_seller() {
        let existing = seller();
        let id = existing.id;

        let mut sellers = MockSellerRepository::new();
        sellers
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(existing)));
        sellers.expect_update().returning(|s| Ok(s.clone()));

        let app = app_with(
            MockAddressLookupClient::new(),
            sellers,
            MockAddressRepository::new(),
        );
        let body = format!(r#"{{"id":"{id}","name":"Loja Nova"}}"#);
        let (status, json) = send(app, json_request("PUT", "/seller", &body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Loja Nova");
    }

    #[tokio::test]
    async fn test_register_address() {
        let mut addresses = MockAddressRepository::new();
        addresses.expect_insert().returning(|new| {
            Ok(crate::models::Address {
                id: delivery_core::AddressId::new(7),
                cep: new.cep.clone(),
                street: new.street.clone(),
                complement: new.complement.clone(),
                district: new.district.clone(),
                city: new.city.clone(),
                state: new.state.clone(),
                number: new.number,
                created_at: Utc::now(),
            })
        });

        let app = app_with(
            lookup_returning(Ok(Some(sao_paulo()))),
            MockSellerRepository::new(),
            addresses,
        );
        let (status, json) = send(
            app,
            json_request("POST", "/address", r#"{"cep":"04851-280","number":123}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["id"], 7);
        assert_eq!(json["cep"], Cep::parse("04851280").unwrap().as_str());
        assert_eq!(json["number"], 123);
    }

    #[tokio::test]
    async fn test_register_address_missing_number() {
        let (status, json) = send(
            quote_app(MockAddressLookupClient::new()),
            json_request("POST", "/address", r#"{"cep":"04851280"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Address number must not be null.");
    }

    #[tokio::test]
    async fn test_list_addresses_empty_is_no_content() {
        let mut addresses = MockAddressRepository::new();
        addresses.expect_find_all().returning(|| Ok(Vec::new()));

        let app = app_with(
            MockAddressLookupClient::new(),
            MockSellerRepository::new(),
            addresses,
        );
        let (status, _) = send(app, get_request("/address")).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
