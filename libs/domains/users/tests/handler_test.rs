//! Handler tests for the Users domain
//!
//! These drive the users router directly with an in-memory repository and a
//! canned order client:
//! - Request deserialization and response serialization
//! - HTTP status codes
//! - Error bodies (code, path, status)

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

/// Order client returning a fixed answer
#[derive(Clone)]
enum StubOrders {
    Orders(Vec<OrderSummary>),
    Unavailable,
}

#[async_trait]
impl OrderClient for StubOrders {
    async fn orders_for_user(&self, _user_id: Uuid) -> Result<Vec<OrderSummary>, OrderClientError> {
        match self {
            StubOrders::Orders(orders) => Ok(orders.clone()),
            StubOrders::Unavailable => Err(OrderClientError::Status {
                status: 503,
                url: "http://order-service/api/orders/user/secret".to_string(),
            }),
        }
    }
}

struct TestApp {
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        Self::with_orders(StubOrders::Orders(Vec::new()))
    }

    fn with_orders(orders: StubOrders) -> Self {
        let service = UserService::new(InMemoryUserRepository::new(), orders);
        Self {
            router: Router::new().nest("/api/users", handlers::router(service)),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create(&self, name: &str, email: &str) -> User {
        let (status, body) = self
            .send("POST", "/api/users", Some(json!({"name": name, "email": email})))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        serde_json::from_value(body).unwrap()
    }
}

#[tokio::test]
async fn test_create_user_returns_201() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/api/users",
            Some(json!({"name": "Juan Pérez", "email": "juan@example.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Juan Pérez");
    assert_eq!(body["email"], "juan@example.com");
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_create_duplicate_email_returns_409() {
    let app = TestApp::new();
    app.create("Juan Pérez", "juan@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/users",
            Some(json!({"name": "Otro Juan", "email": "juan@example.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "USER_ALREADY_EXISTS");
    assert_eq!(body["status"], 409);
    assert_eq!(body["path"], "/api/users");
    assert!(body["message"].as_str().unwrap().contains("juan@example.com"));

    let (_, total) = app.send("GET", "/api/users/stats/total", None).await;
    assert_eq!(total, json!(1));
}

#[tokio::test]
async fn test_create_invalid_input_returns_400() {
    let app = TestApp::new();

    for payload in [
        json!({"name": "", "email": "juan@example.com"}),
        json!({"name": "Juan", "email": ""}),
        json!({"name": "Juan", "email": "juan.example.com"}),
        json!({"name": "x".repeat(101), "email": "juan@example.com"}),
        json!({"email": "juan@example.com"}),
        Value::Null,
    ] {
        let (status, body) = app.send("POST", "/api/users", Some(payload.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body["errorCode"], "USER_VALIDATION_ERROR", "payload {payload}");
        assert_eq!(body["details"], "The provided data is not valid");
    }

    let (_, total) = app.send("GET", "/api/users/stats/total", None).await;
    assert_eq!(total, json!(0));
}

#[tokio::test]
async fn test_null_fields_are_validation_errors() {
    let app = TestApp::new();

    for payload in [
        json!({"name": null, "email": "juan@example.com"}),
        json!({"name": "Juan", "email": null}),
        json!({"name": null, "email": null}),
    ] {
        let (status, body) = app.send("POST", "/api/users", Some(payload.clone())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body["errorCode"], "USER_VALIDATION_ERROR", "payload {payload}");
    }

    let user = app.create("Juan", "juan@example.com").await;
    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/users/{}", user.id),
            Some(json!({"name": "Juan", "email": null})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "USER_VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_without_body_is_validation_error() {
    let app = TestApp::new();

    let (status, body) = app.send("POST", "/api/users", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "USER_VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_user_by_id_and_email() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("get_by_id_and_email");
    let created = app.create("Ana", &builder.email("ana")).await;

    let (status, body) = app.send("GET", &format!("/api/users/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], created.email);

    let (status, body) = app
        .send("GET", &format!("/api/users/email/{}", created.email), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created.id.to_string());
}

#[tokio::test]
async fn test_unknown_user_returns_404_with_path() {
    let app = TestApp::new();
    let id = TestDataBuilder::from_test_name("unknown_user").user_id();
    let uri = format!("/api/users/{id}");

    let (status, body) = app.send("GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
    assert_eq!(body["path"], uri);
    assert!(body["message"].as_str().unwrap().contains(&id.to_string()));

    let (status, body) = app.send("GET", "/api/users/email/nobody@example.com", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_id_returns_400() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/api/users/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "INVALID_UUID");
}

#[tokio::test]
async fn test_update_user() {
    let app = TestApp::new();
    let created = app.create("Juan", "juan@example.com").await;
    let uri = format!("/api/users/{}", created.id);

    let (status, body) = app
        .send("PUT", &uri, Some(json!({"name": "Juan Carlos", "email": "juan@example.com"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Juan Carlos");
    assert_eq!(body["id"], created.id.to_string());

    let updated: User = serde_json::from_value(body).unwrap();
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_to_taken_email_returns_409() {
    let app = TestApp::new();
    app.create("Ana", "ana@example.com").await;
    let bob = app.create("Bob", "bob@example.com").await;

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/users/{}", bob.id),
            Some(json!({"name": "Bob", "email": "ana@example.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/users/{}", Uuid::now_v7()),
            Some(json!({"name": "Juan", "email": "juan@example.com"})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let created = app.create("Juan", "juan@example.com").await;
    let uri = format!("/api/users/{}", created.id);

    let (status, body) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_search() {
    let app = TestApp::new();
    app.create("Juan Pérez", "juan@example.com").await;
    app.create("María Pérez", "maria@example.com").await;
    app.create("John Smith", "john@example.com").await;

    let (status, body) = app.send("GET", "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = app.send("GET", "/api/users/search?name=P%C3%A9rez", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().all(|n| n.contains("Pérez")));

    let (status, body) = app.send("GET", "/api/users/search?name=Nadie", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_blank_search_returns_400() {
    let app = TestApp::new();

    for uri in ["/api/users/search", "/api/users/search?name=", "/api/users/search?name=%20%20"] {
        let (status, body) = app.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["errorCode"], "USER_VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_total_counts_successful_creations() {
    let app = TestApp::new();
    let builder = TestDataBuilder::from_test_name("total_counts");

    for i in 0..3 {
        app.create(&builder.name("user", &i.to_string()), &builder.email(&format!("u{i}")))
            .await;
    }

    let (status, body) = app.send("GET", "/api/users/stats/total", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(3));
}

#[tokio::test]
async fn test_user_orders_are_returned() {
    let orders = vec![OrderSummary {
        id: 7,
        user_id: None,
        product_id: Some(3),
        quantity: Some(2),
        total_amount: Some(20.0),
        order_date: None,
        status: Some("SHIPPED".to_string()),
        description: None,
    }];
    let app = TestApp::with_orders(StubOrders::Orders(orders));
    let user = app.create("Juan", "juan@example.com").await;

    let (status, body) = app
        .send("GET", &format!("/api/users/{}/orders", user.id), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 7);
    assert_eq!(body[0]["productId"], 3);
    assert_eq!(body[0]["totalAmount"], 20.0);
}

#[tokio::test]
async fn test_order_service_failure_returns_503() {
    let app = TestApp::with_orders(StubOrders::Unavailable);
    let user = app.create("Juan", "juan@example.com").await;

    let (status, body) = app
        .send("GET", &format!("/api/users/{}/orders", user.id), None)
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["errorCode"], "ORDER_SERVICE_ERROR");
    assert_eq!(body["message"], "Failed to retrieve order information");
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_orders_of_unknown_user_return_404() {
    let app = TestApp::with_orders(StubOrders::Unavailable);

    let (status, body) = app
        .send("GET", &format!("/api/users/{}/orders", Uuid::now_v7()), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "USER_NOT_FOUND");
}
