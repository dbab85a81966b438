//! Dispatcher tests against a wiremock server through the hyper transport.

use std::time::Duration;

use assert2::{check, let_assert};
use razorpay::{
    ApiErrorKind, Config, Error, Host, Method, Payload, Razorpay, Resource, UNKNOWN_ERROR_MESSAGE,
    USER_AGENT,
};
use serde_json::{Map, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, bearer_token, body_string, header, method, path, query_param},
};

fn config(server: &MockServer) -> Config {
    Config::builder()
        .basic_auth("rzp_test_key", "secret")
        .api_url(server.uri())
        .auth_url(server.uri())
        .build()
        .expect("config")
}

fn razorpay(config: Config) -> Razorpay {
    Razorpay::new(config).expect("sdk")
}

#[tokio::test]
async fn fetch_returns_typed_payment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/pay_1"))
        .and(basic_auth("rzp_test_key", "secret"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity": "payment",
            "id": "pay_1",
            "amount": 100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = razorpay(config(&server))
        .dispatcher("payments")
        .fetch("pay_1")
        .await
        .expect("payload");

    let_assert!(Payload::Entity(Resource::Payment(payment)) = payload);
    check!(payment.id() == Some("pay_1"));
    check!(payment.amount() == Some(100));
    check!(payment.attributes().len() == 3);
}

#[tokio::test]
async fn validation_error_carries_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/bogus"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "bad_request_error",
                "description": "Invalid id",
                "field": "id"
            }
        })))
        .mount(&server)
        .await;

    let result = razorpay(config(&server))
        .dispatcher("payments")
        .fetch("bogus")
        .await;

    let_assert!(Err(Error::Api(api)) = result);
    check!(api.kind() == ApiErrorKind::Validation);
    check!(api.code() == "bad_request_error");
    check!(api.status() == 400);
    check!(api.field() == Some("id"));
    check!(api.message() == "Invalid id");
}

#[tokio::test]
async fn unrecognized_error_code_is_unknown() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": "totally_unrecognized_code", "description": "x"}
        })))
        .mount(&server)
        .await;

    let result = razorpay(config(&server))
        .dispatcher("orders")
        .create(&json!({"amount": 1}))
        .await;

    let_assert!(Err(Error::Api(api)) = result);
    check!(api.kind() == ApiErrorKind::Unknown);
    check!(api.message() == UNKNOWN_ERROR_MESSAGE);
    check!(api.status() == 500);
}

#[tokio::test]
async fn create_sends_nested_form_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "amount=5000&currency=INR&notes%5Bpurpose%5D=test&tags%5B%5D=",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity": "order",
            "id": "order_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = razorpay(config(&server))
        .dispatcher("orders")
        .create(&json!({
            "amount": 5000,
            "currency": "INR",
            "notes": {"purpose": "test"},
            "tags": []
        }))
        .await
        .expect("payload");

    check!(matches!(payload, Payload::Entity(Resource::Order(_))));
}

#[tokio::test]
async fn all_sends_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments"))
        .and(query_param("count", "2"))
        .and(query_param("expand[0]", "card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entity": "collection",
            "count": 0,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = razorpay(config(&server))
        .dispatcher("payments")
        .all(&json!({"count": 2, "expand": ["card"]}))
        .await
        .expect("payload");

    check!(matches!(payload, Payload::Entity(Resource::Collection(_))));
}

#[tokio::test]
async fn array_and_empty_bodies_pass_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"card": true}])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/items/item_1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let razorpay = razorpay(config(&server));

    let methods = razorpay
        .dispatcher("methods")
        .all(&())
        .await
        .expect("methods");
    check!(methods == Payload::Raw(json!([{"card": true}])));

    let deleted = razorpay
        .dispatcher("items")
        .delete("item_1")
        .await
        .expect("delete");
    check!(deleted == Payload::Raw(serde_json::Value::Null));
}

#[tokio::test]
async fn non_200_without_error_key_is_generic_entity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/pay_1"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"message": "upstream"})))
        .mount(&server)
        .await;

    let payload = razorpay(config(&server))
        .dispatcher("payments")
        .fetch("pay_1")
        .await
        .expect("payload");

    let_assert!(Payload::Entity(Resource::Entity(entity)) = payload);
    check!(entity.get("message") == Some(&json!("upstream")));
}

#[tokio::test]
async fn sdk_headers_win_over_custom_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/pay_1"))
        .and(header("User-Agent", USER_AGENT))
        .and(header("X-Razorpay-Account", "acc_1"))
        .and(basic_auth("rzp_test_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entity": "payment"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::builder()
        .basic_auth("rzp_test_key", "secret")
        .api_url(server.uri())
        .custom_header("user-agent", "custom-agent")
        .custom_header("Authorization", "Bearer stolen")
        .custom_header("X-Razorpay-Account", "acc_1")
        .build()
        .expect("config");

    razorpay(config)
        .dispatcher("payments")
        .fetch("pay_1")
        .await
        .expect("payload");
}

#[tokio::test]
async fn oauth_token_is_sent_as_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/orders/order_1"))
        .and(bearer_token("access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entity": "order"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config::builder()
        .access_token("access-token")
        .api_url(server.uri())
        .build()
        .expect("config");

    razorpay(config)
        .dispatcher("orders")
        .fetch("order_1")
        .await
        .expect("payload");
}

#[tokio::test]
async fn auth_host_is_selected_per_dispatcher() {
    let api = MockServer::start().await;
    let auth = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
        .expect(1)
        .mount(&auth)
        .await;

    let config = Config::builder()
        .basic_auth("rzp_test_key", "secret")
        .api_url(api.uri())
        .auth_url(auth.uri())
        .build()
        .expect("config");
    let razorpay = razorpay(config);

    let tokens = razorpay.auth_dispatcher("token").version("");
    check!(tokens.host() == Host::Auth);

    let payload = tokens
        .create(&json!({"grant_type": "client_credentials"}))
        .await
        .expect("payload");

    check!(matches!(payload, Payload::Entity(Resource::Entity(_))));
    check!(api.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn versioned_dispatch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/accounts/acc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entity": "account"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = razorpay(config(&server))
        .dispatcher("accounts")
        .version("v2")
        .fetch("acc_1")
        .await
        .expect("payload");

    let_assert!(Payload::Entity(resource) = payload);
    check!(resource.kind() == "account");
}

#[tokio::test]
async fn ping_and_raw_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(basic_auth("rzp_test_key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Welcome to Razorpay API."))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/payments"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "BAD_REQUEST_ERROR", "description": "Authentication failed"}
        })))
        .mount(&server)
        .await;

    let payments = razorpay(config(&server)).dispatcher("payments");

    let response = payments.ping().await.expect("ping");
    check!(response.status() == 200);

    let response = payments
        .raw_request(Method::Get, "/v1/payments", &Map::new())
        .await
        .expect("raw response");
    check!(response.status() == 401);
    check!(response.parsed()["error"]["code"] == "BAD_REQUEST_ERROR");
}

#[tokio::test]
async fn timeout_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/payments/pay_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"entity": "payment"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = Config::builder()
        .basic_auth("rzp_test_key", "secret")
        .api_url(server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .expect("config");

    let err = razorpay(config)
        .dispatcher("payments")
        .fetch("pay_1")
        .await
        .expect_err("timeout");

    check!(err.is_timeout());
    check!(!err.is_api());
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    let config = Config::builder()
        .basic_auth("rzp_test_key", "secret")
        .api_url("http://127.0.0.1:1")
        .build()
        .expect("config");

    let err = razorpay(config)
        .dispatcher("payments")
        .fetch("pay_1")
        .await
        .expect_err("connection refused");

    check!(err.is_connection(), "{err}");
    check!(err.api_error().is_none());
}
