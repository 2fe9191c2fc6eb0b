//! Geolocation and Telegram clients against a mock HTTP server.
//!
//! The clients are blocking, so each call runs on tokio's blocking pool while
//! the mock server lives on the async runtime.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use subsearch::config::TelegramSettings;
use subsearch::geo::GeoClient;
use subsearch::notify::{Notifier, TelegramNotifier};
use subsearch::{Classification, Error};

fn results() -> Vec<Classification> {
    vec![
        Classification::new("10.0.0.5", Some("office".to_string())),
        Classification::new("8.8.8.8", None),
    ]
}

/// HTTP client that ignores proxy environment variables.
fn local_client() -> reqwest::blocking::Client {
    reqwest::blocking::Client::builder().no_proxy().build().unwrap()
}

fn geo(url: &str) -> GeoClient {
    GeoClient::with_client(url, local_client())
}

fn telegram(url: &str) -> TelegramNotifier {
    let settings = TelegramSettings {
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
    };
    TelegramNotifier::with_client(settings, local_client()).with_api_url(url)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geolocation_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/8.8.8.8/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            serde_json::json!({"ip": "8.8.8.8", "country": "US"}).to_string(),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    let info = tokio::task::spawn_blocking(move || geo(&url).lookup("8.8.8.8"))
        .await
        .unwrap();
    assert_eq!(info["country"], "US");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geolocation_failure_yields_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/8.8.8.8/json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/1.1.1.1/json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let url = server.uri();
    let (not_found, server_error) = tokio::task::spawn_blocking(move || {
        let client = geo(&url);
        (client.try_lookup("8.8.8.8"), client.lookup("1.1.1.1"))
    })
    .await
    .unwrap();

    assert!(matches!(not_found, Err(Error::Geolocation(_))));
    assert_eq!(server_error, serde_json::json!({}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_telegram_posts_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(serde_json::json!({"chat_id": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let url = server.uri();
    tokio::task::spawn_blocking(move || telegram(&url).send(&results()))
        .await
        .unwrap()
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["text"]
        .as_str()
        .unwrap()
        .contains("10.0.0.5 is in the subnets: office"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_telegram_rejection_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(400).set_body_raw(r#"{"ok":false}"#, "application/json"))
        .mount(&server)
        .await;

    let url = server.uri();
    let result = tokio::task::spawn_blocking(move || telegram(&url).send(&results()))
        .await
        .unwrap();

    match result {
        Err(Error::Telegram(msg)) => assert!(msg.contains("400")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_geolocation_skips_non_ip_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(0)
        .mount(&server)
        .await;

    let url = server.uri();
    let result = tokio::task::spawn_blocking(move || geo(&url).try_lookup("../admin"))
        .await
        .unwrap();

    assert!(matches!(result, Err(Error::Geolocation(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}
