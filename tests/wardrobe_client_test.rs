use capsule_form::core::codec;
use capsule_form::core::WardrobeClient;
use capsule_form::domain::model::{Capsule, Clothing, Color, ErrorEnvelope, WardrobeResponse};
use capsule_form::{CapsuleError, HttpWardrobeClient};
use httpmock::prelude::*;
use std::time::Duration;

fn default_token() -> String {
    codec::encode(&Capsule::default()).unwrap().to_string()
}

#[tokio::test]
async fn test_fetch_wardrobe_success() {
    let server = MockServer::start_async().await;
    let token = default_token();

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/capsule/{}", token))
                .header("Accept", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    ["Shirt", 3, ["White", "LightBlue"]],
                    ["Trench Coat", 1, ["Beige"]]
                ]));
        })
        .await;

    let client = HttpWardrobeClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
    let response = client.fetch_wardrobe(&token).await.unwrap();

    api_mock.assert_async().await;
    match response {
        WardrobeResponse::Wardrobe(wardrobe) => {
            assert_eq!(wardrobe.items().len(), 2);
            assert_eq!(wardrobe.items()[0].clothing, Clothing::Shirt);
            assert_eq!(wardrobe.items()[0].colors, vec![Color::White, Color::LightBlue]);
            assert_eq!(wardrobe.items()[1].clothing, Clothing::TrenchCoat);
        }
        other => panic!("expected a wardrobe, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_wardrobe_error_envelope() {
    let server = MockServer::start_async().await;
    let token = default_token();

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/capsule/{}", token));
            then.status(200)
                .json_body(serde_json::json!({"error": true, "message": "invalid"}));
        })
        .await;

    let client = HttpWardrobeClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
    let response = client.fetch_wardrobe(&token).await.unwrap();

    api_mock.assert_async().await;
    assert_eq!(
        response,
        WardrobeResponse::Rejected(ErrorEnvelope {
            message: "invalid".to_string()
        })
    );
}

#[tokio::test]
async fn test_fetch_wardrobe_non_success_status() {
    let server = MockServer::start_async().await;
    let token = default_token();

    let api_mock = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/capsule/{}", token));
            then.status(500).body("boom");
        })
        .await;

    let client = HttpWardrobeClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
    let result = client.fetch_wardrobe(&token).await;

    api_mock.assert_async().await;
    assert!(matches!(result, Err(CapsuleError::NonSuccessStatus { status: 500 })));
}

#[tokio::test]
async fn test_fetch_wardrobe_unexpected_body() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/capsule/");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let client = HttpWardrobeClient::new(server.base_url(), Duration::from_secs(5)).unwrap();
    let result = client.fetch_wardrobe(&default_token()).await;

    assert!(matches!(result, Err(CapsuleError::Serialization(_))));
}

#[tokio::test]
async fn test_fetch_wardrobe_timeout() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path_contains("/capsule/");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(serde_json::json!([]));
        })
        .await;

    let client = HttpWardrobeClient::new(server.base_url(), Duration::from_millis(200)).unwrap();
    let result = client.fetch_wardrobe(&default_token()).await;

    match result {
        Err(CapsuleError::Network(e)) => assert!(e.is_timeout()),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_wardrobe_unreachable_server() {
    // nothing listens on port 1
    let client = HttpWardrobeClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
    let result = client.fetch_wardrobe(&default_token()).await;

    assert!(matches!(result, Err(CapsuleError::Network(_))));
}
