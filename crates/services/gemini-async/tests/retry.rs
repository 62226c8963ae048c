use gemini_async::{Client, GeminiConfig, GeminiError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-pro-latest:generateContent";

fn test_client_fast_retry(server: &MockServer) -> Client<GeminiConfig> {
    let config = GeminiConfig::from_defaults()
        .with_api_base(server.uri())
        .with_model("models/gemini-1.5-pro-latest")
        .with_api_key("test-api-key");
    Client::with_config(config).with_backoff(
        backon::ExponentialBuilder::default()
            .with_min_delay(std::time::Duration::from_millis(1))
            .with_max_delay(std::time::Duration::from_millis(10))
            .with_max_times(4),
    )
}

#[tokio::test]
async fn persistent_500_spends_exactly_five_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
        .expect(5)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let value = client.typed().run("q").await.unwrap();

    assert!(value.is_no_values());
}

#[tokio::test]
async fn retry_500_then_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "functionCall": {
                        "name": "customType_string",
                        "args": { "items": "Osaka" }
                    }}]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let value = client.typed().run("second largest city?").await.unwrap();

    assert_eq!(value.as_str(), Some("Osaka"));
}

#[tokio::test]
async fn retry_budget_is_configurable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server).with_retry_budget(2);
    assert!(client.typed().run("q").await.unwrap().is_no_values());
}

#[tokio::test]
async fn other_5xx_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client_fast_retry(&server);
    let err = client.typed().run("q").await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert!(matches!(err, GeminiError::Api(_)));
    assert_eq!(err.to_string(), "unavailable");
}
