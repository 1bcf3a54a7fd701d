use super::*;

fn test_client(base_url: &str) -> GeminiClient {
    let options = ClientOptions {
        base_url: base_url.to_string(),
        ..ClientOptions::default()
    };
    GeminiClient::with_options("test-key", &options).expect("client construction should not fail")
}

#[test]
fn endpoint_url_targets_model_generate_content() {
    let client = test_client("https://generativelanguage.googleapis.com");
    let url = client.endpoint_url().unwrap();
    assert_eq!(
        url.as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn endpoint_url_keeps_base_path_and_strips_trailing_slashes() {
    let client = test_client("http://127.0.0.1:8080/proxy//");
    let url = client.endpoint_url().unwrap();
    assert_eq!(
        url.as_str(),
        "http://127.0.0.1:8080/proxy/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let options = ClientOptions {
        base_url: "not a url".to_string(),
        ..ClientOptions::default()
    };
    let result = GeminiClient::with_options("k", &options);
    assert!(matches!(result, Err(GeminiError::InvalidBaseUrl { .. })));
}

#[test]
fn error_message_prefers_api_envelope() {
    let body = r#"{"error":{"code":400,"message":"Request contains an invalid argument.","status":"INVALID_ARGUMENT"}}"#;
    assert_eq!(
        GeminiClient::error_message(body),
        "INVALID_ARGUMENT: Request contains an invalid argument."
    );
}

#[test]
fn error_message_falls_back_to_raw_body() {
    assert_eq!(GeminiClient::error_message("upstream exploded"), "upstream exploded");
    let long = "x".repeat(500);
    assert_eq!(GeminiClient::error_message(&long).len(), 200);
}
