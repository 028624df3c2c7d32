use chrono::Utc;
use sporemote::config::Credentials;
use sporemote::management::TokenManager;
use sporemote::types::{Token, TokenResponse};
use tokio_util::sync::CancellationToken;

// Helper function to create a test token
fn create_test_token(expires_in: u64, created_at: i64) -> Token {
    Token {
        access_token: "BQC-test-access-token".to_string(),
        token_type: "Bearer".to_string(),
        expires_in,
        created_at,
    }
}

#[test]
fn test_validity_boundary() {
    let token = create_test_token(3600, 1_000_000);

    // Valid strictly before created_at + expires_in
    assert!(token.is_valid_at(1_000_000));
    assert!(token.is_valid_at(1_003_599));

    // Exactly at expiry counts as expired
    assert!(!token.is_valid_at(1_003_600));
    assert!(!token.is_valid_at(1_003_601));
}

#[test]
fn test_fresh_token_is_valid() {
    let now = Utc::now().timestamp();
    let token = create_test_token(3600, now);

    assert!(token.is_valid());
}

#[test]
fn test_stale_token_is_expired() {
    // Issued 10000 seconds ago with one hour of validity
    let now = Utc::now().timestamp();
    let token = create_test_token(3600, now - 10_000);

    assert!(!token.is_valid());
}

#[test]
fn test_issued_now_stamps_current_time() {
    let before = Utc::now().timestamp();
    let token = Token::issued_now(TokenResponse {
        access_token: "abc".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
    });
    let after = Utc::now().timestamp();

    assert!(token.created_at >= before && token.created_at <= after);
    assert_eq!(token.access_token, "abc");
    assert_eq!(token.token_type, "Bearer");
    assert!(token.is_valid());
}

#[test]
fn test_round_trip_preserves_fields() {
    let token = create_test_token(3600, 1_700_000_000);

    let json = serde_json::to_string_pretty(&token).unwrap();
    let restored: Token = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.access_token, token.access_token);
    assert_eq!(restored.token_type, token.token_type);
    assert_eq!(restored.expires_in, token.expires_in);
    assert_eq!(restored.created_at, token.created_at);
}

#[tokio::test]
async fn test_ensure_valid_returns_valid_token_unchanged() {
    let credentials = Credentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://127.0.0.1:9/callback".to_string(),
    };
    let token = create_test_token(3600, Utc::now().timestamp());

    let mut manager = TokenManager::new(token.clone(), credentials);
    let cancel = CancellationToken::new();

    // A valid token comes back unchanged, no re-authentication happens
    let returned = manager.ensure_valid(&cancel).await.unwrap();
    assert_eq!(returned.access_token, token.access_token);
    assert_eq!(returned.expires_in, token.expires_in);
    assert_eq!(returned.created_at, token.created_at);
}

#[test]
fn test_token_file_key_casing() {
    // The persisted format keeps the legacy CreatedAt key
    let token = create_test_token(3600, 1_700_000_000);
    let json = serde_json::to_string(&token).unwrap();

    assert!(json.contains("\"CreatedAt\""));
    assert!(json.contains("\"access_token\""));
    assert!(json.contains("\"token_type\""));
    assert!(json.contains("\"expires_in\""));

    let legacy =
        r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600,"CreatedAt":1700000000}"#;
    let parsed: Token = serde_json::from_str(legacy).unwrap();
    assert_eq!(parsed.created_at, 1_700_000_000);
}
