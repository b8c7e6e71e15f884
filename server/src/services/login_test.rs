use super::*;
use crate::state::test_helpers::test_app_state;

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Ada@Example.COM "), Some("ada@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_malformed() {
    assert_eq!(normalize_email(""), None);
    assert_eq!(normalize_email("   "), None);
    assert_eq!(normalize_email("no-at-sign"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("ada@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

#[test]
fn normalize_code_uppercases_and_trims() {
    assert_eq!(normalize_code(" abc234 "), Some("ABC234".to_owned()));
}

#[test]
fn normalize_code_rejects_wrong_length_or_alphabet() {
    assert_eq!(normalize_code("ABC23"), None);
    assert_eq!(normalize_code("ABC2345"), None);
    // 'I', 'O', '0' and '1' are excluded from the alphabet as ambiguous.
    assert_eq!(normalize_code("ABC10I"), None);
    assert_eq!(normalize_code("ABC!23"), None);
}

// =============================================================================
// Code generation and hashing
// =============================================================================

#[test]
fn generated_code_uses_alphabet_and_length() {
    let code = generate_access_code();
    assert_eq!(code.len(), CODE_LEN);
    assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
}

#[test]
fn hash_is_deterministic_and_code_sensitive() {
    assert_eq!(hash_access_code("ABC234"), hash_access_code("ABC234"));
    assert_ne!(hash_access_code("ABC234"), hash_access_code("ABC235"));
}

// =============================================================================
// Request / verify flow
// =============================================================================

#[tokio::test]
async fn request_then_verify_succeeds_and_consumes_code() {
    let state = test_app_state();
    let code = request_access_code(&state, "ada@example.com").await.unwrap();

    let user_id = verify_access_code(&state, "ada@example.com", &code).await.unwrap();
    assert_eq!(state.users_by_email.read().await.get("ada@example.com"), Some(&user_id));

    // Single use: the same code never verifies twice.
    assert!(matches!(
        verify_access_code(&state, "ada@example.com", &code).await,
        Err(LoginError::VerificationFailed)
    ));
}

#[tokio::test]
async fn request_creates_user_with_name_from_email_local_part() {
    let state = test_app_state();
    let _ = request_access_code(&state, "Grace@Example.com").await.unwrap();

    let id = *state.users_by_email.read().await.get("grace@example.com").unwrap();
    let users = state.users.read().await;
    assert_eq!(users.get(&id).map(|u| u.name.as_str()), Some("grace"));
}

#[tokio::test]
async fn second_request_replaces_pending_code() {
    let state = test_app_state();
    let first = request_access_code(&state, "ada@example.com").await.unwrap();
    let second = request_access_code(&state, "ada@example.com").await.unwrap();

    if first != second {
        assert!(matches!(
            verify_access_code(&state, "ada@example.com", &first).await,
            Err(LoginError::VerificationFailed)
        ));
    }
    assert!(verify_access_code(&state, "ada@example.com", &second).await.is_ok());
}

#[tokio::test]
async fn verify_rejects_malformed_inputs() {
    let state = test_app_state();
    assert!(matches!(
        verify_access_code(&state, "not-an-email", "ABC234").await,
        Err(LoginError::InvalidEmail)
    ));
    assert!(matches!(
        verify_access_code(&state, "ada@example.com", "nope").await,
        Err(LoginError::InvalidCode)
    ));
}

#[tokio::test]
async fn verify_unknown_email_fails() {
    let state = test_app_state();
    assert!(matches!(
        verify_access_code(&state, "ada@example.com", "ABC234").await,
        Err(LoginError::VerificationFailed)
    ));
}

#[tokio::test]
async fn fifth_failed_attempt_consumes_code() {
    let state = test_app_state();
    state.login_codes.write().await.insert(
        "ada@example.com".to_owned(),
        crate::state::LoginCode {
            code_hash: hash_access_code("ABC234"),
            expires_at: OffsetDateTime::now_utc() + CODE_TTL,
            attempts: 0,
        },
    );

    for _ in 0..5 {
        assert!(matches!(
            verify_access_code(&state, "ada@example.com", "XYZ789").await,
            Err(LoginError::VerificationFailed)
        ));
    }

    // The correct code no longer works: the record was retired.
    assert!(matches!(
        verify_access_code(&state, "ada@example.com", "ABC234").await,
        Err(LoginError::VerificationFailed)
    ));
    assert!(state.login_codes.read().await.is_empty());
}

#[tokio::test]
async fn expired_code_fails_and_is_removed() {
    let state = test_app_state();
    state.login_codes.write().await.insert(
        "ada@example.com".to_owned(),
        crate::state::LoginCode {
            code_hash: hash_access_code("ABC234"),
            expires_at: OffsetDateTime::now_utc() - Duration::minutes(1),
            attempts: 0,
        },
    );

    assert!(matches!(
        verify_access_code(&state, "ada@example.com", "ABC234").await,
        Err(LoginError::VerificationFailed)
    ));
    assert!(state.login_codes.read().await.is_empty());
}
