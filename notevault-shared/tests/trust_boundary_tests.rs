//! End-to-end exercise of the issuer/verifier trust contract, the way the
//! two deployed services use it: an issuer constructed in one place, an
//! independently constructed verifier in another, agreeing only on the
//! secret and algorithm.

use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use notevault_shared::auth::middleware::{authenticate, AuthError};
use notevault_shared::auth::token::{TokenConfig, TokenIssuer, TokenVerifier};
use serde_json::Map;

const SECRET: &str = "integration-test-secret-32-bytes!!";

fn issuer() -> TokenIssuer {
    TokenIssuer::new(TokenConfig::new(SECRET, Duration::minutes(30)))
}

fn verifier() -> TokenVerifier {
    // Built independently of the issuer, as the notes service would.
    TokenVerifier::new(TokenConfig::new(SECRET, Duration::minutes(30)))
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

#[test]
fn login_token_authenticates_against_an_independent_verifier() {
    let token = issuer().issue("alice", Map::new(), None).unwrap();

    let subject = authenticate(&bearer(&token), &verifier()).unwrap();
    assert_eq!(subject, "alice");
}

#[test]
fn issued_expiry_lands_thirty_minutes_out() {
    let before = Utc::now().timestamp();
    let token = issuer().issue("bob", Map::new(), None).unwrap();

    let claims = verifier().verify(&token).unwrap();
    assert_eq!(claims.sub, "bob");
    assert!((claims.exp - before - 1800).abs() <= 2);

    let subject = authenticate(&bearer(&token), &verifier()).unwrap();
    assert_eq!(subject, "bob");
}

#[test]
fn verifier_with_a_different_secret_rejects_everything() {
    let token = issuer().issue("alice", Map::new(), None).unwrap();

    let strange_verifier =
        TokenVerifier::new(TokenConfig::new("some-other-secret-entirely-here", Duration::minutes(30)));
    let err = authenticate(&bearer(&token), &strange_verifier).unwrap_err();
    assert_eq!(err.reason_code(), "bad_signature");
}

#[test]
fn already_expired_token_is_rejected() {
    let token = issuer()
        .issue("alice", Map::new(), Some(Duration::seconds(-1)))
        .unwrap();

    let err = authenticate(&bearer(&token), &verifier()).unwrap_err();
    assert_eq!(err.reason_code(), "expired_token");
}

#[test]
fn requests_without_usable_credentials_are_rejected() {
    let v = verifier();

    let err = authenticate(&HeaderMap::new(), &v).unwrap_err();
    assert!(matches!(err, AuthError::MissingHeader));

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
    let err = authenticate(&headers, &v).unwrap_err();
    assert!(matches!(err, AuthError::MalformedHeader));
}
