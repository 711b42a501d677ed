/// Bearer authentication for Axum, the verifier-side trust boundary
///
/// Extracts the bearer token from the `Authorization` header, verifies it
/// with a [`TokenVerifier`], and injects an [`AuthContext`] carrying the
/// authenticated subject into request extensions. Handlers read it back with
/// Axum's `Extension` extractor.
///
/// # Rejection behavior
///
/// Every failure (missing header, malformed header, bad signature, expired
/// token, missing subject) produces the *same* externally visible response:
/// `401 Unauthorized` with a fixed body. Distinguishing them would hand an
/// attacker an oracle over the verification logic. The specific reason code
/// is kept in the structured logs instead.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use notevault_shared::auth::middleware::{require_bearer, AuthContext};
/// use notevault_shared::auth::token::{TokenConfig, TokenVerifier};
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     auth.subject
/// }
///
/// let config = TokenConfig::new("shared-secret", chrono::Duration::minutes(30));
/// let verifier = TokenVerifier::new(config);
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(middleware::from_fn(require_bearer(verifier)));
/// ```
use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::token::{TokenError, TokenVerifier};

/// Authentication context added to request extensions after a successful
/// bearer check
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The `sub` claim of the verified token, the caller's identity for
    /// downstream authorization (e.g. filtering owned resources)
    pub subject: String,
}

/// Error type for the bearer trust boundary
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header on the request
    #[error("missing authorization header")]
    MissingHeader,

    /// Header present but not a two-token "scheme value" structure, or the
    /// value segment is empty
    #[error("malformed authorization header")]
    MalformedHeader,

    /// The token itself failed verification
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthError {
    /// Stable reason code for structured logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "missing_auth_header",
            AuthError::MalformedHeader => "malformed_auth_header",
            AuthError::Token(e) => e.reason_code(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // One generic rejection for every failure mode; the reason stays in
        // the logs.
        tracing::debug!(reason = self.reason_code(), "rejected bearer credential");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized", "message": "Unauthorized" })),
        )
            .into_response()
    }
}

/// Authenticates a request from its headers alone
///
/// This is the whole trust decision: a pure, stateless function of
/// (headers, verifier secret/algorithm, current time). No database or
/// network lookup happens here.
///
/// The header value is split on the first space and the second segment is
/// taken as the token. The scheme segment is conventionally `Bearer` but is
/// not checked, matching what interoperating clients actually send.
///
/// # Returns
///
/// The verified `sub` claim value.
pub fn authenticate(headers: &HeaderMap, verifier: &TokenVerifier) -> Result<String, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingHeader)?;

    let (_scheme, token) = value.split_once(' ').ok_or(AuthError::MalformedHeader)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    let claims = verifier.verify(token)?;
    Ok(claims.sub)
}

/// Bearer authentication middleware
///
/// On success, inserts [`AuthContext`] into request extensions and passes
/// the request on. On failure, short-circuits with the generic 401.
pub async fn bearer_auth(
    verifier: TokenVerifier,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let subject = authenticate(req.headers(), &verifier)?;

    req.extensions_mut().insert(AuthContext { subject });

    Ok(next.run(req).await)
}

/// Creates a bearer authentication middleware closure
///
/// Captures the verifier so the layer can be built once at router
/// construction time.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use notevault_shared::auth::middleware::require_bearer;
/// use notevault_shared::auth::token::{TokenConfig, TokenVerifier};
///
/// let verifier = TokenVerifier::new(TokenConfig::new("secret", chrono::Duration::minutes(30)));
/// let app: Router = Router::new()
///     .route("/notes", get(|| async { "OK" }))
///     .layer(middleware::from_fn(require_bearer(verifier)));
/// ```
pub fn require_bearer(
    verifier: TokenVerifier,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    move |req, next| {
        let verifier = verifier.clone();
        Box::pin(bearer_auth(verifier, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{TokenConfig, TokenIssuer};
    use axum::http::HeaderValue;
    use chrono::Duration;
    use serde_json::Map;

    fn test_config() -> TokenConfig {
        TokenConfig::new(
            "test-secret-key-at-least-32-bytes-long",
            Duration::minutes(30),
        )
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_authenticate_roundtrip() {
        let config = test_config();
        let token = TokenIssuer::new(config.clone())
            .issue("bob", Map::new(), None)
            .unwrap();
        let verifier = TokenVerifier::new(config);

        let subject = authenticate(&headers_with(&format!("Bearer {}", token)), &verifier)
            .expect("should authenticate");
        assert_eq!(subject, "bob");
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let verifier = TokenVerifier::new(test_config());

        let err = authenticate(&HeaderMap::new(), &verifier).expect_err("should reject");
        assert!(matches!(err, AuthError::MissingHeader));
        assert_eq!(err.reason_code(), "missing_auth_header");
    }

    #[test]
    fn test_scheme_without_value_is_rejected() {
        let verifier = TokenVerifier::new(test_config());

        for value in ["Bearer", "Bearer ", ""] {
            let err =
                authenticate(&headers_with(value), &verifier).expect_err("should reject");
            assert!(
                matches!(err, AuthError::MalformedHeader),
                "{:?} should be malformed, got {:?}",
                value,
                err
            );
        }
    }

    #[test]
    fn test_scheme_string_is_not_checked() {
        // The core only splits on the first space; the scheme is opaque.
        let config = test_config();
        let token = TokenIssuer::new(config.clone())
            .issue("bob", Map::new(), None)
            .unwrap();
        let verifier = TokenVerifier::new(config);

        let subject = authenticate(&headers_with(&format!("Token {}", token)), &verifier)
            .expect("should authenticate");
        assert_eq!(subject, "bob");
    }

    #[test]
    fn test_token_errors_pass_through_with_their_reason() {
        let config = test_config();
        let expired = TokenIssuer::new(config.clone())
            .issue("bob", Map::new(), Some(Duration::seconds(-1)))
            .unwrap();
        let verifier = TokenVerifier::new(config);

        let err = authenticate(&headers_with(&format!("Bearer {}", expired)), &verifier)
            .expect_err("should reject");
        assert_eq!(err.reason_code(), "expired_token");
    }

    #[test]
    fn test_every_failure_renders_the_same_generic_401() {
        let responses = [
            AuthError::MissingHeader.into_response(),
            AuthError::MalformedHeader.into_response(),
            AuthError::Token(TokenError::Expired).into_response(),
            AuthError::Token(TokenError::BadSignature).into_response(),
            AuthError::Token(TokenError::MissingSubject).into_response(),
        ];

        for response in responses {
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
