/// Access token issuance and verification (HS256)
///
/// Tokens are compact three-part JWS strings (`header.payload.signature`,
/// base64url segments joined by `.`), signed with a 256-bit symmetric HMAC
/// over the shared secret. Any standards-compliant JWT library on either
/// side of the trust boundary can produce or check them.
///
/// The issuer and verifier are constructed from the same immutable
/// [`TokenConfig`]; there is no ambient global. Both services load the
/// config once at process start, and the secret/algorithm pair must match
/// byte-for-byte between them or every verification fails.
///
/// # Claims
///
/// The payload is a typed [`Claims`] struct: a required subject (`sub`, the
/// username) and expiry instant (`exp`, Unix seconds), plus a flattened
/// extension map for any optional claims a caller wants to carry. The
/// signature is a deterministic function of the claims, the algorithm, and
/// the secret, so mutating any claim invalidates the token.
///
/// # Example
///
/// ```
/// use notevault_shared::auth::token::{TokenConfig, TokenIssuer, TokenVerifier};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TokenConfig::new("shared-secret-at-least-32-bytes!", chrono::Duration::minutes(30));
///
/// let issuer = TokenIssuer::new(config.clone());
/// let token = issuer.issue("alice", Default::default(), None)?;
///
/// let verifier = TokenVerifier::new(config);
/// let claims = verifier.verify(&token)?;
/// assert_eq!(claims.sub, "alice");
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Error type for token operations
///
/// Verification failures carry a machine-readable reason code for internal
/// logging; the HTTP boundary collapses all of them into one generic
/// rejection (see [`crate::auth::middleware`]).
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to sign a token. With a well-formed claim set and a valid
    /// secret this cannot happen; a misconfigured secret is a startup-time
    /// fatal, not a per-request condition.
    #[error("failed to sign token: {0}")]
    Signing(String),

    /// Token is syntactically valid but `exp` is in the past
    #[error("token has expired")]
    Expired,

    /// Signature does not verify against the configured secret/algorithm
    #[error("token signature does not verify")]
    BadSignature,

    /// Token is not a decodable three-part signed string
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signature and expiry are valid but the `sub` claim is absent or empty
    #[error("token has no usable subject claim")]
    MissingSubject,
}

impl TokenError {
    /// Stable reason code for structured logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            TokenError::Signing(_) => "signing_failure",
            TokenError::Expired => "expired_token",
            TokenError::BadSignature => "bad_signature",
            TokenError::Malformed(_) => "malformed_token",
            TokenError::MissingSubject => "missing_subject",
        }
    }
}

/// Immutable trust configuration shared by issuer and verifier
///
/// The algorithm is fixed to HS256; making it configurable would reintroduce
/// the cross-service agreement problem this struct exists to pin down.
/// Constructed once at process start (see [`crate::config`]) and injected
/// into [`TokenIssuer`]/[`TokenVerifier`], which makes it trivial to build
/// isolated issuer/verifier pairs with distinct secrets in tests.
#[derive(Clone)]
pub struct TokenConfig {
    /// Signing secret, identical across both services by deployment
    /// convention. Should be at least 32 bytes in production.
    pub secret: String,

    /// Expiry applied when `issue` is called without an explicit ttl
    pub default_ttl: Duration,
}

impl TokenConfig {
    /// Creates a config from a secret and a default time-to-live
    pub fn new(secret: impl Into<String>, default_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            default_ttl,
        }
    }
}

// Manual Debug: the secret must never end up in logs.
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Token claim set
///
/// `sub` and `exp` are required; everything else rides in the flattened
/// extension map. `sub` defaults to the empty string on deserialization so
/// that a token *without* a subject decodes cleanly and is then rejected
/// with the distinct [`TokenError::MissingSubject`] reason rather than a
/// generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated username
    #[serde(default)]
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Optional opaque claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Issues signed, time-bounded access tokens
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: TokenConfig,
}

impl TokenIssuer {
    /// Creates an issuer from the shared trust configuration
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Issues a token for `sub`, expiring `ttl` from now
    ///
    /// A pure computation: no I/O, nothing stored. The current time is read
    /// exactly once per issuance so every derived claim reflects the same
    /// instant. `ttl` defaults to the configured ttl; any `sub` or `exp`
    /// entries in the caller's extension map are discarded in favor of the
    /// values computed here.
    ///
    /// # Errors
    ///
    /// [`TokenError::Signing`], effectively unreachable with a valid
    /// configuration.
    pub fn issue(
        &self,
        sub: &str,
        mut extra: Map<String, Value>,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        // Single timestamp per issuance
        let now = Utc::now();

        extra.remove("sub");
        extra.remove("exp");

        let claims = Claims {
            sub: sub.to_owned(),
            exp: (now + ttl).timestamp(),
            extra,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Verifies signed access tokens
///
/// Verification is pure and stateless: the trust decision is a function of
/// (token, secret, algorithm, current wall-clock UTC time). No database or
/// network lookup is performed, so it is safe under arbitrary concurrency.
///
/// Expiry is strict. The underlying library defaults to a 60-second leeway,
/// which is explicitly disabled here: a token one second past `exp` is
/// rejected. Issuer and verifier clocks are expected to be kept close.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    config: TokenConfig,
}

impl TokenVerifier {
    /// Creates a verifier from the shared trust configuration
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }

    /// Verifies a token string and extracts its claims
    ///
    /// Checks, in order: decodability, signature, expiry, subject presence.
    /// Each failure is a distinct [`TokenError`] so logs can tell them
    /// apart, even though the HTTP boundary reports them identically.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No grace window: expiry is checked against wall-clock UTC exactly.
        validation.leeway = 0;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        Ok(data.claims)
    }
}
