/// Authentication primitives shared by both services
///
/// # Modules
///
/// - [`password`]: SHA-256 pre-hashed Argon2id password hashing
/// - [`token`]: signed access token issuance and verification (HS256)
/// - [`middleware`]: bearer header extraction and the Axum auth layer
///
/// # Trust model
///
/// The auth service and the notes service each construct their half of the
/// token machinery ([`token::TokenIssuer`] and [`token::TokenVerifier`])
/// from an identical [`token::TokenConfig`]. The verifier side makes its
/// entire trust decision from (token, secret, algorithm, current time):
/// no callback to the issuer, no shared database, no session state.
///
/// # Example
///
/// ```
/// use notevault_shared::auth::password::{hash_password, verify_password};
/// use notevault_shared::auth::token::{TokenConfig, TokenIssuer, TokenVerifier};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash));
///
/// // Token round trip
/// let config = TokenConfig::new("a-shared-secret", chrono::Duration::minutes(30));
/// let token = TokenIssuer::new(config.clone()).issue("alice", Default::default(), None)?;
/// let claims = TokenVerifier::new(config).verify(&token)?;
/// assert_eq!(claims.sub, "alice");
/// # Ok(())
/// # }
/// ```
pub mod middleware;
pub mod password;
pub mod token;
