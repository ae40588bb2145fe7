use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::user::User;

/// Authentication and authorization failures. Each variant is terminal for the
/// current request and maps to a distinct client-visible rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no authentication token provided")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is inactive")]
    AccountInactive,
    #[error("user not found")]
    PrincipalNotFound,
    #[error("admin role required")]
    Forbidden,
}

/// JWT claims carried by every issued token. Validity is entirely a function
/// of signature and expiry; there is no server-side session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub name: String,
    pub email: String,
    pub role_id: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, issued_at: DateTime<Utc>, expiry: Duration) -> Self {
        Self {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + expiry).timestamp(),
        }
    }
}

/// Signs and verifies HS256 tokens. The secret and expiry are injected at
/// construction so verification never reaches into ambient configuration,
/// which keeps the gate testable with arbitrary secrets and clocks.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token with an explicit issuance instant. Split out from
    /// [`TokenService::issue`] so expiry behavior can be exercised without
    /// waiting on the wall clock.
    pub fn issue_at(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(user, issued_at, self.expiry);
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify signature and expiry and return the embedded claims. All decode
    /// failures collapse to [`AuthError::InvalidToken`]; the caller never
    /// learns whether the token was malformed, tampered with, or expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::user::test_user;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 24)
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let user = test_user(7, "Ana", "ana@example.com", 2, "active");
        let token = service().issue(&user).unwrap();
        let claims = service().verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.name, "Ana");
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.role_id, 2);
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = test_user(1, "Ana", "ana@example.com", 1, "active");
        // Issued 48h ago with a 24h expiry: well past the validation leeway
        let issued = Utc::now() - Duration::hours(48);
        let token = service().issue_at(&user, issued).unwrap();
        assert_eq!(service().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let user = test_user(1, "Ana", "ana@example.com", 1, "active");
        let token = service().issue(&user).unwrap();
        let other = TokenService::new("a-different-secret", 24);
        assert_eq!(other.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(service().verify("not-a-jwt"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expiry_is_carried_in_the_envelope() {
        let user = test_user(1, "Ana", "ana@example.com", 1, "active");
        let issued = Utc::now();
        let token = service().issue_at(&user, issued).unwrap();
        let claims = service().verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }
}
