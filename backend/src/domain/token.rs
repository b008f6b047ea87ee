//! Bearer-token issuance and verification.
//!
//! Tokens are HS256-signed with a static secret, carry the username and mode,
//! and expire after one hour. There is no refresh or revocation.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::user::Mode;

/// Token validity window in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims embedded in issued tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user.
    pub sub: String,
    /// Raw mode flag at issuance time.
    pub mode: u8,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// Issues and verifies signed bearer credentials.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Build a service around a shared static secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a one-hour credential for `username` with the given mode.
    pub fn issue(&self, username: &str, mode: Mode) -> Result<String, Error> {
        let exp = chrono::Utc::now().timestamp() + TOKEN_TTL_SECS;
        self.encode(Claims {
            sub: username.to_owned(),
            mode: mode.as_u8(),
            exp,
        })
    }

    /// Verify a presented credential, returning its claims.
    ///
    /// Fails with a forbidden error on bad signatures, tampering, or expiry;
    /// the caller distinguishes the missing-credential case itself.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| Error::forbidden("Invalid token"))
    }

    fn encode(&self, claims: Claims) -> Result<String, Error> {
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|error| Error::internal(format!("failed to sign token: {error}")))
    }

    #[cfg(test)]
    pub(crate) fn issue_expired(&self, username: &str, mode: Mode) -> Result<String, Error> {
        // Two hours in the past clears the default verification leeway.
        let exp = chrono::Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        self.encode(Claims {
            sub: username.to_owned(),
            mode: mode.as_u8(),
            exp,
        })
    }
}
