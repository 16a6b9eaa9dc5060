//! JWT session token utilities.
//!
//! Issues and validates the signed, self-contained tokens carried in the
//! session cookie. Every token expires exactly [`SESSION_LIFETIME_SECONDS`]
//! after issuance; the server keeps no record of issued tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::errors::{ServiceError, ServiceResult};

/// Session lifetime: 24 hours.
pub const SESSION_LIFETIME_SECONDS: i64 = 24 * 60 * 60;

/// Value of the custom `kind` claim on session tokens.
const SESSION_KIND: &str = "session";

/// JWT Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: i64,
    /// Username at the time of issuance
    pub username: String,
    /// Token kind, always `"session"`
    pub kind: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> i64 {
        self.sub
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// True once `now` has reached the expiry timestamp.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// JWT token utility for creating and validating session tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtUtils {
    /// Builds the codec from the process signing secret.
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        // Expiry is checked against an explicit clock in `validate_token_at`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generate a session token for a user, valid for 24 hours from now.
    pub fn generate_token(&self, user_id: i64, username: &str) -> ServiceResult<String> {
        self.generate_token_at(user_id, username, Utc::now())
    }

    /// Generate a session token as if issued at `now`.
    pub fn generate_token_at(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let exp = now + Duration::seconds(SESSION_LIFETIME_SECONDS);

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            kind: SESSION_KIND.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a session token against the current time.
    ///
    /// Malformed, forged and expired tokens all yield `None`.
    pub fn validate_token(&self, token: &str) -> Option<Claims> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate and decode a session token against the given time.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Option<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .ok()?;

        if claims.kind != SESSION_KIND || claims.is_expired_at(now) {
            return None;
        }

        Some(claims)
    }
}
