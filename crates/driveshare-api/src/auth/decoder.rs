//! JWT signature and expiry validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use tracing::debug;

use driveshare_core::config::AuthConfig;
use driveshare_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a bearer token.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
                _ => AppError::unauthorized("Invalid token"),
            }
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use driveshare_core::error::ErrorKind;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            leeway_seconds: 0,
        }
    }

    fn token(secret: &str, sub: Uuid, exp: i64) -> String {
        let claims = Claims {
            sub,
            iat: Utc::now().timestamp(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let user = Uuid::new_v4();
        let decoder = JwtDecoder::new(&config());
        let claims = decoder
            .decode(&token("test-secret", user, Utc::now().timestamp() + 600))
            .unwrap();
        assert_eq!(claims.user_id(), user);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder
            .decode(&token("other", Uuid::new_v4(), Utc::now().timestamp() + 600))
            .unwrap_err();
        assert!(err.is(ErrorKind::Unauthorized));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder
            .decode(&token("test-secret", Uuid::new_v4(), Utc::now().timestamp() - 600))
            .unwrap_err();
        assert!(err.is(ErrorKind::Unauthorized));
        assert_eq!(err.message, "Token has expired");
    }
}
