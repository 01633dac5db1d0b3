use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::{Claims, JwtAuthentication},
    errors::{AppError, AppResult},
};

/// Issues and validates the HS256-signed session tokens. Access and refresh
/// tokens share the claim shape and differ only in lifetime.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_expire_hours: i64,
    refresh_expire_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, access_expire_hours: i64, refresh_expire_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation: Validation::default(),
            access_expire_hours,
            refresh_expire_hours,
        }
    }

    pub fn create_access_token(&self, authentication: &JwtAuthentication) -> AppResult<String> {
        self.create_token(authentication, self.access_expire_hours)
    }

    pub fn create_refresh_token(&self, authentication: &JwtAuthentication) -> AppResult<String> {
        self.create_token(authentication, self.refresh_expire_hours)
    }

    /// Verifies signature, structure and expiry; any failure is an
    /// `InvalidToken` as far as callers are concerned.
    pub fn parse(&self, token: &str) -> AppResult<JwtAuthentication> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.to_authentication())
            .map_err(|_| AppError::InvalidToken)
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.parse(token).is_ok()
    }

    pub fn refresh_expire_hours(&self) -> i64 {
        self.refresh_expire_hours
    }

    fn create_token(
        &self,
        authentication: &JwtAuthentication,
        expire_hours: i64,
    ) -> AppResult<String> {
        let claims = Claims::new(authentication, expire_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn jwt_service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, 1, 168)
    }

    fn user_authentication() -> JwtAuthentication {
        JwtAuthentication::new("user-1", vec!["USER".to_string()])
    }

    #[test]
    fn test_create_and_parse_access_token() {
        let service = jwt_service();

        let token = service.create_access_token(&user_authentication()).unwrap();
        assert!(!token.is_empty());

        let parsed = service.parse(&token).unwrap();
        assert_eq!(parsed.id, "user-1");
        assert_eq!(parsed.authorities, vec!["USER".to_string()]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let service = jwt_service();

        let result = service.parse("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
        assert!(!service.is_valid("invalid.token.here"));
    }

    #[test]
    fn test_parse_rejects_wrong_key() {
        let service = jwt_service();
        let other = JwtService::new(
            &SecretString::from("another_secret_key_entirely".to_string()),
            1,
            168,
        );

        let token = service.create_access_token(&user_authentication()).unwrap();
        assert!(other.parse(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = Config::test_config();
        // Negative lifetime puts the expiry an hour in the past, beyond the
        // default validation leeway.
        let service = JwtService::new(&config.jwt_secret, -1, -1);

        let token = service.create_access_token(&user_authentication()).unwrap();
        assert!(!jwt_service().is_valid(&token));
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let service = jwt_service();
        let admin = JwtAuthentication::new("admin-1", vec!["ADMIN".to_string()]);

        let token = service.create_refresh_token(&admin).unwrap();
        let parsed = service.parse(&token).unwrap();

        assert_eq!(parsed.id, "admin-1");
        assert!(parsed.is_admin());
    }
}
