use std::env;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub access_token_expire_hours: i64,
    pub refresh_token_expire_hours: i64,
    pub frontend_uri: String,
    pub backend_uri: String,
    pub google_client_id: String,
    pub google_client_secret: SecretString,
    pub kakao_client_id: String,
    pub kakao_client_secret: SecretString,
    pub apple_client_id: String,
    pub apple_team_id: String,
    pub apple_key_id: String,
    pub apple_private_key: SecretString,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quizit-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            access_token_expire_hours: env::var("ACCESS_TOKEN_EXPIRE_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(2),
            refresh_token_expire_hours: env::var("REFRESH_TOKEN_EXPIRE_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(168),
            frontend_uri: env::var("FRONTEND_URI")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            backend_uri: env::var("BACKEND_URI")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .unwrap_or_else(|_| "google_client_id".to_string()),
            google_client_secret: SecretString::from(
                env::var("GOOGLE_CLIENT_SECRET")
                    .unwrap_or_else(|_| "google_client_secret".to_string()),
            ),
            kakao_client_id: env::var("KAKAO_CLIENT_ID")
                .unwrap_or_else(|_| "kakao_client_id".to_string()),
            kakao_client_secret: SecretString::from(
                env::var("KAKAO_CLIENT_SECRET")
                    .unwrap_or_else(|_| "kakao_client_secret".to_string()),
            ),
            apple_client_id: env::var("APPLE_CLIENT_ID")
                .unwrap_or_else(|_| "apple_client_id".to_string()),
            apple_team_id: env::var("APPLE_TEAM_ID")
                .unwrap_or_else(|_| "apple_team_id".to_string()),
            apple_key_id: env::var("APPLE_KEY_ID").unwrap_or_else(|_| "apple_key_id".to_string()),
            apple_private_key: SecretString::from(
                env::var("APPLE_PRIVATE_KEY").unwrap_or_else(|_| "".to_string()),
            ),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.google_client_id == "google_client_id" {
            panic!("FATAL: GOOGLE_CLIENT_ID is using default value! Set GOOGLE_CLIENT_ID environment variable.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizit-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            access_token_expire_hours: 1,
            refresh_token_expire_hours: 168,
            frontend_uri: "http://localhost:3000".to_string(),
            backend_uri: "http://localhost:8080".to_string(),
            google_client_id: "id string".to_string(),
            google_client_secret: SecretString::from("secret string".to_string()),
            kakao_client_id: "id string".to_string(),
            kakao_client_secret: SecretString::from("secret string".to_string()),
            apple_client_id: "id string".to_string(),
            apple_team_id: "team id".to_string(),
            apple_key_id: "key id".to_string(),
            apple_private_key: SecretString::from("".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.refresh_token_expire_hours > config.access_token_expire_hours);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "quizit-test");
        assert_eq!(config.access_token_expire_hours, 1);
    }
}
