use chrono::Utc;
use jsonwebtoken::{
    decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::Provider,
    services::oauth2::{google::local_part, OAuth2Tokens, OAuth2UserInfo},
};

const AUTHORIZE_URL: &str = "https://appleid.apple.com/auth/authorize";
const TOKEN_URL: &str = "https://appleid.apple.com/auth/token";
const REVOKE_URL: &str = "https://appleid.apple.com/auth/revoke";
const JWKS_URL: &str = "https://appleid.apple.com/auth/keys";
const ISSUER: &str = "https://appleid.apple.com";

const CLIENT_SECRET_TTL_SECS: i64 = 600;

/// Claims of the ES256 client assertion Apple requires in place of a static
/// client secret.
#[derive(Debug, Serialize)]
struct ClientSecretClaims<'a> {
    iss: &'a str,
    iat: i64,
    exp: i64,
    aud: &'a str,
    sub: &'a str,
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    email: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

pub struct AppleOAuth2Client {
    http: reqwest::Client,
    client_id: String,
    team_id: String,
    key_id: String,
    private_key: SecretString,
}

impl AppleOAuth2Client {
    pub fn new(client_id: &str, team_id: &str, key_id: &str, private_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.to_string(),
            team_id: team_id.to_string(),
            key_id: key_id.to_string(),
            private_key,
        }
    }

    pub fn authorize_url(&self, redirect_uri: &str) -> AppResult<String> {
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", "name email"),
                ("response_mode", "form_post"),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Failed to build authorize URL: {}", e)))?;
        Ok(url.into())
    }

    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<OAuth2Tokens> {
        let client_secret = self.client_secret()?;
        let tokens = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<OAuth2Tokens>()
            .await?;
        Ok(tokens)
    }

    /// Apple has no user-info endpoint; identity comes from the id_token,
    /// verified against Apple's published JWKS.
    pub async fn user_info_from_id_token(&self, id_token: &str) -> AppResult<OAuth2UserInfo> {
        let header = decode_header(id_token).map_err(|_| AppError::InvalidToken)?;
        let kid = header.kid.ok_or(AppError::InvalidToken)?;

        let jwks = self
            .http
            .get(JWKS_URL)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        let jwk = jwks
            .keys
            .into_iter()
            .find(|key| key.kid == kid)
            .ok_or(AppError::InvalidToken)?;

        let decoding_key =
            DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|_| AppError::InvalidToken)?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&[ISSUER]);

        let claims = decode::<IdTokenClaims>(id_token, &decoding_key, &validation)
            .map_err(|_| AppError::InvalidToken)?
            .claims;

        Ok(OAuth2UserInfo {
            name: local_part(&claims.email).to_string(),
            email: claims.email,
            provider: Provider::Apple,
        })
    }

    pub async fn revoke(&self, access_token: &str) -> AppResult<()> {
        let client_secret = self.client_secret()?;
        self.http
            .post(REVOKE_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("token", access_token),
                ("token_type_hint", "access_token"),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    fn client_secret(&self) -> AppResult<String> {
        let encoding_key = EncodingKey::from_ec_pem(self.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                AppError::InternalError(format!("Invalid Apple signing key: {}", e))
            })?;

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());

        let now = Utc::now().timestamp();
        let claims = ClientSecretClaims {
            iss: &self.team_id,
            iat: now,
            exp: now + CLIENT_SECRET_TTL_SECS,
            aud: ISSUER,
            sub: &self.client_id,
        };

        encode(&header, &claims, &encoding_key).map_err(|e| {
            AppError::InternalError(format!("Failed to sign Apple client secret: {}", e))
        })
    }
}
