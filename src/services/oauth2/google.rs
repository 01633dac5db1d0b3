use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Provider,
    services::oauth2::{OAuth2Tokens, OAuth2UserInfo},
};

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USER_INFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const REVOKE_URL: &str = "https://oauth2.googleapis.com/revoke";

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    email: String,
    #[serde(default)]
    name: Option<String>,
}

pub struct GoogleOAuth2Client {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
}

impl GoogleOAuth2Client {
    pub fn new(client_id: &str, client_secret: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: client_id.to_string(),
            client_secret,
        }
    }

    pub fn authorize_url(&self, redirect_uri: &str) -> AppResult<String> {
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Failed to build authorize URL: {}", e)))?;
        Ok(url.into())
    }

    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<OAuth2Tokens> {
        let tokens = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
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

    pub async fn fetch_user_info(&self, access_token: &str) -> AppResult<OAuth2UserInfo> {
        let info = self
            .http
            .get(USER_INFO_URL)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleUserInfo>()
            .await?;

        let name = info
            .name
            .unwrap_or_else(|| local_part(&info.email).to_string());

        Ok(OAuth2UserInfo {
            email: info.email,
            name,
            provider: Provider::Google,
        })
    }

    pub async fn revoke(&self, access_token: &str) -> AppResult<()> {
        self.http
            .post(REVOKE_URL)
            .form(&[("token", access_token)])
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

pub(crate) fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
