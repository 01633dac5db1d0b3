use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Provider,
    services::oauth2::{google::local_part, OAuth2Tokens, OAuth2UserInfo},
};

const AUTHORIZE_URL: &str = "https://kauth.kakao.com/oauth/authorize";
const TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
const USER_INFO_URL: &str = "https://kapi.kakao.com/v2/user/me";
const UNLINK_URL: &str = "https://kapi.kakao.com/v1/user/unlink";

// Kakao nests the identity attributes two levels deep.
#[derive(Debug, Deserialize)]
struct KakaoUserInfo {
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
    #[serde(default)]
    properties: Option<KakaoProperties>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoProperties {
    #[serde(default)]
    nickname: Option<String>,
}

pub struct KakaoOAuth2Client {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
}

impl KakaoOAuth2Client {
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
            .json::<KakaoUserInfo>()
            .await?;

        let email = info
            .kakao_account
            .and_then(|account| account.email)
            .ok_or_else(|| {
                AppError::Unauthorized("Kakao account did not share an email".to_string())
            })?;
        let name = info
            .properties
            .and_then(|properties| properties.nickname)
            .unwrap_or_else(|| local_part(&email).to_string());

        Ok(OAuth2UserInfo {
            email,
            name,
            provider: Provider::Kakao,
        })
    }

    /// Kakao calls revocation "unlink"; it severs the app connection for
    /// the account behind the access token.
    pub async fn revoke(&self, access_token: &str) -> AppResult<()> {
        self.http
            .post(UNLINK_URL)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
