use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::{
    auth::{JwtAuthentication, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::{hash_token, RefreshToken, User},
        dto::response::RefreshResponse,
    },
    repositories::{TokenRepository, UserRepository},
    services::oauth2::OAuth2UserInfo,
};

const DEFAULT_DAILY_TARGET: i32 = 5;

const DEFAULT_AVATARS: [&str; 6] = [
    "https://quizit-storage.s3.ap-northeast-2.amazonaws.com/character1.svg",
    "https://quizit-storage.s3.ap-northeast-2.amazonaws.com/character2.svg",
    "https://quizit-storage.s3.ap-northeast-2.amazonaws.com/character3.svg",
    "https://quizit-storage.s3.ap-northeast-2.amazonaws.com/character4.svg",
    "https://quizit-storage.s3.ap-northeast-2.amazonaws.com/character5.svg",
    "https://quizit-storage.s3.ap-northeast-2.amazonaws.com/character6.svg",
];

/// Outcome of an OAuth2 login: fresh tokens plus whether the account was
/// created on this login.
pub struct LoginResult {
    pub is_sign_up: bool,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthenticationService {
    user_repository: Arc<dyn UserRepository>,
    token_repository: Arc<dyn TokenRepository>,
    jwt_service: Arc<JwtService>,
}

impl AuthenticationService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_repository: Arc<dyn TokenRepository>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            jwt_service,
        }
    }

    /// Drops the stored refresh token. Logging out twice is fine.
    pub async fn logout(&self, user_id: &str) -> AppResult<()> {
        self.token_repository.delete_by_user_id(user_id).await
    }

    /// Rotates the refresh token. A presented token that parses but does
    /// not match the stored hash means the stored one was already rotated
    /// away (reuse of an old token), so the session is killed outright.
    pub async fn refresh(&self, presented: &str) -> AppResult<(RefreshResponse, String)> {
        let authentication = self.jwt_service.parse(presented)?;

        let stored = self
            .token_repository
            .find_by_user_id(&authentication.id)
            .await?
            .ok_or(AppError::TokenNotFound)?;

        if stored.is_expired() {
            self.token_repository
                .delete_by_user_id(&authentication.id)
                .await?;
            return Err(AppError::TokenNotFound);
        }

        if stored.token_hash != hash_token(presented) {
            self.token_repository
                .delete_by_user_id(&authentication.id)
                .await?;
            return Err(AppError::InvalidAccess);
        }

        let (access_token, refresh_token) = self.issue_tokens(&authentication).await?;

        Ok((RefreshResponse { access_token }, refresh_token))
    }

    /// OAuth2 success path: look the account up by (email, provider) and
    /// create it with defaults on first login.
    pub async fn login(&self, user_info: OAuth2UserInfo) -> AppResult<LoginResult> {
        let existing = self
            .user_repository
            .find_by_email_and_provider(&user_info.email, user_info.provider)
            .await?;
        let is_sign_up = existing.is_none();

        let user = match existing {
            Some(user) => user,
            None => {
                let image = DEFAULT_AVATARS
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(DEFAULT_AVATARS[0]);
                let user = User::new(
                    &user_info.email,
                    &user_info.name,
                    image,
                    true,
                    DEFAULT_DAILY_TARGET,
                    user_info.provider,
                );
                self.user_repository.save(user).await?
            }
        };

        let authentication =
            JwtAuthentication::new(&user.id, vec![user.role.authority().to_string()]);
        let (access_token, refresh_token) = self.issue_tokens(&authentication).await?;

        Ok(LoginResult {
            is_sign_up,
            access_token,
            refresh_token,
        })
    }

    async fn issue_tokens(
        &self,
        authentication: &JwtAuthentication,
    ) -> AppResult<(String, String)> {
        let access_token = self.jwt_service.create_access_token(authentication)?;
        let refresh_token = self.jwt_service.create_refresh_token(authentication)?;

        let expires_at =
            chrono::Utc::now() + chrono::Duration::hours(self.jwt_service.refresh_expire_hours());
        let record = RefreshToken::new(&authentication.id, &hash_token(&refresh_token), expires_at);
        self.token_repository.save(record).await?;

        Ok((access_token, refresh_token))
    }
}
