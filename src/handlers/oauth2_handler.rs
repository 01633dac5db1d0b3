use actix_web::{get, http::header::LOCATION, post, route, web, HttpResponse};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    errors::AppError,
    handlers::auth_handler::refresh_cookie,
    models::domain::Provider,
    services::{oauth2::OAuth2UserInfo, LoginResult},
};

#[derive(Debug, Deserialize)]
pub struct CodeParams {
    pub code: Option<String>,
}

/// Apple posts the callback as a form; on the very first authorization it
/// also includes a `user` JSON blob carrying the name.
#[derive(Debug, Deserialize)]
pub struct AppleCallbackForm {
    pub code: String,
    pub user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppleUserField {
    name: Option<AppleName>,
}

#[derive(Debug, Deserialize)]
struct AppleName {
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
}

fn login_redirect_uri(state: &AppState, provider: Provider) -> String {
    format!(
        "{}/login/oauth2/code/{}",
        state.config.backend_uri,
        provider.as_str().to_lowercase()
    )
}

fn revoke_redirect_uri(state: &AppState, provider: Provider) -> String {
    format!(
        "{}/oauth2/redirect/{}/revoke",
        state.config.backend_uri,
        provider.as_str().to_lowercase()
    )
}

/// Finishes a login: issue tokens, then bounce the browser to the frontend
/// with the access token in the query string and the refresh token as a
/// cookie.
async fn complete_login(
    state: &AppState,
    user_info: OAuth2UserInfo,
) -> Result<HttpResponse, AppError> {
    let LoginResult {
        is_sign_up,
        access_token,
        refresh_token,
    } = state.auth_service.login(user_info).await?;

    let location = format!(
        "{}/login-redirection?isSignUp={}&accessToken={}",
        state.config.frontend_uri, is_sign_up, access_token
    );
    let cookie = refresh_cookie(refresh_token, state.config.refresh_token_expire_hours);

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, location))
        .cookie(cookie)
        .finish())
}

#[get("/login/oauth2/code/google")]
async fn google_login_callback(
    state: web::Data<AppState>,
    params: web::Query<CodeParams>,
) -> Result<HttpResponse, AppError> {
    let code = params
        .into_inner()
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let redirect_uri = login_redirect_uri(&state, Provider::Google);
    let tokens = state.oauth2.google.exchange_code(&code, &redirect_uri).await?;
    let user_info = state.oauth2.google.fetch_user_info(&tokens.access_token).await?;

    complete_login(&state, user_info).await
}

#[get("/login/oauth2/code/kakao")]
async fn kakao_login_callback(
    state: web::Data<AppState>,
    params: web::Query<CodeParams>,
) -> Result<HttpResponse, AppError> {
    let code = params
        .into_inner()
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let redirect_uri = login_redirect_uri(&state, Provider::Kakao);
    let tokens = state.oauth2.kakao.exchange_code(&code, &redirect_uri).await?;
    let user_info = state.oauth2.kakao.fetch_user_info(&tokens.access_token).await?;

    complete_login(&state, user_info).await
}

#[post("/login/oauth2/code/apple")]
async fn apple_login_callback(
    state: web::Data<AppState>,
    form: web::Form<AppleCallbackForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    let redirect_uri = login_redirect_uri(&state, Provider::Apple);
    let tokens = state.oauth2.apple.exchange_code(&form.code, &redirect_uri).await?;
    let id_token = tokens.id_token.ok_or(AppError::InvalidToken)?;
    let mut user_info = state.oauth2.apple.user_info_from_id_token(&id_token).await?;

    if let Some(name) = form.user.as_deref().and_then(parse_apple_name) {
        user_info.name = name;
    }

    complete_login(&state, user_info).await
}

/// Entry point for account revocation: send the browser back to the
/// provider's consent screen so we obtain a fresh code to revoke with.
#[get("/oauth2/revoke/{provider}")]
async fn revoke_entry(
    state: web::Data<AppState>,
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = Provider::parse(&provider)
        .ok_or_else(|| AppError::BadRequest(format!("unknown provider: {}", provider)))?;

    let redirect_uri = revoke_redirect_uri(&state, provider);
    let location = match provider {
        Provider::Google => state.oauth2.google.authorize_url(&redirect_uri)?,
        Provider::Kakao => state.oauth2.kakao.authorize_url(&redirect_uri)?,
        Provider::Apple => state.oauth2.apple.authorize_url(&redirect_uri)?,
    };

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish())
}

/// Consent callback for revocation: revoke at the provider, delete the
/// account here, then hand the browser back to the frontend.
#[route("/oauth2/redirect/{provider}/revoke", method = "GET", method = "POST")]
async fn revoke_callback(
    state: web::Data<AppState>,
    provider: web::Path<String>,
    params: web::Query<CodeParams>,
    form: Option<web::Form<CodeParams>>,
) -> Result<HttpResponse, AppError> {
    let provider = Provider::parse(&provider)
        .ok_or_else(|| AppError::BadRequest(format!("unknown provider: {}", provider)))?;

    let code = form
        .and_then(|f| f.into_inner().code)
        .or_else(|| params.into_inner().code)
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    let redirect_uri = revoke_redirect_uri(&state, provider);
    let user_info = match provider {
        Provider::Google => {
            let tokens = state.oauth2.google.exchange_code(&code, &redirect_uri).await?;
            let info = state.oauth2.google.fetch_user_info(&tokens.access_token).await?;
            state.oauth2.google.revoke(&tokens.access_token).await?;
            info
        }
        Provider::Kakao => {
            let tokens = state.oauth2.kakao.exchange_code(&code, &redirect_uri).await?;
            let info = state.oauth2.kakao.fetch_user_info(&tokens.access_token).await?;
            state.oauth2.kakao.revoke(&tokens.access_token).await?;
            info
        }
        Provider::Apple => {
            let tokens = state.oauth2.apple.exchange_code(&code, &redirect_uri).await?;
            let id_token = tokens.id_token.ok_or(AppError::InvalidToken)?;
            let info = state.oauth2.apple.user_info_from_id_token(&id_token).await?;
            state.oauth2.apple.revoke(&tokens.access_token).await?;
            info
        }
    };

    state
        .user_service
        .delete_user_by_email_and_provider(&user_info.email, provider)
        .await?;

    Ok(HttpResponse::Found()
        .insert_header((LOCATION, state.config.frontend_uri.clone()))
        .finish())
}

fn parse_apple_name(user: &str) -> Option<String> {
    let field: AppleUserField = serde_json::from_str(user).ok()?;
    let name = field.name?;
    let full = [name.first_name, name.last_name]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    (!full.is_empty()).then_some(full)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(google_login_callback)
        .service(kakao_login_callback)
        .service(apple_login_callback)
        .service(revoke_entry)
        .service(revoke_callback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_apple_name() {
        let user = r#"{"name":{"firstName":"Jane","lastName":"Doe"},"email":"j@example.com"}"#;
        assert_eq!(parse_apple_name(user).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_parse_apple_name_partial() {
        let user = r#"{"name":{"firstName":"Jane"}}"#;
        assert_eq!(parse_apple_name(user).as_deref(), Some("Jane"));
    }

    #[test]
    fn test_parse_apple_name_absent() {
        assert!(parse_apple_name(r#"{}"#).is_none());
        assert!(parse_apple_name("not json").is_none());
    }
}
