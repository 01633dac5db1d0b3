use actix_web::{
    cookie::{time::Duration, Cookie, SameSite},
    get, post, web, HttpRequest, HttpResponse,
};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

pub(crate) const REFRESH_COOKIE: &str = "refreshToken";

/// The rotated refresh token always travels as an httpOnly cookie, never in
/// a response body.
pub(crate) fn refresh_cookie(token: String, max_age_hours: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(max_age_hours))
        .finish()
}

#[get("/auth/logout")]
async fn logout(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.auth_service.logout(&auth.0.id).await?;

    let mut expired = Cookie::new(REFRESH_COOKIE, "");
    expired.set_path("/");
    expired.make_removal();
    Ok(HttpResponse::Ok().cookie(expired).finish())
}

#[post("/auth/refresh")]
async fn refresh(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, AppError> {
    let presented = req
        .cookie(REFRESH_COOKIE)
        .ok_or(AppError::InvalidToken)?
        .value()
        .to_string();

    let (response, new_refresh_token) = state.auth_service.refresh(&presented).await?;
    let cookie = refresh_cookie(new_refresh_token, state.config.refresh_token_expire_hours);

    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(logout).service(refresh);
}
