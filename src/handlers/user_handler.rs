use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::Provider,
        dto::request::{CreateUserRequest, UpdateUserByIdRequest},
    },
};

#[derive(Debug, Deserialize)]
pub struct EmailLookupParams {
    pub provider: Option<Provider>,
}

#[get("/user/ranking")]
async fn get_ranking(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let ranking = state.user_service.get_ranking().await?;
    Ok(HttpResponse::Ok().json(ranking))
}

#[get("/user/ranking/course/{id}")]
async fn get_ranking_by_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ranking = state.user_service.get_ranking_by_course_id(&id).await?;
    Ok(HttpResponse::Ok().json(ranking))
}

#[get("/user/authentication")]
async fn get_authenticated_user(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user_by_authentication(&auth.0).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/user/email/{email}")]
async fn get_user_by_email(
    state: web::Data<AppState>,
    email: web::Path<String>,
    params: web::Query<EmailLookupParams>,
) -> Result<HttpResponse, AppError> {
    let user = match params.provider {
        Some(provider) => {
            state
                .user_service
                .get_user_by_email_and_provider(&email, provider)
                .await?
        }
        None => state.user_service.get_user_by_email(&email).await?,
    };
    Ok(HttpResponse::Ok().json(user))
}

#[get("/user/{id}")]
async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_user_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[post("/user")]
async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user = state.user_service.create_user(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/user/{id}")]
async fn update_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateUserByIdRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let user = state
        .user_service
        .update_user_by_id(&id, &auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

#[delete("/user/{id}")]
async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.user_service.delete_user_by_id(&id, &auth.0).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments must be registered ahead of `/user/{id}`.
    cfg.service(get_ranking)
        .service(get_ranking_by_course)
        .service(get_authenticated_user)
        .service(get_user_by_email)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .service(get_user);
}
