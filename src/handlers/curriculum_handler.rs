use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{AdminUser, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateCurriculumRequest, UpdateCurriculumByIdRequest},
};

#[get("/curriculum")]
async fn get_curriculums(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let curricula = state.curriculum_service.get_curriculums().await?;
    Ok(HttpResponse::Ok().json(curricula))
}

#[get("/curriculum/{id}")]
async fn get_curriculum(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let curriculum = state.curriculum_service.get_curriculum_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(curriculum))
}

#[get("/curriculum/{id}/progress")]
async fn get_progress(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progress = state
        .curriculum_service
        .get_progress_by_id(&id, &auth.0.id)
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}

#[post("/admin/curriculum")]
async fn create_curriculum(
    state: web::Data<AppState>,
    request: web::Json<CreateCurriculumRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let curriculum = state
        .curriculum_service
        .create_curriculum(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(curriculum))
}

#[put("/admin/curriculum/{id}")]
async fn update_curriculum(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCurriculumByIdRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let curriculum = state
        .curriculum_service
        .update_curriculum_by_id(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(curriculum))
}

#[delete("/admin/curriculum/{id}")]
async fn delete_curriculum(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.curriculum_service.delete_curriculum_by_id(&id).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_curriculums)
        .service(get_progress)
        .service(get_curriculum)
        .service(create_curriculum)
        .service(update_curriculum)
        .service(delete_curriculum);
}
