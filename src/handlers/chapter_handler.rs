use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{AdminUser, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateChapterRequest, UpdateChapterByIdRequest},
};

#[get("/chapter/course/{id}")]
async fn get_chapters_by_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let chapters = state.chapter_service.get_chapters_by_course_id(&id).await?;
    Ok(HttpResponse::Ok().json(chapters))
}

#[get("/chapter/{id}")]
async fn get_chapter(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let chapter = state.chapter_service.get_chapter_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(chapter))
}

#[get("/chapter/{id}/progress")]
async fn get_progress(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progress = state
        .chapter_service
        .get_progress_by_id(&id, &auth.0.id)
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}

#[post("/admin/chapter")]
async fn create_chapter(
    state: web::Data<AppState>,
    request: web::Json<CreateChapterRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let chapter = state
        .chapter_service
        .create_chapter(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(chapter))
}

#[put("/admin/chapter/{id}")]
async fn update_chapter(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateChapterByIdRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let chapter = state
        .chapter_service
        .update_chapter_by_id(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(chapter))
}

#[delete("/admin/chapter/{id}")]
async fn delete_chapter(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.chapter_service.delete_chapter_by_id(&id).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_chapters_by_course)
        .service(get_progress)
        .service(get_chapter)
        .service(create_chapter)
        .service(update_chapter)
        .service(delete_chapter);
}
