use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{AdminUser, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateCourseRequest, UpdateCourseByIdRequest},
};

#[get("/course/curriculum/{id}")]
async fn get_courses_by_curriculum(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let courses = state.course_service.get_courses_by_curriculum_id(&id).await?;
    Ok(HttpResponse::Ok().json(courses))
}

#[get("/course/{id}")]
async fn get_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course = state.course_service.get_course_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[get("/course/{id}/progress")]
async fn get_progress(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let progress = state
        .course_service
        .get_progress_by_id(&id, &auth.0.id)
        .await?;
    Ok(HttpResponse::Ok().json(progress))
}

#[post("/admin/course")]
async fn create_course(
    state: web::Data<AppState>,
    request: web::Json<CreateCourseRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let course = state.course_service.create_course(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[put("/admin/course/{id}")]
async fn update_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateCourseByIdRequest>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let course = state
        .course_service
        .update_course_by_id(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(course))
}

#[delete("/admin/course/{id}")]
async fn delete_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    state.course_service.delete_course_by_id(&id).await?;
    Ok(HttpResponse::Ok().finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_courses_by_curriculum)
        .service(get_progress)
        .service(get_course)
        .service(create_course)
        .service(update_course)
        .service(delete_course);
}
