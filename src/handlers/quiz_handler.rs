use actix_web::{delete, get, post, put, route, web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::dto::request::{CheckAnswerRequest, CreateQuizRequest, UpdateQuizByIdRequest},
};

#[derive(Debug, Deserialize)]
pub struct ChapterQuizParams {
    // "min,max" answer-rate window; all three must be present to filter.
    pub range: Option<String>,
    pub page: Option<u64>,
    pub size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub question: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateParams {
    pub is_like: bool,
}

#[get("/quiz/search")]
async fn search_quizzes(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state
        .quiz_service
        .get_quizzes_by_question_contains(&params.question)
        .await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/chapter/{id}")]
async fn get_quizzes_by_chapter(
    state: web::Data<AppState>,
    id: web::Path<String>,
    params: web::Query<ChapterQuizParams>,
) -> Result<HttpResponse, AppError> {
    let params = params.into_inner();
    let quizzes = match (params.range, params.page, params.size) {
        (Some(range), Some(page), Some(size)) => {
            let (min, max) = parse_range(&range)?;
            state
                .quiz_service
                .get_quizzes_by_chapter_id_and_answer_rate_range(&id, min, max, page, size)
                .await?
        }
        _ => state.quiz_service.get_quizzes_by_chapter_id(&id).await?,
    };
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/course/{id}")]
async fn get_quizzes_by_course(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.get_quizzes_by_course_id(&id).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/writer/{id}")]
async fn get_quizzes_by_writer(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.get_quizzes_by_writer_id(&id).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/marked-user/{id}")]
async fn get_marked_quizzes(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.get_marked_quizzes(&id).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quiz/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/quiz")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let quiz = state
        .quiz_service
        .create_quiz(&auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[put("/quiz/{id}")]
async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizByIdRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    let quiz = state
        .quiz_service
        .update_quiz_by_id(&id, &auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[delete("/quiz/{id}")]
async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz_by_id(&id, &auth.0).await?;
    Ok(HttpResponse::Ok().finish())
}

#[post("/quiz/{id}/check")]
async fn check_answer(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<CheckAnswerRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .quiz_service
        .check_answer(&id, &auth.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[route("/quiz/{id}/mark", method = "GET", method = "POST")]
async fn mark_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.mark_quiz(&id, &auth.0.id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[route("/quiz/{id}/evaluate", method = "GET", method = "POST")]
async fn evaluate_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    params: web::Query<EvaluateParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .evaluate_quiz(&id, &auth.0.id, params.is_like)
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

fn parse_range(range: &str) -> AppResult<(f64, f64)> {
    let (min, max) = range
        .split_once(',')
        .ok_or_else(|| AppError::BadRequest("range must be \"min,max\"".to_string()))?;
    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("range bounds must be numbers".to_string()))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("range bounds must be numbers".to_string()))?;
    Ok((min, max))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Literal segments must be registered ahead of `/quiz/{id}`.
    cfg.service(search_quizzes)
        .service(get_quizzes_by_chapter)
        .service(get_quizzes_by_course)
        .service(get_quizzes_by_writer)
        .service(get_marked_quizzes)
        .service(check_answer)
        .service(mark_quiz)
        .service(evaluate_quiz)
        .service(create_quiz)
        .service(update_quiz)
        .service(delete_quiz)
        .service(get_quiz);
}
