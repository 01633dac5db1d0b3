pub mod auth_handler;
pub mod chapter_handler;
pub mod course_handler;
pub mod curriculum_handler;
pub mod health_handler;
pub mod oauth2_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    auth_handler::configure(cfg);
    chapter_handler::configure(cfg);
    course_handler::configure(cfg);
    curriculum_handler::configure(cfg);
    health_handler::configure(cfg);
    oauth2_handler::configure(cfg);
    quiz_handler::configure(cfg);
    user_handler::configure(cfg);
}
