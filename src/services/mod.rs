pub mod auth_service;
pub mod chapter_service;
pub mod course_service;
pub mod curriculum_service;
pub mod oauth2;
pub mod quiz_service;
pub mod user_service;

pub use auth_service::{AuthenticationService, LoginResult};
pub use chapter_service::ChapterService;
pub use course_service::CourseService;
pub use curriculum_service::CurriculumService;
pub use quiz_service::QuizService;
pub use user_service::UserService;
