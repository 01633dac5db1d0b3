pub mod chapter_repository;
pub mod course_repository;
pub mod curriculum_repository;
pub mod quiz_repository;
pub mod token_repository;
pub mod user_repository;

pub use chapter_repository::{ChapterRepository, MongoChapterRepository};
pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use curriculum_repository::{CurriculumRepository, MongoCurriculumRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use token_repository::{MongoTokenRepository, TokenRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
