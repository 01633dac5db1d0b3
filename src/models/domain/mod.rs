pub mod chapter;
pub mod course;
pub mod curriculum;
pub mod quiz;
pub mod refresh_token;
pub mod user;

pub use chapter::Chapter;
pub use course::Course;
pub use curriculum::Curriculum;
pub use quiz::Quiz;
pub use refresh_token::{hash_token, RefreshToken};
pub use user::{Provider, Role, User};
