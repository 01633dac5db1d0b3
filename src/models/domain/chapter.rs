use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chapter {
    pub id: String,
    pub description: String,
    pub document: String,
    pub course_id: String,
    pub image: String,
    // Ordering key within the course.
    pub index: i32,
}

impl Chapter {
    pub fn new(description: &str, document: &str, course_id: &str, image: &str, index: i32) -> Self {
        Chapter {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            document: document.to_string(),
            course_id: course_id.to_string(),
            image: image.to_string(),
            index,
        }
    }
}
