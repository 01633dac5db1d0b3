use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub image: String,
    pub curriculum_id: String,
}

impl Course {
    pub fn new(title: &str, image: &str, curriculum_id: &str) -> Self {
        Course {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            image: image.to_string(),
            curriculum_id: curriculum_id.to_string(),
        }
    }
}
