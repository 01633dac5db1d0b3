use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Curriculum {
    pub id: String,
    pub title: String,
    pub image: String,
}

impl Curriculum {
    pub fn new(title: &str, image: &str) -> Self {
        Curriculum {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            image: image.to_string(),
        }
    }
}
