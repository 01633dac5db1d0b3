use serde::Deserialize;
use validator::Validate;

use crate::models::domain::Provider;

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(range(min = 0))]
    pub answer: i32,
    #[validate(length(min = 1))]
    pub solution: String,
    pub chapter_id: String,
    #[validate(length(min = 2))]
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizByIdRequest {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(range(min = 0))]
    pub answer: i32,
    #[validate(length(min = 1))]
    pub solution: String,
    #[validate(length(min = 2))]
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerRequest {
    pub answer: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub username: String,
    pub image: String,
    pub allow_push: bool,
    #[validate(range(min = 1))]
    pub daily_target: i32,
    pub provider: Provider,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserByIdRequest {
    #[validate(length(min = 1))]
    pub username: String,
    pub image: String,
    pub allow_push: bool,
    #[validate(range(min = 1))]
    pub daily_target: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    #[validate(length(min = 1))]
    pub description: String,
    pub document: String,
    pub course_id: String,
    pub image: String,
    pub index: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChapterByIdRequest {
    #[validate(length(min = 1))]
    pub description: String,
    pub document: String,
    pub image: String,
    pub index: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub image: String,
    pub curriculum_id: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseByIdRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub image: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCurriculumRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub image: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCurriculumByIdRequest {
    #[validate(length(min = 1))]
    pub title: String,
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_quiz_request_validation() {
        let request = CreateQuizRequest {
            question: "".to_string(),
            answer: 0,
            solution: "because".to_string(),
            chapter_id: "chapter-1".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_user_request_rejects_bad_email() {
        let request = CreateUserRequest {
            email: "not-an-email".to_string(),
            username: "tester".to_string(),
            image: "image.svg".to_string(),
            allow_push: true,
            daily_target: 5,
            provider: Provider::Google,
        };

        assert!(request.validate().is_err());
    }

    #[test]
    fn test_camel_case_deserialization() {
        let json = r#"{
            "question": "q",
            "answer": 1,
            "solution": "s",
            "chapterId": "chapter-1",
            "options": ["a", "b", "c"]
        }"#;

        let request: CreateQuizRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.chapter_id, "chapter-1");
        assert!(request.validate().is_ok());
    }
}
