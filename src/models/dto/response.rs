use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Chapter, Course, Curriculum, Provider, Quiz, Role, User};

/// Public projection of a quiz. The answer and solution are deliberately
/// absent; they are only revealed through `CheckAnswerResponse`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: String,
    pub question: String,
    pub writer_id: String,
    pub chapter_id: String,
    pub course_id: String,
    pub curriculum_id: String,
    pub options: Vec<String>,
    pub answer_rate: f64,
    pub correct_count: i64,
    pub incorrect_count: i64,
    pub marked_user_ids: HashSet<String>,
    pub liked_user_ids: HashSet<String>,
    pub unliked_user_ids: HashSet<String>,
    pub created_date: DateTime<Utc>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        QuizResponse {
            id: quiz.id,
            question: quiz.question,
            writer_id: quiz.writer_id,
            chapter_id: quiz.chapter_id,
            course_id: quiz.course_id,
            curriculum_id: quiz.curriculum_id,
            options: quiz.options,
            answer_rate: quiz.answer_rate,
            correct_count: quiz.correct_count,
            incorrect_count: quiz.incorrect_count,
            marked_user_ids: quiz.marked_user_ids,
            liked_user_ids: quiz.liked_user_ids,
            unliked_user_ids: quiz.unliked_user_ids,
            created_date: quiz.created_date,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerResponse {
    pub answer: i32,
    pub solution: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub image: String,
    pub level: i32,
    pub role: Role,
    pub allow_push: bool,
    pub daily_target: i32,
    pub answer_rate: f64,
    pub provider: Provider,
    pub correct_quiz_ids: HashSet<String>,
    pub incorrect_quiz_ids: HashSet<String>,
    pub marked_quiz_ids: HashSet<String>,
    pub created_date: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            image: user.image,
            level: user.level,
            role: user.role,
            allow_push: user.allow_push,
            daily_target: user.daily_target,
            answer_rate: user.answer_rate,
            provider: user.provider,
            correct_quiz_ids: user.correct_quiz_ids,
            incorrect_quiz_ids: user.incorrect_quiz_ids,
            marked_quiz_ids: user.marked_quiz_ids,
            created_date: user.created_date,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResponse {
    pub id: String,
    pub description: String,
    pub document: String,
    pub course_id: String,
    pub image: String,
    pub index: i32,
}

impl From<Chapter> for ChapterResponse {
    fn from(chapter: Chapter) -> Self {
        ChapterResponse {
            id: chapter.id,
            description: chapter.description,
            document: chapter.document,
            course_id: chapter.course_id,
            image: chapter.image,
            index: chapter.index,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub image: String,
    pub curriculum_id: String,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        CourseResponse {
            id: course.id,
            title: course.title,
            image: course.image,
            curriculum_id: course.curriculum_id,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumResponse {
    pub id: String,
    pub title: String,
    pub image: String,
}

impl From<Curriculum> for CurriculumResponse {
    fn from(curriculum: Curriculum) -> Self {
        CurriculumResponse {
            id: curriculum.id,
            title: curriculum.title,
            image: curriculum.image,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub total: usize,
    pub solved: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}
