use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub question: String,
    pub answer: i32,
    pub solution: String,
    pub writer_id: String,
    pub chapter_id: String,
    // Snapshot of the chapter's course chain at creation time, not a live join.
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

impl Quiz {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        question: &str,
        answer: i32,
        solution: &str,
        writer_id: &str,
        chapter_id: &str,
        course_id: &str,
        curriculum_id: &str,
        options: Vec<String>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            question: question.to_string(),
            answer,
            solution: solution.to_string(),
            writer_id: writer_id.to_string(),
            chapter_id: chapter_id.to_string(),
            course_id: course_id.to_string(),
            curriculum_id: curriculum_id.to_string(),
            options,
            answer_rate: 0.0,
            correct_count: 0,
            incorrect_count: 0,
            marked_user_ids: HashSet::new(),
            liked_user_ids: HashSet::new(),
            unliked_user_ids: HashSet::new(),
            created_date: Utc::now(),
        }
    }

    pub fn correct_answer(&mut self) {
        self.correct_count += 1;
        self.change_answer_rate();
    }

    pub fn incorrect_answer(&mut self) {
        self.incorrect_count += 1;
        self.change_answer_rate();
    }

    pub fn mark(&mut self, user_id: &str) {
        self.marked_user_ids.insert(user_id.to_string());
    }

    pub fn unmark(&mut self, user_id: &str) {
        self.marked_user_ids.remove(user_id);
    }

    pub fn like(&mut self, user_id: &str) {
        self.liked_user_ids.insert(user_id.to_string());
    }

    pub fn unlike(&mut self, user_id: &str) {
        self.unliked_user_ids.insert(user_id.to_string());
    }

    fn change_answer_rate(&mut self) {
        let total = (self.correct_count + self.incorrect_count) as f64;
        self.answer_rate = if total == 0.0 {
            0.0
        } else {
            self.correct_count as f64 / total * 100.0
        };
    }
}
