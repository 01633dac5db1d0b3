use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Provider {
    #[serde(rename = "GOOGLE")]
    Google,
    #[serde(rename = "KAKAO")]
    Kakao,
    #[serde(rename = "APPLE")]
    Apple,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "GOOGLE",
            Provider::Kakao => "KAKAO",
            Provider::Apple => "APPLE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "GOOGLE" => Some(Provider::Google),
            "KAKAO" => Some(Provider::Kakao),
            "APPLE" => Some(Provider::Apple),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct User {
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

impl User {
    pub fn new(
        email: &str,
        username: &str,
        image: &str,
        allow_push: bool,
        daily_target: i32,
        provider: Provider,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            username: username.to_string(),
            image: image.to_string(),
            level: 1,
            role: Role::User,
            allow_push,
            daily_target,
            answer_rate: 0.0,
            provider,
            correct_quiz_ids: HashSet::new(),
            incorrect_quiz_ids: HashSet::new(),
            marked_quiz_ids: HashSet::new(),
            created_date: Utc::now(),
        }
    }

    /// Records a correct submission: the quiz id moves from the incorrect
    /// set to the correct set. A quiz id lives in at most one of the two.
    pub fn correct_answer(&mut self, quiz_id: &str) {
        self.incorrect_quiz_ids.remove(quiz_id);
        self.correct_quiz_ids.insert(quiz_id.to_string());
        self.change_answer_rate();
    }

    pub fn incorrect_answer(&mut self, quiz_id: &str) {
        self.correct_quiz_ids.remove(quiz_id);
        self.incorrect_quiz_ids.insert(quiz_id.to_string());
        self.change_answer_rate();
    }

    pub fn mark_quiz(&mut self, quiz_id: &str) {
        self.marked_quiz_ids.insert(quiz_id.to_string());
    }

    pub fn unmark_quiz(&mut self, quiz_id: &str) {
        self.marked_quiz_ids.remove(quiz_id);
    }

    /// Level up once the correct-answer count reaches level * 5.
    pub fn check_level(&mut self) {
        if self.correct_quiz_ids.len() >= (self.level as usize) * 5 {
            self.level += 1;
        }
    }

    fn change_answer_rate(&mut self) {
        let correct = self.correct_quiz_ids.len() as f64;
        let total = correct + self.incorrect_quiz_ids.len() as f64;
        self.answer_rate = if total == 0.0 {
            0.0
        } else {
            correct / total * 100.0
        };
    }
}
