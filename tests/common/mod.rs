#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use quizit_server::{
    auth::JwtService,
    errors::AppResult,
    models::domain::{Chapter, Course, Curriculum, Provider, Quiz, RefreshToken, User},
    repositories::{
        ChapterRepository, CourseRepository, CurriculumRepository, QuizRepository,
        TokenRepository, UserRepository,
    },
};

pub fn jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::new(
        &SecretString::from("integration_test_secret".to_string()),
        1,
        168,
    ))
}

pub fn test_user(id: &str) -> User {
    let mut user = User::new(
        &format!("{id}@example.com"),
        id,
        "image.svg",
        true,
        5,
        Provider::Google,
    );
    user.id = id.to_string();
    user
}

pub fn test_quiz(id: &str, writer_id: &str, chapter_id: &str) -> Quiz {
    let mut quiz = Quiz::new(
        &format!("question {id}"),
        1,
        "solution",
        writer_id,
        chapter_id,
        "course-1",
        "curriculum-1",
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
    );
    quiz.id = id.to_string();
    quiz
}

pub fn test_chapter(id: &str, course_id: &str, index: i32) -> Chapter {
    let mut chapter = Chapter::new("description", "document", course_id, "image.svg", index);
    chapter.id = id.to_string();
    chapter
}

pub fn test_course(id: &str, curriculum_id: &str) -> Course {
    let mut course = Course::new("title", "image.svg", curriculum_id);
    course.id = id.to_string();
    course
}

pub fn test_curriculum(id: &str) -> Curriculum {
    let mut curriculum = Curriculum::new("title", "image.svg");
    curriculum.id = id.to_string();
    curriculum
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider: Provider,
    ) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email && u.provider == provider)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn save(&self, user: User) -> AppResult<User> {
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn save_all(&self, users: Vec<User>) -> AppResult<()> {
        let mut store = self.users.write().await;
        for user in users {
            store.insert(user.id.clone(), user);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.users.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }

    async fn filtered<F: Fn(&Quiz) -> bool>(&self, predicate: F) -> Vec<Quiz> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .read()
            .await
            .values()
            .filter(|q| predicate(q))
            .cloned()
            .collect();
        quizzes.sort_by(|a, b| a.id.cmp(&b.id));
        quizzes
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_all_by_chapter_id(&self, chapter_id: &str) -> AppResult<Vec<Quiz>> {
        Ok(self.filtered(|q| q.chapter_id == chapter_id).await)
    }

    async fn find_all_by_chapter_id_and_answer_rate_between(
        &self,
        chapter_id: &str,
        min_answer_rate: f64,
        max_answer_rate: f64,
        page: u64,
        size: i64,
    ) -> AppResult<Vec<Quiz>> {
        let matching = self
            .filtered(|q| {
                q.chapter_id == chapter_id
                    && q.answer_rate >= min_answer_rate
                    && q.answer_rate <= max_answer_rate
            })
            .await;

        let start = (page * size.max(0) as u64) as usize;
        let end = (start + size.max(0) as usize).min(matching.len());
        Ok(if start >= matching.len() {
            vec![]
        } else {
            matching[start..end].to_vec()
        })
    }

    async fn find_all_by_course_id(&self, course_id: &str) -> AppResult<Vec<Quiz>> {
        Ok(self.filtered(|q| q.course_id == course_id).await)
    }

    async fn find_all_by_curriculum_id(&self, curriculum_id: &str) -> AppResult<Vec<Quiz>> {
        Ok(self.filtered(|q| q.curriculum_id == curriculum_id).await)
    }

    async fn find_all_by_writer_id(&self, writer_id: &str) -> AppResult<Vec<Quiz>> {
        Ok(self.filtered(|q| q.writer_id == writer_id).await)
    }

    async fn find_all_by_question_contains(&self, keyword: &str) -> AppResult<Vec<Quiz>> {
        let keyword = keyword.to_lowercase();
        Ok(self
            .filtered(|q| q.question.to_lowercase().contains(&keyword))
            .await)
    }

    async fn find_all_by_id_in(&self, ids: Vec<String>) -> AppResult<Vec<Quiz>> {
        Ok(self.filtered(|q| ids.contains(&q.id)).await)
    }

    async fn save(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes
            .write()
            .await
            .insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn save_all(&self, quizzes: Vec<Quiz>) -> AppResult<()> {
        let mut store = self.quizzes.write().await;
        for quiz in quizzes {
            store.insert(quiz.id.clone(), quiz);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.quizzes.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChapterRepository {
    chapters: RwLock<HashMap<String, Chapter>>,
}

impl InMemoryChapterRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, chapter: Chapter) {
        self.chapters
            .write()
            .await
            .insert(chapter.id.clone(), chapter);
    }
}

#[async_trait]
impl ChapterRepository for InMemoryChapterRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Chapter>> {
        Ok(self.chapters.read().await.get(id).cloned())
    }

    async fn find_all_by_course_id_order_by_index(
        &self,
        course_id: &str,
    ) -> AppResult<Vec<Chapter>> {
        let mut chapters: Vec<Chapter> = self
            .chapters
            .read()
            .await
            .values()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect();
        chapters.sort_by_key(|c| c.index);
        Ok(chapters)
    }

    async fn save(&self, chapter: Chapter) -> AppResult<Chapter> {
        self.chapters
            .write()
            .await
            .insert(chapter.id.clone(), chapter.clone());
        Ok(chapter)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.chapters.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<HashMap<String, Course>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, course: Course) {
        self.courses.write().await.insert(course.id.clone(), course);
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn find_all_by_curriculum_id(&self, curriculum_id: &str) -> AppResult<Vec<Course>> {
        let mut courses: Vec<Course> = self
            .courses
            .read()
            .await
            .values()
            .filter(|c| c.curriculum_id == curriculum_id)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(courses)
    }

    async fn save(&self, course: Course) -> AppResult<Course> {
        self.courses
            .write()
            .await
            .insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.courses.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCurriculumRepository {
    curricula: RwLock<HashMap<String, Curriculum>>,
}

impl InMemoryCurriculumRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, curriculum: Curriculum) {
        self.curricula
            .write()
            .await
            .insert(curriculum.id.clone(), curriculum);
    }
}

#[async_trait]
impl CurriculumRepository for InMemoryCurriculumRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Curriculum>> {
        Ok(self.curricula.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Curriculum>> {
        let mut curricula: Vec<Curriculum> =
            self.curricula.read().await.values().cloned().collect();
        curricula.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(curricula)
    }

    async fn save(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        self.curricula
            .write()
            .await
            .insert(curriculum.id.clone(), curriculum.clone());
        Ok(curriculum)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.curricula.write().await.remove(id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: RwLock<HashMap<String, RefreshToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<RefreshToken>> {
        Ok(self.tokens.read().await.get(user_id).cloned())
    }

    async fn save(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.tokens
            .write()
            .await
            .insert(token.user_id.clone(), token.clone());
        Ok(token)
    }

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<()> {
        self.tokens.write().await.remove(user_id);
        Ok(())
    }
}
