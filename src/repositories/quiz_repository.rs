use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Quiz};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn find_all(&self) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_chapter_id(&self, chapter_id: &str) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_chapter_id_and_answer_rate_between(
        &self,
        chapter_id: &str,
        min_answer_rate: f64,
        max_answer_rate: f64,
        page: u64,
        size: i64,
    ) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_course_id(&self, course_id: &str) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_curriculum_id(&self, curriculum_id: &str) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_writer_id(&self, writer_id: &str) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_question_contains(&self, keyword: &str) -> AppResult<Vec<Quiz>>;
    async fn find_all_by_id_in(&self, ids: Vec<String>) -> AppResult<Vec<Quiz>>;
    async fn save(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn save_all(&self, quizzes: Vec<Quiz>) -> AppResult<()>;
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quizzes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        for field in ["chapter_id", "course_id", "curriculum_id"] {
            let index = IndexModel::builder().keys(doc! { field: 1 }).build();
            self.collection.create_index(index).await?;
        }

        log::info!("Created indexes for quizzes collection");
        Ok(())
    }

    async fn find_all_by(&self, filter: mongodb::bson::Document) -> AppResult<Vec<Quiz>> {
        let cursor = self.collection.find(filter).await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn find_all(&self) -> AppResult<Vec<Quiz>> {
        self.find_all_by(doc! {}).await
    }

    async fn find_all_by_chapter_id(&self, chapter_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all_by(doc! { "chapter_id": chapter_id }).await
    }

    async fn find_all_by_chapter_id_and_answer_rate_between(
        &self,
        chapter_id: &str,
        min_answer_rate: f64,
        max_answer_rate: f64,
        page: u64,
        size: i64,
    ) -> AppResult<Vec<Quiz>> {
        let filter = doc! {
            "chapter_id": chapter_id,
            "answer_rate": { "$gte": min_answer_rate, "$lte": max_answer_rate },
        };

        let find_options = FindOptions::builder()
            .skip(Some(page * size.max(0) as u64))
            .limit(Some(size))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let quizzes: Vec<Quiz> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn find_all_by_course_id(&self, course_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all_by(doc! { "course_id": course_id }).await
    }

    async fn find_all_by_curriculum_id(&self, curriculum_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all_by(doc! { "curriculum_id": curriculum_id })
            .await
    }

    async fn find_all_by_writer_id(&self, writer_id: &str) -> AppResult<Vec<Quiz>> {
        self.find_all_by(doc! { "writer_id": writer_id }).await
    }

    async fn find_all_by_question_contains(&self, keyword: &str) -> AppResult<Vec<Quiz>> {
        // User input becomes part of a regex; escape it so it matches as a
        // literal substring.
        let pattern = regex::escape(keyword);
        self.find_all_by(doc! { "question": { "$regex": pattern, "$options": "i" } })
            .await
    }

    async fn find_all_by_id_in(&self, ids: Vec<String>) -> AppResult<Vec<Quiz>> {
        self.find_all_by(doc! { "id": { "$in": ids } }).await
    }

    async fn save(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection
            .replace_one(doc! { "id": &quiz.id }, &quiz)
            .upsert(true)
            .await?;
        Ok(quiz)
    }

    async fn save_all(&self, quizzes: Vec<Quiz>) -> AppResult<()> {
        for quiz in quizzes {
            self.save(quiz).await?;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}
