use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Chapter};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Chapter>>;
    async fn find_all_by_course_id_order_by_index(&self, course_id: &str)
        -> AppResult<Vec<Chapter>>;
    async fn save(&self, chapter: Chapter) -> AppResult<Chapter>;
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

pub struct MongoChapterRepository {
    collection: Collection<Chapter>,
}

impl MongoChapterRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chapters");
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

        let course_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "index": 1 })
            .build();
        self.collection.create_index(course_index).await?;

        log::info!("Created indexes for chapters collection");
        Ok(())
    }
}

#[async_trait]
impl ChapterRepository for MongoChapterRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Chapter>> {
        let chapter = self.collection.find_one(doc! { "id": id }).await?;
        Ok(chapter)
    }

    async fn find_all_by_course_id_order_by_index(
        &self,
        course_id: &str,
    ) -> AppResult<Vec<Chapter>> {
        let find_options = FindOptions::builder().sort(doc! { "index": 1 }).build();

        let cursor = self
            .collection
            .find(doc! { "course_id": course_id })
            .with_options(find_options)
            .await?;
        let chapters: Vec<Chapter> = cursor.try_collect().await?;
        Ok(chapters)
    }

    async fn save(&self, chapter: Chapter) -> AppResult<Chapter> {
        self.collection
            .replace_one(doc! { "id": &chapter.id }, &chapter)
            .upsert(true)
            .await?;
        Ok(chapter)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}
