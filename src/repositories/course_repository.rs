use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Course};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>>;
    async fn find_all_by_curriculum_id(&self, curriculum_id: &str) -> AppResult<Vec<Course>>;
    async fn save(&self, course: Course) -> AppResult<Course>;
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("courses");
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

        log::info!("Created indexes for courses collection");
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        let course = self.collection.find_one(doc! { "id": id }).await?;
        Ok(course)
    }

    async fn find_all_by_curriculum_id(&self, curriculum_id: &str) -> AppResult<Vec<Course>> {
        let cursor = self
            .collection
            .find(doc! { "curriculum_id": curriculum_id })
            .await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        Ok(courses)
    }

    async fn save(&self, course: Course) -> AppResult<Course> {
        self.collection
            .replace_one(doc! { "id": &course.id }, &course)
            .upsert(true)
            .await?;
        Ok(course)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}
