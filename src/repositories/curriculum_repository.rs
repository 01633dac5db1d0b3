use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Curriculum};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Curriculum>>;
    async fn find_all(&self) -> AppResult<Vec<Curriculum>>;
    async fn save(&self, curriculum: Curriculum) -> AppResult<Curriculum>;
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

pub struct MongoCurriculumRepository {
    collection: Collection<Curriculum>,
}

impl MongoCurriculumRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("curricula");
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

        log::info!("Created indexes for curricula collection");
        Ok(())
    }
}

#[async_trait]
impl CurriculumRepository for MongoCurriculumRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Curriculum>> {
        let curriculum = self.collection.find_one(doc! { "id": id }).await?;
        Ok(curriculum)
    }

    async fn find_all(&self) -> AppResult<Vec<Curriculum>> {
        let cursor = self.collection.find(doc! {}).await?;
        let curricula: Vec<Curriculum> = cursor.try_collect().await?;
        Ok(curricula)
    }

    async fn save(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        self.collection
            .replace_one(doc! { "id": &curriculum.id }, &curriculum)
            .upsert(true)
            .await?;
        Ok(curriculum)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}
