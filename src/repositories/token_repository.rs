use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::RefreshToken};

/// Store for the single live refresh token per user. `save` overwrites any
/// previous record for the same user, which is what makes rotation work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<RefreshToken>>;
    async fn save(&self, token: RefreshToken) -> AppResult<RefreshToken>;
    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<()>;
}

pub struct MongoTokenRepository {
    collection: Collection<RefreshToken>,
}

impl MongoTokenRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("refresh_tokens");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(user_id_index).await?;

        log::info!("Created indexes for refresh_tokens collection");
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MongoTokenRepository {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<RefreshToken>> {
        let token = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(token)
    }

    async fn save(&self, token: RefreshToken) -> AppResult<RefreshToken> {
        self.collection
            .replace_one(doc! { "user_id": &token.user_id }, &token)
            .upsert(true)
            .await?;
        Ok(token)
    }

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<()> {
        self.collection
            .delete_one(doc! { "user_id": user_id })
            .await?;
        Ok(())
    }
}
