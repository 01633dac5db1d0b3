use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{Provider, User},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider: Provider,
    ) -> AppResult<Option<User>>;
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn save(&self, user: User) -> AppResult<User>;
    async fn save_all(&self, users: Vec<User>) -> AppResult<()>;
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("users");
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

        let account_index = IndexModel::builder()
            .keys(doc! { "email": 1, "provider": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_provider_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(account_index).await?;

        log::info!("Created indexes for users collection");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_email_and_provider(
        &self,
        email: &str,
        provider: Provider,
    ) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "email": email, "provider": provider.as_str() })
            .await?;
        Ok(user)
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn save(&self, user: User) -> AppResult<User> {
        self.collection
            .replace_one(doc! { "id": &user.id }, &user)
            .upsert(true)
            .await?;
        Ok(user)
    }

    async fn save_all(&self, users: Vec<User>) -> AppResult<()> {
        for user in users {
            self.save(user).await?;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }
}
