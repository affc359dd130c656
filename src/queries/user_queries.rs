use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    database::UserStore,
    error::Result,
    models::{AddressBook, NewUser, User},
    queries::PgStore,
};

#[async_trait]
impl UserStore for PgStore {
    async fn find_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE clerk_id = $1")
            .bind(clerk_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, clerk_id, email, name, image_url)
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&user.clerk_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user_by_clerk_id(&self, clerk_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE clerk_id = $1")
            .bind(clerk_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn save_addresses(&self, user_id: Uuid, addresses: &AddressBook) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET addresses = $1, updated_at = NOW() WHERE id = $2")
                .bind(Json(addresses))
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn save_wishlist(&self, user_id: Uuid, wishlist: &[Uuid]) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET wishlist = $1, updated_at = NOW() WHERE id = $2")
                .bind(wishlist)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
