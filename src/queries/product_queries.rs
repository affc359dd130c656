use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    database::ProductStore,
    error::Result,
    models::{NewProduct, Product, ProductChanges},
    queries::PgStore,
};

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product> {
        let NewProduct { fields, images } = product;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, description, price, stock, category, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(&fields.category)
        .bind(&images)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(products)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    async fn find_products_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    async fn update_product(&self, id: Uuid, changes: ProductChanges) -> Result<Option<Product>> {
        let ProductChanges { fields, images } = changes;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET
                name = $1,
                description = $2,
                price = $3,
                stock = $4,
                category = $5,
                images = COALESCE($6, images),
                updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.stock)
        .bind(&fields.category)
        .bind(images.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_products(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
