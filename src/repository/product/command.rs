use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, NewProduct, UpdateProductRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

// 8 binds per row; stays well under the Postgres bind parameter ceiling.
const BATCH_CHUNK_SIZE: usize = 1000;

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, description, price, quantity, category_id, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, current_timestamp, current_timestamp)
            RETURNING product_id, name, description, price, quantity, category_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.quantity)
        .bind(req.category_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", req.name, err);
            RepositoryError::from_sqlx(err, &req.name)
        })?;

        info!(
            "✅ Created product ID {} ({})",
            product.product_id, product.name
        );
        Ok(product)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let id = req.id.ok_or(RepositoryError::NotFound)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                quantity = $5,
                category_id = $6,
                updated_at = current_timestamp
            WHERE product_id = $1 AND is_deleted = FALSE
            RETURNING product_id, name, description, price, quantity, category_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.quantity)
        .bind(req.category_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", id, err);
            RepositoryError::from_sqlx(err, &req.name)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("🔄 Updated product ID {}", product.product_id);
        Ok(product)
    }

    async fn trash_product(&self, id: i32) -> Result<ProductModel, RepositoryError> {
        info!("🗑️ Soft-deleting product: {}", id);

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET is_deleted = TRUE,
                updated_at = current_timestamp
            WHERE product_id = $1 AND is_deleted = FALSE
            RETURNING product_id, name, description, price, quantity, category_id, is_deleted, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to soft-delete product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?
        .ok_or(RepositoryError::NotFound)?;

        info!("✅ Product ID {} soft-deleted", product.product_id);
        Ok(product)
    }

    async fn create_products_batch(
        &self,
        products: &[NewProduct],
    ) -> Result<u64, RepositoryError> {
        if products.is_empty() {
            return Ok(0);
        }

        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;
        let mut inserted: u64 = 0;

        for chunk in products.chunks(BATCH_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO products (name, description, price, quantity, category_id, is_deleted, created_at, updated_at) ",
            );

            builder.push_values(chunk, |mut b, p| {
                b.push_bind(&p.name)
                    .push_bind(&p.description)
                    .push_bind(p.price)
                    .push_bind(p.quantity)
                    .push_bind(p.category_id)
                    .push("FALSE")
                    .push("current_timestamp")
                    .push("current_timestamp");
            });

            let result = builder.build().execute(&mut *tx).await.map_err(|err| {
                error!("❌ Batch insert chunk failed: {:?}", err);
                RepositoryError::from_sqlx(err, "product batch")
            })?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("✅ Batch-inserted {} products", inserted);
        Ok(inserted)
    }
}
