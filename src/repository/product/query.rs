use crate::{
    abstract_trait::ProductQueryRepositoryTrait, config::ConnectionPool,
    domain::requests::FindAllProducts, errors::RepositoryError, model::ProductWithCategory,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductWithCategory>, i64), RepositoryError> {
        info!("🔍 Fetching products with search: {:?}", req.search);

        let limit = req.page_size.max(1) as i64;
        let offset = ((req.page - 1).max(0) * req.page_size.max(1)) as i64;

        let search_pattern = if req.search.trim().is_empty() {
            None
        } else {
            Some(req.search.as_str())
        };

        // Soft-deleted rows are invisible to every read path.
        let rows = sqlx::query_as::<_, ProductWithCategoryCounted>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.price,
                p.quantity,
                p.category_id,
                c.name AS category_name,
                p.is_deleted,
                p.created_at,
                p.updated_at,
                COUNT(*) OVER() AS total_count
            FROM products p
            JOIN categories c ON c.category_id = p.category_id
            WHERE p.is_deleted = FALSE
              AND ($1::TEXT IS NULL OR p.name ILIKE '%' || $1 || '%')
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search_pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = rows.first().map(|r| r.total_count).unwrap_or(0);

        let products = rows.into_iter().map(|r| r.row).collect();

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductWithCategory>, RepositoryError> {
        let product = sqlx::query_as::<_, ProductWithCategory>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.price,
                p.quantity,
                p.category_id,
                c.name AS category_name,
                p.is_deleted,
                p.created_at,
                p.updated_at
            FROM products p
            JOIN categories c ON c.category_id = p.category_id
            WHERE p.product_id = $1 AND p.is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }
}

struct ProductWithCategoryCounted {
    row: ProductWithCategory,
    total_count: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ProductWithCategoryCounted {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        use sqlx::{FromRow, Row};

        Ok(Self {
            row: ProductWithCategory::from_row(row)?,
            total_count: row.try_get("total_count")?,
        })
    }
}
