//! # Product Repository
//!
//! Catalog reads and product creation.
//!
//! The `price` column holds cents and is read back as `price_cents`.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use webshop_core::{NewProduct, Product};

const SELECT_PRODUCT: &str =
    "SELECT id, name, description, price AS price_cents, supplier_id FROM product";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let catalog = repo.list_all().await?;
/// let laptop = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product in the catalog, ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;
        Self::get_by_id_with(&mut conn, id).await
    }

    /// Gets a product by id on an existing connection or transaction.
    pub async fn get_by_id_with(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its assigned id
    /// * `Err(DbError::ForeignKeyViolation)` - Supplier doesn't exist
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_with(&mut conn, product).await
    }

    /// Inserts a product on an existing connection or transaction.
    pub async fn insert_with(conn: &mut SqliteConnection, product: &NewProduct) -> DbResult<Product> {
        product.validate()?;

        debug!(name = %product.name, price_cents = product.price_cents, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO product (name, description, price, supplier_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.supplier_id)
        .execute(&mut *conn)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            supplier_id: product.supplier_id,
        })
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use webshop_core::{NewProduct, NewSupplier};

    async fn db_with_supplier() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.suppliers()
            .insert(&NewSupplier {
                name: "Acme".to_string(),
                contact_info: Some("sales@acme.test".to_string()),
            })
            .await
            .unwrap();
        db
    }

    fn new_product(name: &str, price_cents: i64, supplier_id: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price_cents,
            supplier_id,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = db_with_supplier().await;
        let repo = db.products();

        let first = repo.insert(&new_product("Mouse", 2_500, 1)).await.unwrap();
        let second = repo.insert(&new_product("Keyboard", 4_999, 1)).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all, vec![first.clone(), second]);
        assert_eq!(repo.get_by_id(first.id).await.unwrap(), Some(first));
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_requires_supplier() {
        let db = db_with_supplier().await;

        let err = db
            .products()
            .insert(&new_product("Orphan", 100, 99))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_insert_rejects_negative_price() {
        let db = db_with_supplier().await;

        let err = db
            .products()
            .insert(&new_product("Refund", -1, 1))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let db = db_with_supplier().await;
        assert_eq!(db.products().get_by_id(42).await.unwrap(), None);
    }
}
