//! # Supplier Repository
//!
//! Suppliers are created once (at seed time) and never updated.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use webshop_core::{NewSupplier, Supplier};

/// Repository for supplier database operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    /// Creates a new SupplierRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Inserts a supplier and returns it with its assigned id.
    pub async fn insert(&self, supplier: &NewSupplier) -> DbResult<Supplier> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_with(&mut conn, supplier).await
    }

    /// Inserts a supplier on an existing connection or transaction.
    pub async fn insert_with(
        conn: &mut SqliteConnection,
        supplier: &NewSupplier,
    ) -> DbResult<Supplier> {
        supplier.validate()?;

        debug!(name = %supplier.name, "Inserting supplier");

        let result = sqlx::query("INSERT INTO supplier (name, contact_info) VALUES (?1, ?2)")
            .bind(&supplier.name)
            .bind(&supplier.contact_info)
            .execute(&mut *conn)
            .await?;

        Ok(Supplier {
            id: result.last_insert_rowid(),
            name: supplier.name.clone(),
            contact_info: supplier.contact_info.clone(),
        })
    }

    /// Gets a supplier by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact_info FROM supplier WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    /// Lists all suppliers ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, contact_info FROM supplier ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Counts suppliers.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM supplier")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use webshop_core::NewSupplier;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.suppliers();

        let supplier = repo
            .insert(&NewSupplier {
                name: "Acme".to_string(),
                contact_info: None,
            })
            .await
            .unwrap();

        assert_eq!(supplier.id, 1);
        assert_eq!(repo.get_by_id(1).await.unwrap(), Some(supplier));
        assert_eq!(repo.get_by_id(2).await.unwrap(), None);
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .suppliers()
            .insert(&NewSupplier {
                name: " ".to_string(),
                contact_info: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Invalid(_)));
        assert_eq!(db.suppliers().count().await.unwrap(), 0);
    }
}
