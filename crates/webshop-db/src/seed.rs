//! # Sample Data
//!
//! Deterministic demo catalog written into an empty store.
//!
//! ```text
//! Lars's Supplies Co. (lars.vansomeren@sia-partners.com)
//! ├── Laptop      $1200.00   stock 50    restock 20 when below 50
//! └── Smartphone   $800.00   stock 100   restock 30 when below 50
//! ```

use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::inventory::InventoryRepository;
use crate::repository::product::ProductRepository;
use crate::repository::supplier::SupplierRepository;
use webshop_core::{Money, NewProduct, NewSupplier};

/// Sample supplier name.
pub const SAMPLE_SUPPLIER: &str = "Lars's Supplies Co.";
/// Sample supplier contact address.
pub const SAMPLE_SUPPLIER_CONTACT: &str = "lars.vansomeren@sia-partners.com";

/// One sample product with its stock and restock rule.
struct SampleProduct {
    name: &'static str,
    description: &'static str,
    price: Money,
    stock_quantity: i64,
    order_quantity: i64,
    minimum_stock: i64,
}

const SAMPLE_PRODUCTS: &[SampleProduct] = &[
    SampleProduct {
        name: "Laptop",
        description: "A high-performance laptop",
        price: Money::from_major_minor(1200, 0),
        stock_quantity: 50,
        order_quantity: 20,
        minimum_stock: 50,
    },
    SampleProduct {
        name: "Smartphone",
        description: "A latest model smartphone",
        price: Money::from_major_minor(800, 0),
        stock_quantity: 100,
        order_quantity: 30,
        minimum_stock: 50,
    },
];

/// Ids of the records a seed run created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub supplier_id: i64,
    pub product_ids: Vec<i64>,
}

/// Seeds the sample catalog when the product table is empty.
///
/// ## Returns
/// * `Ok(Some(summary))` - store was empty and has been seeded
/// * `Ok(None)` - products already existed; nothing written
///
/// All rows are written in one transaction. Several sessions may open the
/// same empty store at once; exactly one of them seeds it.
pub async fn seed_if_empty(db: &Database) -> DbResult<Option<SeedSummary>> {
    let mut tx = db.pool().begin().await?;

    // Take the writer lock before reading. A read snapshot cannot be
    // upgraded once another session has committed, and that failure skips
    // the busy timeout.
    sqlx::query("UPDATE product SET id = id WHERE 0")
        .execute(&mut *tx)
        .await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        debug!(existing, "Catalog already populated, skipping seed");
        return Ok(None);
    }

    let supplier = SupplierRepository::insert_with(
        &mut *tx,
        &NewSupplier {
            name: SAMPLE_SUPPLIER.to_string(),
            contact_info: Some(SAMPLE_SUPPLIER_CONTACT.to_string()),
        },
    )
    .await?;

    let mut product_ids = Vec::with_capacity(SAMPLE_PRODUCTS.len());
    for sample in SAMPLE_PRODUCTS {
        let product = ProductRepository::insert_with(
            &mut *tx,
            &NewProduct {
                name: sample.name.to_string(),
                description: Some(sample.description.to_string()),
                price_cents: sample.price.cents(),
                supplier_id: supplier.id,
            },
        )
        .await?;

        InventoryRepository::insert_stock_level_with(&mut *tx, product.id, sample.stock_quantity)
            .await?;
        InventoryRepository::insert_restock_rule_with(
            &mut *tx,
            product.id,
            sample.order_quantity,
            sample.minimum_stock,
        )
        .await?;

        product_ids.push(product.id);
    }

    tx.commit().await?;

    info!(
        supplier_id = supplier.id,
        products = product_ids.len(),
        "Seeded sample data"
    );

    Ok(Some(SeedSummary {
        supplier_id: supplier.id,
        product_ids,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;

    #[tokio::test]
    async fn test_seed_fresh_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let summary = seed_if_empty(&db).await.unwrap().unwrap();
        assert_eq!(summary.product_ids.len(), 2);

        assert_eq!(db.suppliers().count().await.unwrap(), 1);
        assert_eq!(db.products().count().await.unwrap(), 2);

        let stock: Vec<i64> = db
            .inventory()
            .stock_levels()
            .await
            .unwrap()
            .iter()
            .map(|s| s.stock_quantity)
            .collect();
        assert_eq!(stock, vec![50, 100]);

        let rules: Vec<(i64, i64)> = db
            .inventory()
            .restock_rules()
            .await
            .unwrap()
            .iter()
            .map(|r| (r.order_quantity, r.minimum_stock))
            .collect();
        assert_eq!(rules, vec![(20, 50), (30, 50)]);

        let products = db.products().list_all().await.unwrap();
        assert_eq!(products[0].price_cents, 120_000);
        assert_eq!(products[1].price_cents, 80_000);
        assert!(products.iter().all(|p| p.supplier_id == summary.supplier_id));
    }

    #[tokio::test]
    async fn test_seed_twice_is_noop() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(seed_if_empty(&db).await.unwrap().is_some());
        assert!(seed_if_empty(&db).await.unwrap().is_none());

        assert_eq!(db.suppliers().count().await.unwrap(), 1);
        assert_eq!(db.products().count().await.unwrap(), 2);
    }
}
