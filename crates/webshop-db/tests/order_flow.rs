//! End-to-end order flows against a file-backed store.
//!
//! A real database file is used so the pool can hold several connections
//! and orders genuinely race for the writer lock.

use std::collections::HashSet;
use std::path::Path;

use webshop_core::{CoreError, Money, NewProduct};
use webshop_db::{Database, DbConfig, OrderError};

async fn open(path: &Path) -> Database {
    Database::new(DbConfig::new(path).max_connections(4))
        .await
        .unwrap()
}

/// Adds a product with its own stock level to the seeded catalog.
async fn add_product(db: &Database, name: &str, stock: i64) -> i64 {
    let product = db
        .products()
        .insert(&NewProduct {
            name: name.to_string(),
            description: None,
            price_cents: 1_000,
            supplier_id: 1,
        })
        .await
        .unwrap();
    db.inventory()
        .insert_stock_level(product.id, stock)
        .await
        .unwrap();
    product.id
}

async fn stock_of(db: &Database, product_id: i64) -> i64 {
    db.inventory()
        .stock_for_product(product_id)
        .await
        .unwrap()
        .unwrap()
        .stock_quantity
}

#[tokio::test]
async fn seeded_store_serves_catalog_and_orders() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir.path().join("shop.db")).await;

    let catalog = db.products().list_all().await.unwrap();
    let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Smartphone"]);

    let order = db.orders().process_order(2, 10).await.unwrap();
    assert_eq!(order.total_price(), Money::from_major_minor(8000, 0));

    let report = db.inventory().report().await.unwrap();
    assert_eq!(report[1].stock_quantity, 90);
    assert_eq!(report[0].stock_quantity, 50);

    db.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_startups_seed_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db");

    // Schema in place, no rows yet
    Database::new(DbConfig::new(&path).seed_sample_data(false))
        .await
        .unwrap()
        .close()
        .await;

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let path = path.clone();
            tokio::spawn(async move { Database::new(DbConfig::new(path)).await })
        })
        .collect();

    let mut sessions = Vec::new();
    for task in tasks {
        sessions.push(task.await.unwrap().expect("startup failed"));
    }

    let db = &sessions[0];
    assert_eq!(db.suppliers().count().await.unwrap(), 1);
    assert_eq!(db.products().count().await.unwrap(), 2);
    assert_eq!(db.inventory().stock_levels().await.unwrap().len(), 2);
    assert_eq!(db.inventory().restock_rules().await.unwrap().len(), 2);

    for session in sessions {
        session.close().await;
    }
}

#[tokio::test]
async fn catalog_reads_are_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir.path().join("shop.db")).await;

    let first = db.products().list_all().await.unwrap();
    let second = db.products().list_all().await.unwrap();
    assert_eq!(first, second);

    let report = db.inventory().report().await.unwrap();
    assert_eq!(report, db.inventory().report().await.unwrap());
}

#[tokio::test]
async fn reopening_keeps_state_without_reseeding() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db");

    let db = open(&path).await;
    db.orders().process_order(1, 4).await.unwrap();
    db.close().await;

    let db = open(&path).await;
    assert_eq!(db.products().count().await.unwrap(), 2);
    assert_eq!(stock_of(&db, 1).await, 46);
    assert_eq!(db.orders().count().await.unwrap(), 1);
    db.close().await;

    let db = Database::new(DbConfig::new(&path).reset_on_start(true))
        .await
        .unwrap();
    assert_eq!(stock_of(&db, 1).await, 50);
    assert_eq!(db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn rejected_order_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir.path().join("shop.db")).await;

    let err = db.orders().process_order(404, 1).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Rejected(CoreError::ProductNotFound(404))
    ));

    let err = db.orders().process_order(1, 500).await.unwrap_err();
    assert!(err.is_insufficient_stock());

    assert_eq!(db.orders().count().await.unwrap(), 0);
    assert_eq!(stock_of(&db, 1).await, 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn competing_orders_never_overdraw() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir.path().join("shop.db")).await;
    let product_id = add_product(&db, "Tablet", 10).await;

    let tasks: Vec<_> = (0..2)
        .map(|_| {
            let orders = db.orders();
            tokio::spawn(async move { orders.process_order(product_id, 6).await })
        })
        .collect();

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(order) => {
                assert_eq!(order.quantity, 6);
                accepted += 1;
            }
            Err(err) => assert!(err.is_insufficient_stock(), "unexpected error: {err}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(stock_of(&db, product_id).await, 4);
    assert_eq!(
        db.orders().list_for_product(product_id).await.unwrap().len(),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_small_orders_drain_stock_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir.path().join("shop.db")).await;
    let product_id = add_product(&db, "Headphones", 10).await;

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let orders = db.orders();
            tokio::spawn(async move { orders.process_order(product_id, 1).await })
        })
        .collect();

    let mut order_ids = HashSet::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(order) => assert!(order_ids.insert(order.id)),
            Err(err) => assert!(err.is_insufficient_stock(), "unexpected error: {err}"),
        }
    }

    assert_eq!(order_ids.len(), 10, "exactly 10 orders should be accepted");
    assert_eq!(stock_of(&db, product_id).await, 0);

    let orders = db.orders().list_for_product(product_id).await.unwrap();
    let ordered: i64 = orders.iter().map(|o| o.quantity).sum();
    assert_eq!(ordered, 10);
    assert!(orders.iter().all(|o| o.total_price_cents == 1_000));
}
