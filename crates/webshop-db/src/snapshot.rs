//! # Inventory Snapshot
//!
//! JSON export of the inventory report, for static serving next to the
//! dashboard.
//!
//! ```json
//! {
//!   "generated_at": "2026-01-31T12:00:00Z",
//!   "rows": [
//!     { "product_id": 1, "name": "Laptop", "stock_quantity": 50, ... }
//!   ]
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use webshop_core::InventoryRow;

/// The inventory report at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<InventoryRow>,
}

impl InventorySnapshot {
    /// Captures the current inventory report.
    pub async fn capture(db: &Database) -> DbResult<Self> {
        let rows = db.inventory().report().await?;
        Ok(InventorySnapshot {
            generated_at: Utc::now(),
            rows,
        })
    }

    /// Rows whose stock has dropped below the restock trigger.
    pub fn below_minimum(&self) -> impl Iterator<Item = &InventoryRow> {
        self.rows.iter().filter(|row| row.below_minimum())
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> DbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the snapshot to `path`, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> DbResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;

        info!(path = %path.display(), rows = self.rows.len(), "Wrote inventory snapshot");
        Ok(())
    }

    /// Reads a snapshot previously written with [`write_json`](Self::write_json).
    pub fn read_json(path: impl AsRef<Path>) -> DbResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{seed, DbConfig};

    #[tokio::test]
    async fn test_snapshot_written_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed::seed_if_empty(&db).await.unwrap();
        db.orders().process_order(1, 5).await.unwrap();

        let snapshot = InventorySnapshot::capture(&db).await.unwrap();
        assert_eq!(snapshot.rows.len(), 2);
        assert_eq!(snapshot.rows[0].stock_quantity, 45);

        let below: Vec<&str> = snapshot.below_minimum().map(|r| r.name.as_str()).collect();
        assert_eq!(below, vec!["Laptop"]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("static").join("inventory.json");
        snapshot.write_json(&path).unwrap();

        let restored = InventorySnapshot::read_json(&path).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[tokio::test]
    async fn test_empty_store_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let snapshot = InventorySnapshot::capture(&db).await.unwrap();
        assert!(snapshot.rows.is_empty());
        assert!(snapshot.to_json().unwrap().contains("\"rows\": []"));
    }
}
