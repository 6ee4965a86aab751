//! Inspect command implementation.

use serde::Serialize;
use std::path::Path;
use wordl_core::{
    CategoryWord, Feedback, Record, RecordStore, SqliteRecordStore, StoreResult, UserThumbInfo,
    WordInfo, WordThumbInfo,
};

/// Record count for one collection.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CollectionCount {
    /// Collection name as used in URLs.
    pub collection: &'static str,
    /// Number of stored records.
    pub records: usize,
}

/// Database inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Database path.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
    /// Per-collection counts.
    pub collections: Vec<CollectionCount>,
}

/// Counts one collection without writing to the file; a missing table
/// counts as empty.
async fn count<R: Record>(path: &Path) -> StoreResult<CollectionCount> {
    let store = SqliteRecordStore::<R>::open_read_only(path)?;
    let records = if store.table_exists()? {
        store.count().await?
    } else {
        0
    };
    Ok(CollectionCount {
        collection: R::COLLECTION,
        records,
    })
}

/// Collects counts for every collection.
pub async fn inspect(path: &Path) -> Result<InspectResult, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("No database found at {:?}", path).into());
    }

    let collections = vec![
        count::<CategoryWord>(path).await?,
        count::<WordInfo>(path).await?,
        count::<WordThumbInfo>(path).await?,
        count::<UserThumbInfo>(path).await?,
        count::<Feedback>(path).await?,
    ];

    Ok(InspectResult {
        path: path.display().to_string(),
        size: std::fs::metadata(path)?.len(),
        collections,
    })
}

/// Runs the inspect command.
pub async fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let result = inspect(path).await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!("Database: {}", result.path);
            println!("Size: {} bytes", result.size);
            for c in &result.collections {
                println!("  {:<18} {}", c.collection, c.records);
            }
        }
    }

    Ok(())
}
