//! Store gateway port.
//!
//! The single-table key-value store is addressed by a `(partition, sort)`
//! pair. Items are JSON object maps carrying their own key attributes.

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Attribute holding the partition key of every item.
pub const PARTITION_ATTR: &str = "PK";
/// Attribute holding the sort key of every item.
pub const SORT_ATTR: &str = "SK";

/// A raw store item.
pub type StoreItem = Map<String, Value>;

/// Composite key of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub partition: String,
    pub sort: String,
}

impl ItemKey {
    #[must_use]
    pub fn new(partition: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: sort.into(),
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.partition, self.sort)
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Point lookup. `Ok(None)` is the normal "not found" outcome.
    async fn get_item(&self, key: &ItemKey) -> anyhow::Result<Option<StoreItem>>;

    /// All items of `partition` whose sort key starts with `sort_prefix`,
    /// in ascending sort-key order.
    async fn query_partition(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> anyhow::Result<Vec<StoreItem>>;

    /// Set the given attributes on one item. Last write wins.
    async fn update_fields(&self, key: &ItemKey, fields: StoreItem) -> anyhow::Result<()>;

    /// Write a whole item, replacing any existing one.
    async fn put_item(&self, key: &ItemKey, item: StoreItem) -> anyhow::Result<()>;
}

/// Attach the key attributes to an item before writing it.
#[must_use]
pub fn with_key_attributes(key: &ItemKey, mut item: StoreItem) -> StoreItem {
    item.insert(
        PARTITION_ATTR.to_owned(),
        Value::String(key.partition.clone()),
    );
    item.insert(SORT_ATTR.to_owned(), Value::String(key.sort.clone()));
    item
}
