use std::collections::BTreeMap;
use std::ops::Bound;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::store::{ItemKey, KeyValueStore, StoreItem, with_key_attributes};

/// Ordered in-process store. Used by tests and `--mock` runs.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<BTreeMap<ItemKey, StoreItem>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item, attaching its key attributes.
    pub fn insert(&self, key: ItemKey, item: StoreItem) {
        let item = with_key_attributes(&key, item);
        self.items.write().insert(key, item);
    }

    #[must_use]
    pub fn get(&self, key: &ItemKey) -> Option<StoreItem> {
        self.items.read().get(key).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &ItemKey) -> anyhow::Result<Option<StoreItem>> {
        Ok(self.get(key))
    }

    async fn query_partition(
        &self,
        partition: &str,
        sort_prefix: &str,
    ) -> anyhow::Result<Vec<StoreItem>> {
        let start = ItemKey::new(partition, sort_prefix);
        let items = self.items.read();
        Ok(items
            .range((Bound::Included(start), Bound::Unbounded))
            .take_while(|(key, _)| key.partition == partition && key.sort.starts_with(sort_prefix))
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn update_fields(&self, key: &ItemKey, fields: StoreItem) -> anyhow::Result<()> {
        let mut items = self.items.write();
        let item = items
            .entry(key.clone())
            .or_insert_with(|| with_key_attributes(key, StoreItem::new()));
        item.extend(fields);
        Ok(())
    }

    async fn put_item(&self, key: &ItemKey, item: StoreItem) -> anyhow::Result<()> {
        self.insert(key.clone(), item);
        Ok(())
    }
}
