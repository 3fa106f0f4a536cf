use std::collections::HashMap;
use std::sync::RwLock;

use storefront_core::ItemRecord;

use super::r#trait::{StockStore, StoreError};

/// In-memory stock store.
///
/// Intended for tests/dev, and as the stand-in stock manager when no upstream
/// URL is configured.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    items: RwLock<HashMap<String, ItemRecord>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: impl IntoIterator<Item = ItemRecord>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.item_name.clone(), item))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Store seeded with the sample post-room stock.
    pub fn demo() -> Self {
        Self::with_items([
            ItemRecord::new("Pencil", 12),
            ItemRecord::new("Pen", 2),
            ItemRecord::new("Brush", 27),
        ])
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("in-memory stock lock poisoned".to_string())
}

#[async_trait::async_trait]
impl StockStore for InMemoryStockStore {
    async fn get_all(&self) -> Result<Vec<ItemRecord>, StoreError> {
        let map = self.items.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    async fn get(&self, item_name: &str) -> Result<Option<ItemRecord>, StoreError> {
        let map = self.items.read().map_err(|_| poisoned())?;
        Ok(map.get(item_name).cloned())
    }

    async fn set(&self, item_name: &str, item_count: i64) -> Result<ItemRecord, StoreError> {
        if item_count < 0 {
            return Err(StoreError::Rejected(format!(
                "stock level for {item_name} cannot be negative ({item_count})"
            )));
        }
        let mut map = self.items.write().map_err(|_| poisoned())?;
        let item = map
            .get_mut(item_name)
            .ok_or_else(|| StoreError::Rejected(format!("unknown item {item_name}")))?;
        item.item_count = item_count;
        Ok(item.clone())
    }
}
