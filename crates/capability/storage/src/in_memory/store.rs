//! 店铺内存存储实现

use super::{InMemoryCatalog, sort_newest_first};
use crate::error::StorageError;
use crate::models::{StoreRecord, StoreUpdate, now_epoch_ms};
use crate::traits::StoreStore;
use crate::validation::ensure_scope;
use domain::{CallerIdentity, StoreScope};

#[async_trait::async_trait]
impl StoreStore for InMemoryCatalog {
    async fn list_stores(&self, owner: &CallerIdentity) -> Result<Vec<StoreRecord>, StorageError> {
        let tables = self.read()?;
        let mut stores: Vec<StoreRecord> = tables
            .stores
            .values()
            .filter(|store| store.user_id == owner.user_id())
            .cloned()
            .collect();
        sort_newest_first(&mut stores, |store| (store.created_at_ms, store.store_id.as_str()));
        Ok(stores)
    }

    async fn find_store(&self, store_id: &str) -> Result<Option<StoreRecord>, StorageError> {
        let tables = self.read()?;
        Ok(tables.stores.get(store_id).cloned())
    }

    async fn find_owned_store(
        &self,
        owner: &CallerIdentity,
        store_id: &str,
    ) -> Result<Option<StoreRecord>, StorageError> {
        let tables = self.read()?;
        let store = tables
            .stores
            .get(store_id)
            .filter(|store| store.user_id == owner.user_id())
            .cloned();
        Ok(store)
    }

    async fn create_store(
        &self,
        owner: &CallerIdentity,
        record: StoreRecord,
    ) -> Result<StoreRecord, StorageError> {
        if record.user_id != owner.user_id() {
            return Err(StorageError::new("owner mismatch"));
        }
        let mut tables = self.write()?;
        if tables.stores.contains_key(&record.store_id) {
            return Err(StorageError::new("store exists"));
        }
        tables
            .stores
            .insert(record.store_id.clone(), record.clone());
        Ok(record)
    }

    async fn update_store(
        &self,
        scope: &StoreScope,
        update: StoreUpdate,
    ) -> Result<Option<StoreRecord>, StorageError> {
        ensure_scope(scope)?;
        let mut tables = self.write()?;
        let store = match tables.stores.get_mut(&scope.store_id) {
            Some(store) if store.user_id == scope.user_id => store,
            _ => return Ok(None),
        };
        store.name = update.name;
        store.updated_at_ms = now_epoch_ms();
        Ok(Some(store.clone()))
    }

    async fn delete_store(&self, scope: &StoreScope) -> Result<Option<StoreRecord>, StorageError> {
        ensure_scope(scope)?;
        let mut tables = self.write()?;
        match tables.stores.get(&scope.store_id) {
            Some(store) if store.user_id == scope.user_id => {}
            _ => return Ok(None),
        }
        let store_id = scope.store_id.as_str();
        tables.products.retain(|_, item| item.store_id != store_id);
        tables.categories.retain(|_, item| item.store_id != store_id);
        tables.billboards.retain(|_, item| item.store_id != store_id);
        tables.sizes.retain(|_, item| item.store_id != store_id);
        tables.colors.retain(|_, item| item.store_id != store_id);
        Ok(tables.stores.remove(store_id))
    }
}
