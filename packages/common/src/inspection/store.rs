use async_trait::async_trait;
use thiserror::Error;

use super::types::{
    AssetDetail, CategoryId, CheckGroupTemplate, CheckItemTemplate, GroupTemplateId, LocationId,
    NewAssetCheck, NewCheckGroup, NewCheckItem,
};

/// Parameter-count limit used when a store does not report its own.
pub const DEFAULT_MAX_BIND_PARAMS: usize = 1000;

/// Errors raised by an [`InspectionStore`] or one of its transactions.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("write rejected: {0}")]
    Rejected(String),
}

#[cfg(feature = "sea-orm")]
impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Storage capability injected into every pipeline component.
///
/// Lookups take id slices that callers keep within [`max_bind_params`]
/// entries; writes only happen through a [`ChunkTransaction`].
///
/// [`max_bind_params`]: InspectionStore::max_bind_params
#[async_trait]
pub trait InspectionStore: Send + Sync {
    /// Ids of every location whose parent is one of `parents`.
    async fn child_locations(
        &self,
        parents: &[LocationId],
    ) -> Result<Vec<LocationId>, StoreError>;

    /// Assets registered at any of `locations`, joined to their product's category.
    async fn assets_at(&self, locations: &[LocationId]) -> Result<Vec<AssetDetail>, StoreError>;

    async fn group_templates(
        &self,
        categories: &[CategoryId],
    ) -> Result<Vec<CheckGroupTemplate>, StoreError>;

    async fn item_templates(
        &self,
        groups: &[GroupTemplateId],
    ) -> Result<Vec<CheckItemTemplate>, StoreError>;

    /// Open a transaction scope for one chunk of writes.
    async fn begin(&self) -> Result<Box<dyn ChunkTransaction>, StoreError>;

    /// Maximum number of ids passed to a single lookup.
    fn max_bind_params(&self) -> usize {
        DEFAULT_MAX_BIND_PARAMS
    }
}

/// A single atomic unit of writes.
///
/// Dropping a scope without calling [`commit`](ChunkTransaction::commit)
/// discards everything written through it.
#[async_trait]
pub trait ChunkTransaction: Send {
    /// Insert an asset check and return its generated id.
    async fn insert_asset_check(&mut self, row: NewAssetCheck) -> Result<i32, StoreError>;

    /// Insert a check group and return its generated id.
    async fn insert_check_group(&mut self, row: NewCheckGroup) -> Result<i32, StoreError>;

    /// Insert a check item and return its generated id.
    async fn insert_check_item(&mut self, row: NewCheckItem) -> Result<i32, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    async fn rollback(self: Box<Self>) -> Result<(), StoreError>;
}
