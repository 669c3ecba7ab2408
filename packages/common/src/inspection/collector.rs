use std::collections::BTreeSet;

use super::store::{InspectionStore, StoreError};
use super::types::{AssetDetail, LocationId};

/// Bulk-fetches the assets registered in a set of locations.
pub struct AssetCollector<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: InspectionStore + ?Sized> AssetCollector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn collect(
        &self,
        locations: &BTreeSet<LocationId>,
    ) -> Result<Vec<AssetDetail>, StoreError> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }

        let limit = self.store.max_bind_params().max(1);
        let ids: Vec<LocationId> = locations.iter().copied().collect();

        let mut assets = Vec::new();
        for chunk in ids.chunks(limit) {
            assets.extend(self.store.assets_at(chunk).await?);
        }

        Ok(assets)
    }
}
