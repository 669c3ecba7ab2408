use std::collections::BTreeSet;

use tracing::{info, instrument};

use super::collector::AssetCollector;
use super::error::{LookupStage, PipelineError};
use super::expander::LocationExpander;
use super::resolver::TemplateResolver;
use super::store::InspectionStore;
use super::types::{CategoryId, LocationId, PassOutcome, TemplateSet};
use super::writer::{BatchWriter, DEFAULT_CHUNK_SIZE};

/// Marks every asset under a location as passed.
///
/// Expands the location, collects its assets, resolves the check templates
/// for their categories and writes a fresh check tree per asset. Running it
/// twice for the same location writes two independent sets of checks.
pub struct PassAllAssets<'a, S: ?Sized> {
    store: &'a S,
    chunk_size: usize,
}

impl<'a, S: InspectionStore + ?Sized> PassAllAssets<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[instrument(skip(self), fields(chunk_size = self.chunk_size))]
    pub async fn run(
        &self,
        location_id: LocationId,
        user_id: &str,
    ) -> Result<PassOutcome, PipelineError> {
        let locations = LocationExpander::new(self.store)
            .expand(location_id)
            .await
            .map_err(PipelineError::lookup(LookupStage::Locations))?;

        let assets = AssetCollector::new(self.store)
            .collect(&locations)
            .await
            .map_err(PipelineError::lookup(LookupStage::Assets))?;

        info!(
            locations = locations.len(),
            assets = assets.len(),
            "Collected assets under location"
        );

        let mut outcome = PassOutcome {
            locations: locations.len(),
            assets: assets.len(),
            ..Default::default()
        };

        if assets.is_empty() {
            info!("No assets to pass");
            return Ok(outcome);
        }

        let categories: BTreeSet<CategoryId> =
            assets.iter().map(|asset| asset.category_id).collect();
        let templates: TemplateSet = TemplateResolver::new(self.store)
            .resolve(&categories)
            .await?;

        let written = BatchWriter::new(self.store, self.chunk_size)
            .write(&assets, &templates, user_id)
            .await?;

        outcome.chunks = written.chunks;
        outcome.asset_checks = written.asset_checks;
        outcome.check_groups = written.check_groups;
        outcome.check_items = written.check_items;

        info!(
            chunks = outcome.chunks,
            asset_checks = outcome.asset_checks,
            check_groups = outcome.check_groups,
            check_items = outcome.check_items,
            "Passed all assets"
        );

        Ok(outcome)
    }
}
