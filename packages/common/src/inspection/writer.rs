use chrono::Utc;
use tracing::{debug, warn};

use super::error::PipelineError;
use super::store::{ChunkTransaction, InspectionStore, StoreError};
use super::types::{AssetDetail, NewAssetCheck, NewCheckGroup, NewCheckItem, TemplateSet};
use crate::CheckStatus;

pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Rows written by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub chunks: usize,
    pub asset_checks: usize,
    pub check_groups: usize,
    pub check_items: usize,
}

impl WriteSummary {
    fn absorb(&mut self, chunk: WriteSummary) {
        self.chunks += chunk.chunks;
        self.asset_checks += chunk.asset_checks;
        self.check_groups += chunk.check_groups;
        self.check_items += chunk.check_items;
    }
}

/// Writes one AssetCheck tree per asset, one transaction per chunk of assets.
///
/// Each chunk is all-or-nothing. The whole write is not: when a chunk fails
/// it is rolled back and later chunks are never attempted, but earlier
/// chunks stay committed.
pub struct BatchWriter<'a, S: ?Sized> {
    store: &'a S,
    chunk_size: usize,
}

impl<'a, S: InspectionStore + ?Sized> BatchWriter<'a, S> {
    pub fn new(store: &'a S, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: chunk_size.max(1),
        }
    }

    pub async fn write(
        &self,
        assets: &[AssetDetail],
        templates: &TemplateSet,
        owner: &str,
    ) -> Result<WriteSummary, PipelineError> {
        let total_chunks = assets.len().div_ceil(self.chunk_size);
        let mut summary = WriteSummary::default();

        for (chunk, batch) in assets.chunks(self.chunk_size).enumerate() {
            let failed = |source: StoreError| PipelineError::Write {
                chunk,
                total_chunks,
                source,
            };

            let mut txn = self.store.begin().await.map_err(failed)?;

            match write_chunk(txn.as_mut(), batch, templates, owner).await {
                Ok(written) => {
                    if let Err(source) = txn.commit().await {
                        warn!(
                            chunk,
                            total_chunks,
                            committed_chunks = chunk,
                            error = %source,
                            "Commit failed, remaining chunks skipped"
                        );
                        return Err(failed(source));
                    }
                    debug!(
                        chunk,
                        assets = batch.len(),
                        check_groups = written.check_groups,
                        check_items = written.check_items,
                        "Committed chunk"
                    );
                    summary.absorb(written);
                }
                Err(source) => {
                    if let Err(rollback_err) = txn.rollback().await {
                        warn!(chunk, error = %rollback_err, "Rollback failed");
                    }
                    warn!(
                        chunk,
                        total_chunks,
                        committed_chunks = chunk,
                        error = %source,
                        "Rolled back chunk, remaining chunks skipped"
                    );
                    return Err(failed(source));
                }
            }
        }

        Ok(summary)
    }
}

async fn write_chunk(
    txn: &mut dyn ChunkTransaction,
    assets: &[AssetDetail],
    templates: &TemplateSet,
    owner: &str,
) -> Result<WriteSummary, StoreError> {
    let mut written = WriteSummary {
        chunks: 1,
        ..Default::default()
    };

    for asset in assets {
        let asset_check_id = txn
            .insert_asset_check(NewAssetCheck {
                asset_id: asset.id,
                owner: owner.to_string(),
                updated_at: Utc::now(),
                status: CheckStatus::Pass,
            })
            .await?;
        written.asset_checks += 1;

        for group_template in templates.groups_for(asset.category_id) {
            let check_group_id = txn
                .insert_check_group(NewCheckGroup {
                    name: group_template.name.clone(),
                    asset_check_id,
                    status: CheckStatus::Pass,
                })
                .await?;
            written.check_groups += 1;

            for item_template in templates.items_for(group_template.id) {
                txn.insert_check_item(NewCheckItem {
                    name: item_template.name.clone(),
                    check_group_id,
                    status: CheckStatus::Pass,
                    updated_at: Utc::now(),
                })
                .await?;
                written.check_items += 1;
            }
        }
    }

    Ok(written)
}
