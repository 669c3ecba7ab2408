use async_trait::async_trait;
use common::inspection::types::{
    AssetDetail, CategoryId, CheckGroupTemplate, CheckItemTemplate, GroupTemplateId, LocationId,
    NewAssetCheck, NewCheckGroup, NewCheckItem,
};
use common::inspection::{ChunkTransaction, InspectionStore, StoreError};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::entity::{
    asset, asset_check, check_group, check_group_template, check_item, check_item_template,
    location, product,
};

/// [`InspectionStore`] over a SeaORM connection pool.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    max_bind_params: usize,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection, max_bind_params: usize) -> Self {
        Self {
            db,
            max_bind_params,
        }
    }
}

#[async_trait]
impl InspectionStore for SeaOrmStore {
    async fn child_locations(
        &self,
        parents: &[LocationId],
    ) -> Result<Vec<LocationId>, StoreError> {
        let ids = location::Entity::find()
            .select_only()
            .column(location::Column::Id)
            .filter(location::Column::ParentId.is_in(parents.to_vec()))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn assets_at(&self, locations: &[LocationId]) -> Result<Vec<AssetDetail>, StoreError> {
        let rows = asset::Entity::find()
            .filter(asset::Column::LocationId.is_in(locations.to_vec()))
            .find_also_related(product::Entity)
            .order_by_asc(asset::Column::Id)
            .all(&self.db)
            .await?;

        // Assets without a product have no category and are skipped, as an inner join would.
        Ok(rows
            .into_iter()
            .filter_map(|(asset, product)| {
                product.map(|product| AssetDetail {
                    id: asset.id,
                    product_id: product.id,
                    category_id: product.category_id,
                })
            })
            .collect())
    }

    async fn group_templates(
        &self,
        categories: &[CategoryId],
    ) -> Result<Vec<CheckGroupTemplate>, StoreError> {
        let rows = check_group_template::Entity::find()
            .filter(check_group_template::Column::CategoryId.is_in(categories.to_vec()))
            .order_by_asc(check_group_template::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CheckGroupTemplate {
                id: row.id,
                name: row.name,
                category_id: row.category_id,
            })
            .collect())
    }

    async fn item_templates(
        &self,
        groups: &[GroupTemplateId],
    ) -> Result<Vec<CheckItemTemplate>, StoreError> {
        let rows = check_item_template::Entity::find()
            .filter(check_item_template::Column::CheckGroupTemplateId.is_in(groups.to_vec()))
            .order_by_asc(check_item_template::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| CheckItemTemplate {
                id: row.id,
                name: row.name,
                check_group_template_id: row.check_group_template_id,
            })
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn ChunkTransaction>, StoreError> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaOrmChunk { txn }))
    }

    fn max_bind_params(&self) -> usize {
        self.max_bind_params
    }
}

/// One chunk's transaction. SeaORM rolls the transaction back if it is
/// dropped before commit.
struct SeaOrmChunk {
    txn: DatabaseTransaction,
}

#[async_trait]
impl ChunkTransaction for SeaOrmChunk {
    async fn insert_asset_check(&mut self, row: NewAssetCheck) -> Result<i32, StoreError> {
        let model = asset_check::ActiveModel {
            asset_id: Set(row.asset_id),
            owner: Set(row.owner),
            updated_at: Set(row.updated_at),
            status: Set(row.status),
            ..Default::default()
        }
        .insert(&self.txn)
        .await?;

        Ok(model.id)
    }

    async fn insert_check_group(&mut self, row: NewCheckGroup) -> Result<i32, StoreError> {
        let model = check_group::ActiveModel {
            name: Set(row.name),
            asset_check_id: Set(row.asset_check_id),
            status: Set(row.status),
            ..Default::default()
        }
        .insert(&self.txn)
        .await?;

        Ok(model.id)
    }

    async fn insert_check_item(&mut self, row: NewCheckItem) -> Result<i32, StoreError> {
        let model = check_item::ActiveModel {
            name: Set(row.name),
            check_group_id: Set(row.check_group_id),
            status: Set(row.status),
            updated_at: Set(row.updated_at),
            ..Default::default()
        }
        .insert(&self.txn)
        .await?;

        Ok(model.id)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        self.txn.rollback().await?;
        Ok(())
    }
}
