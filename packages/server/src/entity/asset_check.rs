use common::CheckStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One inspection run over one asset.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "AssetCheck")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_name = "assetId", indexed)]
    pub asset_id: i32,

    /// Id of the user who ran the inspection.
    pub owner: String,

    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTimeUtc,

    pub status: CheckStatus,

    #[sea_orm(has_many)]
    pub groups: HasMany<super::check_group::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
