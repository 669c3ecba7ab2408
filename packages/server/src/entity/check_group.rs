use common::CheckStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "CheckGroup")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Copied from the template when the check was written.
    pub name: String,

    #[sea_orm(column_name = "assetCheckId", indexed)]
    pub asset_check_id: i32,
    #[sea_orm(belongs_to, from = "asset_check_id", to = "id")]
    pub asset_check: HasOne<super::asset_check::Entity>,

    pub status: CheckStatus,

    #[sea_orm(has_many)]
    pub items: HasMany<super::check_item::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
