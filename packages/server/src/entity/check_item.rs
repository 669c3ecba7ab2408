use common::CheckStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "CheckItems")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Copied from the template when the check was written.
    pub name: String,

    #[sea_orm(column_name = "checkGroupId", indexed)]
    pub check_group_id: i32,
    #[sea_orm(belongs_to, from = "check_group_id", to = "id")]
    pub check_group: HasOne<super::check_group::Entity>,

    pub status: CheckStatus,

    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
