use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// NULL for root locations.
    #[sea_orm(column_name = "parentId", indexed)]
    pub parent_id: Option<i32>,
}

impl ActiveModelBehavior for ActiveModel {}
