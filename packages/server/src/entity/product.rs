use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Join key to `CheckGroupTemplates`.
    #[sea_orm(column_name = "categoryId", indexed)]
    pub category_id: i32,

    #[sea_orm(has_many)]
    pub assets: HasMany<super::asset::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
