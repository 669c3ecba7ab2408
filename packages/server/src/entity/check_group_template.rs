use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "CheckGroupTemplates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(column_name = "categoryId", indexed)]
    pub category_id: i32,

    #[sea_orm(has_many)]
    pub items: HasMany<super::check_item_template::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
