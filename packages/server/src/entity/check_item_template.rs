use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "CheckItemsTemplate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// References `CheckGroupTemplates.id`.
    #[sea_orm(column_name = "checkGroupId", indexed)]
    pub check_group_template_id: i32,
    #[sea_orm(belongs_to, from = "check_group_template_id", to = "id")]
    pub group: HasOne<super::check_group_template::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
