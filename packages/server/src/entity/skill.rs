use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "skill")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub value: i32, // proficiency, 0-100
    pub icon_url: Option<String>,
    #[sea_orm(indexed)]
    pub category: String,

    #[sea_orm(default_value = 0)]
    pub display_order: i32,
    #[sea_orm(default_value = false)]
    pub is_featured: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
