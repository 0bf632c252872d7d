use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "testimonial")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub avatar_url: Option<String>,
    pub rating: i32, // 1-5

    #[sea_orm(default_value = false)]
    pub is_featured: bool,
    #[sea_orm(default_value = 0)]
    pub display_order: i32,
    #[sea_orm(indexed)]
    pub status: String, // pending | approved | rejected

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
