use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// URL returned by the storage backend, `None` when the project has no image.
    pub image_url: Option<String>,
    pub demo_url: Option<String>,
    pub code_url: String,

    #[sea_orm(default_value = 0, indexed)]
    pub display_order: i32,
    #[sea_orm(default_value = false)]
    pub is_featured: bool,
    pub status: String,

    #[sea_orm(has_many)]
    pub tags: HasMany<super::project_tag::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
