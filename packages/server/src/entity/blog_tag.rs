use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique_key = "blog_tag_name")]
    pub post_id: Uuid,
    #[sea_orm(belongs_to, from = "post_id", to = "id")]
    pub post: HasOne<super::blog_post::Entity>,

    #[sea_orm(unique_key = "blog_tag_name")]
    pub name: String,

    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
