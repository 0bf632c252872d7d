use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "education_achievement")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub education_id: Uuid,
    #[sea_orm(belongs_to, from = "education_id", to = "id")]
    pub education: HasOne<super::education::Entity>,

    #[sea_orm(column_type = "Text")]
    pub achievement: String,

    #[sea_orm(default_value = 0)]
    pub display_order: i32,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
