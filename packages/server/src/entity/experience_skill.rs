use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A skill name listed under an experience. Unique per experience.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experience_skill")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique_key = "experience_skill_name")]
    pub experience_id: Uuid,
    #[sea_orm(belongs_to, from = "experience_id", to = "id")]
    pub experience: HasOne<super::experience::Entity>,

    #[sea_orm(unique_key = "experience_skill_name")]
    pub skill_name: String,

    #[sea_orm(default_value = 0)]
    pub display_order: i32,
}

impl ActiveModelBehavior for ActiveModel {}
