use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experience")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,
    pub company: String,
    pub location: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub current_job: bool,

    #[sea_orm(default_value = 0, indexed)]
    pub display_order: i32,

    #[sea_orm(has_many)]
    pub responsibilities: HasMany<super::experience_responsibility::Entity>,

    #[sea_orm(has_many)]
    pub skills: HasMany<super::experience_skill::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
