use chrono::Utc;
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::{RepoResult, RepositoryError, group_by_parent, inserted_or_ignored};
use crate::entity::{experience, experience_responsibility, experience_skill};
use crate::models::experience::{ExperienceSkillPayload, ResponsibilityPayload};

/// An experience together with its ordered responsibilities and skills.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceWithChildren {
    pub experience: experience::Model,
    pub responsibilities: Vec<experience_responsibility::Model>,
    pub skills: Vec<experience_skill::Model>,
}

pub struct ExperienceRepository {
    db: DatabaseConnection,
}

impl ExperienceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert the experience and both child collections in one transaction.
    ///
    /// Skills repeating a name already attached to the experience are dropped.
    pub async fn create_with_children(
        &self,
        experience: experience::ActiveModel,
        responsibilities: &[ResponsibilityPayload],
        skills: &[ExperienceSkillPayload],
    ) -> RepoResult<ExperienceWithChildren> {
        let txn = self.db.begin().await?;

        let experience = experience.insert(&txn).await?;
        insert_children(&txn, experience.id, responsibilities, skills).await?;
        let (responsibilities, skills) = load_children(&txn, experience.id).await?;

        txn.commit().await?;
        Ok(ExperienceWithChildren {
            experience,
            responsibilities,
            skills,
        })
    }

    pub async fn get_by_id_with_children(&self, id: Uuid) -> RepoResult<ExperienceWithChildren> {
        let experience = experience::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Experience"))?;
        let (responsibilities, skills) = load_children(&self.db, id).await?;

        Ok(ExperienceWithChildren {
            experience,
            responsibilities,
            skills,
        })
    }

    /// Overwrite the experience row and replace both child collections wholesale.
    pub async fn update_with_children(
        &self,
        id: Uuid,
        mut experience: experience::ActiveModel,
        responsibilities: &[ResponsibilityPayload],
        skills: &[ExperienceSkillPayload],
    ) -> RepoResult<ExperienceWithChildren> {
        experience.id = Set(id);
        let txn = self.db.begin().await?;

        find_for_update(&txn, id).await?;
        let experience = experience.update(&txn).await?;

        experience_responsibility::Entity::delete_many()
            .filter(experience_responsibility::Column::ExperienceId.eq(id))
            .exec(&txn)
            .await?;
        experience_skill::Entity::delete_many()
            .filter(experience_skill::Column::ExperienceId.eq(id))
            .exec(&txn)
            .await?;
        insert_children(&txn, id, responsibilities, skills).await?;
        let (responsibilities, skills) = load_children(&txn, id).await?;

        txn.commit().await?;
        Ok(ExperienceWithChildren {
            experience,
            responsibilities,
            skills,
        })
    }

    /// Delete skills, then responsibilities, then the experience.
    pub async fn delete_with_children(&self, id: Uuid) -> RepoResult<()> {
        let txn = self.db.begin().await?;

        find_for_update(&txn, id).await?;
        experience_skill::Entity::delete_many()
            .filter(experience_skill::Column::ExperienceId.eq(id))
            .exec(&txn)
            .await?;
        experience_responsibility::Entity::delete_many()
            .filter(experience_responsibility::Column::ExperienceId.eq(id))
            .exec(&txn)
            .await?;
        experience::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    /// All experiences with children: one query for the parents plus one per
    /// child collection, regardless of how many parents there are.
    pub async fn list_with_children(&self) -> RepoResult<Vec<ExperienceWithChildren>> {
        let experiences = experience::Entity::find()
            .order_by_asc(experience::Column::DisplayOrder)
            .order_by_desc(experience::Column::CreatedAt)
            .all(&self.db)
            .await?;
        if experiences.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = experiences.iter().map(|e| e.id).collect();

        let responsibilities = experience_responsibility::Entity::find()
            .filter(experience_responsibility::Column::ExperienceId.is_in(ids.clone()))
            .order_by_asc(experience_responsibility::Column::DisplayOrder)
            .order_by_asc(experience_responsibility::Column::CreatedAt)
            .all(&self.db)
            .await?;
        let skills = experience_skill::Entity::find()
            .filter(experience_skill::Column::ExperienceId.is_in(ids))
            .order_by_asc(experience_skill::Column::DisplayOrder)
            .order_by_asc(experience_skill::Column::SkillName)
            .all(&self.db)
            .await?;

        let mut responsibilities = group_by_parent(responsibilities, |r| r.experience_id);
        let mut skills = group_by_parent(skills, |s| s.experience_id);

        Ok(experiences
            .into_iter()
            .map(|experience| ExperienceWithChildren {
                responsibilities: responsibilities.remove(&experience.id).unwrap_or_default(),
                skills: skills.remove(&experience.id).unwrap_or_default(),
                experience,
            })
            .collect())
    }
}

async fn find_for_update<C: ConnectionTrait>(conn: &C, id: Uuid) -> RepoResult<experience::Model> {
    experience::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(RepositoryError::NotFound("Experience"))
}

async fn insert_children<C: ConnectionTrait>(
    conn: &C,
    experience_id: Uuid,
    responsibilities: &[ResponsibilityPayload],
    skills: &[ExperienceSkillPayload],
) -> RepoResult<()> {
    let now = Utc::now();

    if !responsibilities.is_empty() {
        let rows = responsibilities
            .iter()
            .map(|r| experience_responsibility::ActiveModel {
                id: Set(Uuid::now_v7()),
                experience_id: Set(experience_id),
                description: Set(r.description.trim().to_string()),
                display_order: Set(r.display_order),
                created_at: Set(now),
            });
        experience_responsibility::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    if !skills.is_empty() {
        let rows = skills.iter().map(|s| experience_skill::ActiveModel {
            id: Set(Uuid::now_v7()),
            experience_id: Set(experience_id),
            skill_name: Set(s.skill_name.trim().to_string()),
            display_order: Set(s.display_order),
        });
        let inserted = inserted_or_ignored(
            experience_skill::Entity::insert_many(rows)
                .on_conflict(
                    OnConflict::columns([
                        experience_skill::Column::ExperienceId,
                        experience_skill::Column::SkillName,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(conn)
                .await,
        )?;
        if inserted < skills.len() as u64 {
            debug!(
                %experience_id,
                submitted = skills.len(),
                inserted,
                "Ignored duplicate experience skills"
            );
        }
    }

    Ok(())
}

async fn load_children<C: ConnectionTrait>(
    conn: &C,
    experience_id: Uuid,
) -> RepoResult<(
    Vec<experience_responsibility::Model>,
    Vec<experience_skill::Model>,
)> {
    let responsibilities = experience_responsibility::Entity::find()
        .filter(experience_responsibility::Column::ExperienceId.eq(experience_id))
        .order_by_asc(experience_responsibility::Column::DisplayOrder)
        .order_by_asc(experience_responsibility::Column::CreatedAt)
        .all(conn)
        .await?;
    let skills = experience_skill::Entity::find()
        .filter(experience_skill::Column::ExperienceId.eq(experience_id))
        .order_by_asc(experience_skill::Column::DisplayOrder)
        .order_by_asc(experience_skill::Column::SkillName)
        .all(conn)
        .await?;
    Ok((responsibilities, skills))
}
