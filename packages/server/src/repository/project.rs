use chrono::Utc;
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::{RepoResult, RepositoryError, group_by_parent, inserted_or_ignored};
use crate::entity::{project, project_tag};
use crate::models::project::TagPayload;

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectWithTags {
    pub project: project::Model,
    pub tags: Vec<project_tag::Model>,
}

pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_with_children(
        &self,
        project: project::ActiveModel,
        tags: &[TagPayload],
    ) -> RepoResult<ProjectWithTags> {
        let txn = self.db.begin().await?;

        let project = project.insert(&txn).await?;
        insert_tags(&txn, project.id, tags).await?;
        let tags = load_tags(&txn, project.id).await?;

        txn.commit().await?;
        Ok(ProjectWithTags { project, tags })
    }

    pub async fn get_by_id(&self, id: Uuid) -> RepoResult<project::Model> {
        project::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Project"))
    }

    pub async fn get_by_id_with_children(&self, id: Uuid) -> RepoResult<ProjectWithTags> {
        let project = self.get_by_id(id).await?;
        let tags = load_tags(&self.db, id).await?;
        Ok(ProjectWithTags { project, tags })
    }

    /// Overwrite the set columns of the project. With `Some(tags)` the tag
    /// set is replaced wholesale; with `None` existing tags are kept.
    pub async fn update_with_children(
        &self,
        id: Uuid,
        mut project: project::ActiveModel,
        tags: Option<&[TagPayload]>,
    ) -> RepoResult<ProjectWithTags> {
        project.id = Set(id);
        let txn = self.db.begin().await?;

        find_for_update(&txn, id).await?;
        let project = project.update(&txn).await?;

        if let Some(tags) = tags {
            project_tag::Entity::delete_many()
                .filter(project_tag::Column::ProjectId.eq(id))
                .exec(&txn)
                .await?;
            insert_tags(&txn, id, tags).await?;
        }
        let tags = load_tags(&txn, id).await?;

        txn.commit().await?;
        Ok(ProjectWithTags { project, tags })
    }

    /// Delete the project and its tags, returning the removed row.
    pub async fn delete_with_children(&self, id: Uuid) -> RepoResult<project::Model> {
        let txn = self.db.begin().await?;

        let existing = find_for_update(&txn, id).await?;
        project_tag::Entity::delete_many()
            .filter(project_tag::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        project::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(existing)
    }

    pub async fn list_with_children(&self) -> RepoResult<Vec<ProjectWithTags>> {
        let projects = project::Entity::find()
            .order_by_asc(project::Column::DisplayOrder)
            .order_by_desc(project::Column::CreatedAt)
            .all(&self.db)
            .await?;
        if projects.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();

        let tags = project_tag::Entity::find()
            .filter(project_tag::Column::ProjectId.is_in(ids))
            .order_by_asc(project_tag::Column::DisplayOrder)
            .order_by_asc(project_tag::Column::Name)
            .all(&self.db)
            .await?;
        let mut tags = group_by_parent(tags, |t| t.project_id);

        Ok(projects
            .into_iter()
            .map(|project| ProjectWithTags {
                tags: tags.remove(&project.id).unwrap_or_default(),
                project,
            })
            .collect())
    }

    /// Every tag name in use, alphabetically.
    pub async fn distinct_tags(&self) -> RepoResult<Vec<String>> {
        Ok(project_tag::Entity::find()
            .select_only()
            .column(project_tag::Column::Name)
            .distinct()
            .order_by_asc(project_tag::Column::Name)
            .into_tuple::<String>()
            .all(&self.db)
            .await?)
    }
}

async fn find_for_update<C: ConnectionTrait>(conn: &C, id: Uuid) -> RepoResult<project::Model> {
    project::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(conn)
        .await?
        .ok_or(RepositoryError::NotFound("Project"))
}

async fn insert_tags<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
    tags: &[TagPayload],
) -> RepoResult<()> {
    if tags.is_empty() {
        return Ok(());
    }
    let now = Utc::now();
    let rows = tags.iter().map(|t| project_tag::ActiveModel {
        id: Set(Uuid::now_v7()),
        project_id: Set(project_id),
        name: Set(t.name.trim().to_string()),
        color: Set(t.color.clone()),
        display_order: Set(t.display_order),
        created_at: Set(now),
    });

    let inserted = inserted_or_ignored(
        project_tag::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([project_tag::Column::ProjectId, project_tag::Column::Name])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await,
    )?;
    if inserted < tags.len() as u64 {
        debug!(%project_id, submitted = tags.len(), inserted, "Ignored duplicate project tags");
    }
    Ok(())
}

async fn load_tags<C: ConnectionTrait>(
    conn: &C,
    project_id: Uuid,
) -> RepoResult<Vec<project_tag::Model>> {
    Ok(project_tag::Entity::find()
        .filter(project_tag::Column::ProjectId.eq(project_id))
        .order_by_asc(project_tag::Column::DisplayOrder)
        .order_by_asc(project_tag::Column::Name)
        .all(conn)
        .await?)
}
