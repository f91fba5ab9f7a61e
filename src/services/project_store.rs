use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, DatabaseConnection, DbErr, EntityTrait, Order,
    QueryOrder, RuntimeErr, Set, SqlErr,
};
use thiserror::Error;

use crate::entities::project_track::{self, Entity as ProjectTrack};
use crate::models::{NewProject, ProjectChanges, ProjectRecord};
use crate::view::{SortDirection, SortKey};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data access failed: {0}")]
    DataAccess(#[from] DbErr),
    #[error("project {0} not found")]
    NotFound(i32),
    /// The store rejected the row; carries the store's own message.
    #[error("{0}")]
    Validation(String),
}

/// Access to the `project_track` table.
///
/// Every call is one round trip with no caching and no retries.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn fetch_all(
        &self,
        sort: SortKey,
        direction: SortDirection,
    ) -> Result<Vec<ProjectRecord>, StoreError>;

    async fn fetch_one(&self, project_no: i32) -> Result<ProjectRecord, StoreError>;

    async fn insert(&self, project: NewProject) -> Result<(), StoreError>;

    async fn update(&self, project_no: i32, changes: ProjectChanges) -> Result<(), StoreError>;

    async fn delete(&self, project_no: i32) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct SeaOrmProjectStore {
    db: DatabaseConnection,
}

impl SeaOrmProjectStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(sort: SortKey) -> project_track::Column {
    match sort {
        SortKey::EntryDate => project_track::Column::EntryDate,
        SortKey::ProjectNo => project_track::Column::ProjectNo,
        SortKey::Client => project_track::Column::Client,
        SortKey::ProjectName => project_track::Column::ProjectName,
    }
}

/// Anything the database itself rejected becomes a validation error carrying its
/// message. Connection and transport failures stay data access failures.
fn classify(err: DbErr) -> StoreError {
    if let Some(
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg),
    ) = err.sql_err()
    {
        return StoreError::Validation(msg);
    }

    let rejected = match &err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .map(|db_err| db_err.message().to_string()),
        _ => None,
    };
    match rejected {
        Some(msg) => StoreError::Validation(msg),
        None => StoreError::DataAccess(err),
    }
}

/// Empty strings are stored as NULL.
fn normalized(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn apply_changes(active: &mut project_track::ActiveModel, changes: ProjectChanges) {
    let ProjectChanges {
        entry_date,
        client,
        project_name,
        category,
        scanned_by,
        target_delivery_date,
        actual_delivery_date,
        description,
        levels,
        dwg,
        template,
        revit_version,
        arch_emd,
        google_earth_link,
        mep_emd_tier,
        comments,
        file_sharing,
        scanning_date,
        pdf,
        attachments,
    } = changes;

    macro_rules! set_if_some {
        ($($field:ident),* $(,)?) => {
            $(
                if let Some(value) = $field {
                    active.$field = Set(normalized(value));
                }
            )*
        };
    }

    set_if_some!(
        entry_date,
        client,
        project_name,
        category,
        scanned_by,
        target_delivery_date,
        actual_delivery_date,
        description,
        levels,
        dwg,
        template,
        revit_version,
        arch_emd,
        google_earth_link,
        mep_emd_tier,
        comments,
        file_sharing,
        scanning_date,
        pdf,
        attachments,
    );
}

#[async_trait]
impl ProjectStore for SeaOrmProjectStore {
    async fn fetch_all(
        &self,
        sort: SortKey,
        direction: SortDirection,
    ) -> Result<Vec<ProjectRecord>, StoreError> {
        let order = if direction.is_ascending() {
            Order::Asc
        } else {
            Order::Desc
        };
        let rows = ProjectTrack::find()
            .order_by(sort_column(sort), order)
            .all(&self.db)
            .await?;

        tracing::debug!(count = rows.len(), %sort, ?direction, "fetched projects");
        Ok(rows.into_iter().map(ProjectRecord::from).collect())
    }

    async fn fetch_one(&self, project_no: i32) -> Result<ProjectRecord, StoreError> {
        ProjectTrack::find_by_id(project_no)
            .one(&self.db)
            .await?
            .map(ProjectRecord::from)
            .ok_or(StoreError::NotFound(project_no))
    }

    async fn insert(&self, project: NewProject) -> Result<(), StoreError> {
        let NewProject { project_no, fields } = project;
        let mut active = project_track::ActiveModel {
            project_no: Set(project_no),
            ..Default::default()
        };
        apply_changes(&mut active, fields);

        ProjectTrack::insert(active)
            .exec(&self.db)
            .await
            .map_err(classify)?;

        tracing::info!(project_no, "project inserted");
        Ok(())
    }

    async fn update(&self, project_no: i32, changes: ProjectChanges) -> Result<(), StoreError> {
        if changes.is_empty() {
            return self.fetch_one(project_no).await.map(|_| ());
        }

        let mut active = project_track::ActiveModel {
            project_no: Unchanged(project_no),
            ..Default::default()
        };
        apply_changes(&mut active, changes);

        match active.update(&self.db).await {
            Ok(_) => {
                tracing::info!(project_no, "project updated");
                Ok(())
            }
            Err(DbErr::RecordNotUpdated) => Err(StoreError::NotFound(project_no)),
            Err(err) => Err(classify(err)),
        }
    }

    async fn delete(&self, project_no: i32) -> Result<(), StoreError> {
        let result = ProjectTrack::delete_by_id(project_no).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(project_no));
        }

        tracing::info!(project_no, "project deleted");
        Ok(())
    }
}
