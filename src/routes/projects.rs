use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::models::{detail_sections, DetailSection, NewProject, ProjectChanges, ProjectRecord};
use crate::state::AppState;
use crate::view::{self, Filters, ListView, SortDirection, SortKey, ViewState};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive match on client, project name, entry date or number.
    pub search: Option<String>,
    /// Exact client name.
    pub client: Option<String>,
    /// Exact Revit version.
    pub revit_version: Option<String>,
    /// One of `entry_date`, `project_no`, `client`, `project_name`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
}

impl TryFrom<ListQuery> for ViewState {
    type Error = AppError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let sort = match query.sort.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<SortKey>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => SortKey::default(),
        };
        let direction = match query.direction.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<SortDirection>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
            None => SortDirection::default(),
        };

        Ok(ViewState {
            search: query.search.unwrap_or_default(),
            filters: Filters {
                client: query.client,
                revit_version: query.revit_version,
            },
            sort,
            direction,
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct ListResponse {
    #[serde(flatten)]
    pub view: ListView,
    pub visible_count: usize,
    /// Set when the records could not be loaded and the list is empty because of it.
    pub notice: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ProjectDetailResponse {
    pub project: ProjectRecord,
    pub complete: bool,
    pub sections: Vec<DetailSection>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    /// Accepted only when equal to the path parameter.
    pub project_no: Option<i32>,
    #[serde(flatten)]
    pub changes: ProjectChanges,
}

#[utoipa::path(
    get,
    path = "/projects",
    params(ListQuery),
    responses(
        (status = 200, description = "Visible projects with filter options and summary", body = ListResponse),
        (status = 400, description = "Unknown sort field or direction")
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    let view_state = ViewState::try_from(query)?;

    let (records, notice) = match state
        .store
        .fetch_all(view_state.sort, view_state.direction)
        .await
    {
        Ok(records) => (records, None),
        Err(err) => {
            tracing::error!(error = %err, "error fetching projects");
            (Vec::new(), Some("Projects could not be loaded".to_string()))
        }
    };

    let view = view::derive(records, &view_state);
    Ok(Json(ListResponse {
        visible_count: view.projects.len(),
        view,
        notice,
    }))
}

#[utoipa::path(
    get,
    path = "/projects/{project_no}",
    params(
        ("project_no" = i32, Path, description = "Project number")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectDetailResponse),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_no): Path<i32>,
) -> Result<Json<ProjectDetailResponse>, AppError> {
    let project = state.store.fetch_one(project_no).await?;

    Ok(Json(ProjectDetailResponse {
        complete: project.is_complete(),
        sections: detail_sections(&project),
        project,
    }))
}

#[utoipa::path(
    post,
    path = "/projects",
    request_body = NewProject,
    responses(
        (status = 201, description = "Project created", body = ProjectRecord),
        (status = 401, description = "Missing or invalid API key"),
        (status = 422, description = "Rejected by the database, e.g. duplicate project number"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("api_key" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<NewProject>,
) -> Result<(StatusCode, Json<ProjectRecord>), AppError> {
    let project_no = payload.project_no;
    tracing::info!(project_no, "create project request");

    state.store.insert(payload).await?;
    let created = state.store.fetch_one(project_no).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/projects/{project_no}",
    params(
        ("project_no" = i32, Path, description = "Project number")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectRecord),
        (status = 400, description = "Attempt to change the project number"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Rejected by the database"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("api_key" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(project_no): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectRecord>, AppError> {
    tracing::info!(project_no, "update project request");

    if let Some(body_no) = payload.project_no {
        if body_no != project_no {
            return Err(AppError::BadRequest(format!(
                "project_no cannot be changed (path {project_no}, body {body_no})"
            )));
        }
    }

    state.store.update(project_no, payload.changes).await?;
    let updated = state.store.fetch_one(project_no).await?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_no}",
    params(
        ("project_no" = i32, Path, description = "Project number")
    ),
    responses(
        (status = 200, description = "Project deleted"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("api_key" = [])
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_no): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!(project_no, "delete project request");

    state.store.delete(project_no).await?;

    Ok(Json(serde_json::json!({
        "message": format!("Project #{project_no} deleted")
    })))
}
