use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;
use crate::view::{load_dashboard, Dashboard};

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub dashboard: Dashboard,
    pub notice: Option<String>,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Summary tiles and the most recent projects", body = DashboardResponse)
    ),
    tag = "Projects"
)]
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let (dashboard, notice) = load_dashboard(state.store.as_ref()).await;
    Ok(Json(DashboardResponse { dashboard, notice }))
}
