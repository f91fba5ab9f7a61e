mod dashboard;
mod home;
mod projects;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::api_key::{require_write_key, API_KEY_HEADER};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::root,
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        dashboard::dashboard,
    ),
    components(
        schemas(
            crate::models::ProjectRecord,
            crate::models::ProjectChanges,
            crate::models::NewProject,
            crate::models::DetailSection,
            crate::models::DetailField,
            crate::models::DetailGroup,
            crate::view::ListView,
            crate::view::Filters,
            crate::view::Summary,
            crate::view::Dashboard,
            crate::view::RecentProject,
            crate::view::ProjectStatus,
            crate::view::SortKey,
            crate::view::SortDirection,
            projects::ListResponse,
            projects::ProjectDetailResponse,
            projects::UpdateProjectRequest,
            dashboard::DashboardResponse,
        )
    ),
    tags(
        (name = "General", description = "General API information"),
        (name = "Projects", description = "Project tracking: list, detail, create, edit, delete and dashboard")
    ),
    info(
        title = "Project Hub API",
        version = "0.1.0",
        description = "Project tracking dashboard over the project_track table",
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Header(
                        utoipa::openapi::security::ApiKeyValue::new(API_KEY_HEADER),
                    ),
                ),
            );
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    // Reads are public; writes pass through the API key check.
    let write_guard = middleware::from_fn_with_state(state.clone(), require_write_key);

    let app_routes = Router::new()
        .route("/", get(home::root))
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/projects",
            get(projects::list_projects)
                .merge(post(projects::create_project).route_layer(write_guard.clone())),
        )
        .route(
            "/projects/{project_no}",
            get(projects::get_project).merge(
                put(projects::update_project)
                    .delete(projects::delete_project)
                    .route_layer(write_guard),
            ),
        )
        .with_state(state);

    Router::new()
        .merge(swagger_router)
        .merge(app_routes)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::api_key::hash_key;
    use crate::services::project_store::tests::{new_project, setup_store, UnreachableStore};
    use crate::services::ProjectStore;

    async fn seeded_app(write_key: Option<&str>) -> Router {
        let store = setup_store().await;
        for (no, client) in [(1, "Acme"), (2, "Acme"), (3, "Beta")] {
            store.insert(new_project(no, client)).await.unwrap();
        }
        create_routes(AppState::new(Arc::new(store), write_key.map(hash_key)))
    }

    fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_applies_search_filters_and_sort() {
        let app = seeded_app(None).await;

        let response = app
            .oneshot(request(
                Method::GET,
                "/projects?client=Acme&sort=project_no&direction=asc",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let numbers: Vec<i64> = body["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["project_no"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(body["visible_count"], 2);
        assert_eq!(body["summary"]["total"], 3);
        assert_eq!(body["summary"]["active_clients"], 2);
        assert_eq!(body["clients"], json!(["Acme", "Beta"]));
        assert!(body["notice"].is_null());
    }

    #[tokio::test]
    async fn list_rejects_unknown_sort() {
        let app = seeded_app(None).await;
        let response = app
            .oneshot(request(Method::GET, "/projects?sort=budget", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_degrades_to_empty_when_store_fails() {
        let app = create_routes(AppState::new(Arc::new(UnreachableStore), None));

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/projects", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["projects"], json!([]));
        assert!(body["notice"].is_string());

        let response = app
            .oneshot(request(Method::GET, "/dashboard", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["summary"]["total"], 0);
        assert!(body["notice"].is_string());
    }

    #[tokio::test]
    async fn detail_returns_sections_or_not_found() {
        let app = seeded_app(None).await;

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/projects/3", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["project"]["client"], "Beta");
        assert_eq!(body["complete"], false);
        assert_eq!(body["sections"][0]["group"], "details");

        let response = app
            .oneshot(request(Method::GET, "/projects/404", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected_and_list_unchanged() {
        let app = seeded_app(None).await;

        let response = app
            .clone()
            .oneshot(request(
                Method::POST,
                "/projects",
                Some(json!({ "project_no": 1, "client": "Intruder" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));

        let response = app
            .oneshot(request(Method::GET, "/projects?sort=project_no&direction=asc", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["summary"]["total"], 3);
        assert_eq!(body["clients"], json!(["Acme", "Beta"]));
    }

    #[tokio::test]
    async fn create_returns_stored_record() {
        let app = seeded_app(None).await;
        let response = app
            .oneshot(request(
                Method::POST,
                "/projects",
                Some(json!({
                    "project_no": 10,
                    "client": "Gamma",
                    "actual_delivery_date": "2024-07-01"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["project_no"], 10);
        assert_eq!(body["client"], "Gamma");
    }

    #[tokio::test]
    async fn edit_keeps_project_no() {
        let app = seeded_app(None).await;

        let response = app
            .clone()
            .oneshot(request(
                Method::PUT,
                "/projects/2",
                Some(json!({ "project_no": 2, "client": "Delta" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["project_no"], 2);
        assert_eq!(body["client"], "Delta");

        let response = app
            .oneshot(request(
                Method::PUT,
                "/projects/2",
                Some(json!({ "project_no": 7, "client": "Echo" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let app = seeded_app(None).await;

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/projects/1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/projects/1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(request(Method::GET, "/projects?sort=project_no", None))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["visible_count"], 2);
    }

    #[tokio::test]
    async fn writes_require_key_when_configured() {
        let app = seeded_app(Some("s3cret")).await;

        let response = app
            .clone()
            .oneshot(request(Method::DELETE, "/projects/1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/projects/1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut delete = request(Method::DELETE, "/projects/1", None);
        delete
            .headers_mut()
            .insert(API_KEY_HEADER, "s3cret".parse().unwrap());
        let response = app.oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = seeded_app(None).await;
        let response = app
            .oneshot(request(Method::GET, "/api-docs/openapi.json", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["paths"]["/projects/{project_no}"].is_object());
    }
}
