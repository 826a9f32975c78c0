use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::StatusCode, routing::get, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::core::middleware;

use crate::features::categories::{self, CategoryRepository, CategoryService, PgCategoryRepository};
use crate::features::dashboard::{self, DashboardRepository, DashboardService, PgDashboardRepository};
use crate::features::locations::{self, LocationRepository, LocationService, PgLocationRepository};
use crate::features::reports::{self, PgReportRepository, ReportRepository, ReportService};
use crate::features::users::{self, PgUserRepository, UserRepository, UserService};

/// Feature services sharing one set of repositories
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<UserService>,
    pub categories: Arc<CategoryService>,
    pub locations: Arc<LocationService>,
    pub reports: Arc<ReportService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        location_repo: Arc<dyn LocationRepository>,
        report_repo: Arc<dyn ReportRepository>,
        dashboard_repo: Arc<dyn DashboardRepository>,
    ) -> Self {
        let users = Arc::new(UserService::new(user_repo));
        let categories = Arc::new(CategoryService::new(
            Arc::clone(&category_repo),
            Arc::clone(&location_repo),
            Arc::clone(&users),
        ));
        let locations = Arc::new(LocationService::new(
            location_repo,
            category_repo,
            Arc::clone(&users),
        ));
        let reports = Arc::new(ReportService::new(
            Arc::clone(&report_repo),
            Arc::clone(&users),
        ));
        let dashboard = Arc::new(DashboardService::new(dashboard_repo, report_repo));

        Self {
            users,
            categories,
            locations,
            reports,
            dashboard,
        }
    }

    /// Postgres-backed services
    pub fn from_pool(pool: &PgPool) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgCategoryRepository::new(pool.clone())),
            Arc::new(PgLocationRepository::new(pool.clone())),
            Arc::new(PgReportRepository::new(pool.clone())),
            Arc::new(PgDashboardRepository::new(pool.clone())),
        )
    }
}

/// Liveness probe
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Every API route plus `/health`, without docs or HTTP layers
pub fn api_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(locations::routes::routes(Arc::clone(&services.locations)))
        .merge(reports::routes::routes(Arc::clone(&services.reports)))
        .merge(categories::routes::routes(Arc::clone(&services.categories)))
        .merge(users::routes::routes(Arc::clone(&services.users)))
        .merge(dashboard::routes(Arc::clone(&services.dashboard)))
        .route("/health", get(health_check))
}

/// Wrap the app in request ids, tracing, CORS and the JSON body cap.
/// Outermost first; the body cap only touches the JSON extractor so the
/// response body type stays `axum::body::Body` for CORS.
pub fn with_http_layers(router: Router, app: &AppConfig) -> Router {
    let http_layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::cors_layer(app.cors_allowed_origins.clone()))
        .layer(DefaultBodyLimit::max(app.max_request_body_size));

    router.layer(http_layers)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use uuid::Uuid;

    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::geometry::Geometry;
    use crate::shared::test_helpers::{memory_services, test_server, MemoryStore};

    fn point() -> Value {
        json!({"type": "Point", "coordinates": [110.7428, -6.7089]})
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(&MemoryStore::new());
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_default_user_not_found_envelope() {
        let server = test_server(&MemoryStore::new());
        let response = server.get("/api/users/default").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("No users found"));
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_default_user_hides_email() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        let server = test_server(&store);

        let body: Value = server.get("/api/users/default").await.json();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["id"], json!(admin.id));
        assert_eq!(body["data"]["role"], json!("ADMIN"));
        assert!(body["data"].get("email").is_none());
    }

    #[tokio::test]
    async fn test_category_create_and_conflict() {
        let server = test_server(&MemoryStore::new());
        let payload = json!({"name": "Tempat Ibadah", "color": "#10B981"});

        let response = server.post("/api/categories").json(&payload).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["id"], json!("tempat-ibadah"));

        server
            .post("/api/categories")
            .json(&payload)
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .post("/api/categories")
            .json(&json!({"name": "Pasar", "color": "red"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_category_update_rejects_long_icon_and_bad_parent() {
        let store = MemoryStore::new();
        store.seed_category("Pendidikan").await;
        let server = test_server(&store);

        server
            .put("/api/categories/pendidikan")
            .json(&json!({"icon": "i".repeat(101)}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .put("/api/categories/pendidikan")
            .json(&json!({"parentId": "Bukan Slug"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .put("/api/categories/pendidikan")
            .json(&json!({"icon": "school"}))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_location_lifecycle() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        let category = store.seed_category("Kantor Pemerintahan").await;
        let server = test_server(&store);

        let response = server
            .post("/api/locations")
            .json(&json!({
                "name": "Balai Desa",
                "geometry": point(),
                "categoryId": category.id,
                "createdBy": admin.id,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], json!("ACTIVE"));
        assert_eq!(body["data"]["category"]["id"], json!(category.id));
        let id = body["data"]["id"].as_str().unwrap().to_string();

        server
            .put(&format!("/api/locations/{}", id))
            .json(&json!({"address": "Jl. Raya No. 1"}))
            .await
            .assert_status_ok();

        let detail: Value = server.get(&format!("/api/locations/{}", id)).await.json();
        assert_eq!(detail["data"]["address"], json!("Jl. Raya No. 1"));
        let history = detail["data"]["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["action"], json!("UPDATE"));
        assert_eq!(history[1]["action"], json!("CREATE"));

        server
            .delete(&format!("/api/locations/{}", id))
            .add_query_param("userId", admin.id)
            .await
            .assert_status_ok();
        server
            .get(&format!("/api/locations/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_location_bad_input() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        store.seed_category("Pendidikan").await;
        let server = test_server(&store);

        // Out of range longitude
        server
            .post("/api/locations")
            .json(&json!({
                "name": "Sekolah",
                "geometry": {"type": "Point", "coordinates": [200.0, -6.7]},
                "categoryId": "pendidikan",
                "createdBy": admin.id,
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        // Unknown category
        server
            .post("/api/locations")
            .json(&json!({
                "name": "Sekolah",
                "geometry": point(),
                "categoryId": "tidak-ada",
                "createdBy": admin.id,
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        // Malformed body
        let response = server
            .post("/api/locations")
            .json(&json!({"name": "Sekolah"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));

        server
            .get("/api/locations/not-a-uuid")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get(&format!("/api/locations/{}", Uuid::now_v7()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .put(&format!("/api/locations/{}", Uuid::now_v7()))
            .json(&json!({"name": "X"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_location_pagination() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        let category = store.seed_category("UMKM").await;
        for i in 0..25 {
            store
                .seed_location(
                    &format!("Warung {}", i),
                    &category.id,
                    admin.id,
                    Geometry::point(110.74, -6.71),
                )
                .await;
        }
        let server = test_server(&store);

        let body: Value = server
            .get("/api/locations")
            .add_query_param("page", 2)
            .add_query_param("limit", 10)
            .await
            .json();
        assert_eq!(body["data"]["data"].as_array().unwrap().len(), 10);
        assert_eq!(body["data"]["pagination"]["total"], json!(25));
        assert_eq!(body["data"]["pagination"]["totalPages"], json!(3));

        let body: Value = server
            .get("/api/locations")
            .add_query_param("search", "WARUNG 1")
            .await
            .json();
        // "Warung 1" and "Warung 10".."Warung 19"
        assert_eq!(body["data"]["pagination"]["total"], json!(11));
    }

    #[tokio::test]
    async fn test_page_far_past_the_end_is_empty() {
        let store = MemoryStore::new();
        let admin = store.seed_user("admin", UserRole::Admin).await;
        let category = store.seed_category("UMKM").await;
        store
            .seed_location("Warung", &category.id, admin.id, Geometry::point(110.74, -6.71))
            .await;
        let server = test_server(&store);

        for path in ["/api/locations", "/api/reports"] {
            let response = server
                .get(path)
                .add_query_param("page", i64::MAX)
                .await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert!(body["data"]["data"].as_array().unwrap().is_empty());
            assert_eq!(body["data"]["pagination"]["page"], json!(i64::MAX));
        }
    }

    fn layered_server(store: &std::sync::Arc<MemoryStore>, max_body: usize) -> TestServer {
        let app = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: vec!["*".to_string()],
            max_request_body_size: max_body,
        };
        let router = with_http_layers(api_routes(&memory_services(store)), &app);
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_layered_app_sets_request_id_and_cors() {
        let server = layered_server(&MemoryStore::new(), 1024);

        let response = server
            .get("/health")
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://desa.example"),
            )
            .await;
        response.assert_status_ok();
        let request_id = response.header("x-request-id");
        assert!(Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
        assert_eq!(response.header("access-control-allow-origin"), "*");

        // A caller-supplied id is echoed back
        let response = server
            .get("/health")
            .add_header(
                HeaderName::from_static("x-request-id"),
                HeaderValue::from_static("trace-123"),
            )
            .await;
        assert_eq!(response.header("x-request-id"), "trace-123");
    }

    #[tokio::test]
    async fn test_layered_app_caps_json_body() {
        let server = layered_server(&MemoryStore::new(), 128);

        let response = server
            .post("/api/reports")
            .json(&json!({"title": "x".repeat(512), "geometry": point()}))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = response.json();
        assert_eq!(body["success"], json!(false));

        server
            .post("/api/reports")
            .json(&json!({"title": "Jalan rusak", "geometry": point()}))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_report_blank_title_and_long_fields_rejected() {
        let server = test_server(&MemoryStore::new());

        server
            .post("/api/reports")
            .json(&json!({"title": "   ", "geometry": point()}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server
            .post("/api/reports")
            .json(&json!({"title": "Banjir", "geometry": point()}))
            .await
            .json();
        let id = body["data"]["id"].as_str().unwrap().to_string();

        server
            .put(&format!("/api/reports/{}", id))
            .json(&json!({"reporterName": "x".repeat(256)}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .put(&format!("/api/reports/{}", id))
            .json(&json!({"title": " "}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bounds_rejects_inverted_box() {
        let server = test_server(&MemoryStore::new());
        server
            .get("/api/locations/bounds")
            .add_query_param("north", -6.72)
            .add_query_param("south", -6.70)
            .add_query_param("east", 110.75)
            .add_query_param("west", 110.73)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/api/locations/bounds")
            .add_query_param("north", -6.70)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_workflow() {
        let store = MemoryStore::new();
        let operator = store.seed_user("operator", UserRole::Operator).await;
        let server = test_server(&store);

        let response = server
            .post("/api/reports")
            .json(&json!({"title": "Lampu jalan mati", "geometry": point()}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], json!("OPEN"));
        assert!(body["data"]["reportType"].is_null());
        let id = body["data"]["id"].as_str().unwrap().to_string();

        server
            .post(&format!("/api/reports/{}/assign", id))
            .json(&json!({"userId": Uuid::now_v7()}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let body: Value = server
            .post(&format!("/api/reports/{}/assign", id))
            .json(&json!({"userId": operator.id}))
            .await
            .json();
        assert_eq!(body["data"]["status"], json!("IN_PROGRESS"));
        assert_eq!(body["data"]["assignee"]["id"], json!(operator.id));

        let stats: Value = server.get("/api/reports/stats").await.json();
        assert_eq!(stats["data"]["total"], json!(1));
        assert_eq!(stats["data"]["inProgress"], json!(1));

        server
            .delete(&format!("/api/reports/{}", id))
            .await
            .assert_status_ok();
        server
            .delete(&format!("/api/reports/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_chart_has_six_months() {
        let server = test_server(&MemoryStore::new());
        let body: Value = server.get("/api/dashboard/chart").await.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 6);

        let body: Value = server.get("/api/dashboard/stats").await.json();
        assert_eq!(body["data"]["totalLocations"], json!(0));
        assert_eq!(body["data"]["reportsByStatus"].as_array().unwrap().len(), 3);
    }
}
