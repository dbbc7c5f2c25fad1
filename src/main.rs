use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hr_finance_sync::database::DatabaseManager;
use hr_finance_sync::handlers::{designations, employees};
use hr_finance_sync::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = hr_finance_sync::config::config();
    tracing::info!("Starting HR finance sync in {:?} mode", config.environment);

    // The pool is lazy, so a missing database shows up on /health rather
    // than blocking startup; migrations are retried there too on next boot.
    match DatabaseManager::migrate().await {
        Ok(()) => {}
        Err(e) => tracing::error!(error = %e, "could not run migrations; database may be unavailable"),
    }

    let pool = match DatabaseManager::pool().await {
        Ok(pool) => pool,
        Err(e) => panic!("failed to initialize database pool: {}", e),
    };

    let app = app(AppState::postgres(pool));

    // Allow tests or deployments to override port via env
    let port = std::env::var("HR_SYNC_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 HR finance sync server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // HR push + admin surface
        .merge(designation_routes(state.clone()))
        .merge(employee_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn designation_routes(state: AppState) -> Router {
    Router::new()
        // HR -> Finance sync route
        .route("/designations/add/designation", post(designations::sync_post))
        .route("/designations", get(designations::list_get))
        .route("/designations/active", get(designations::active_get))
        .route("/designations/:id", get(designations::show_get))
        .with_state(state)
}

fn employee_routes(state: AppState) -> Router {
    Router::new()
        // HR -> Finance sync routes
        .route("/employees/add/employees", post(employees::hr_sync_post))
        .route("/employees/update/status", post(employees::status_sync_post))
        // Admin surface (reads require a Bearer token)
        .route("/employees", get(employees::list_get))
        .route(
            "/employees/:id",
            get(employees::show_get)
                .put(employees::update_put)
                .delete(employees::delete_delete),
        )
        .route("/employees/status/:status", get(employees::by_status_get))
        .route("/employees/search/all", get(employees::search_get))
        .route("/employees/stats/overview", get(employees::stats_get))
        .route("/employees/bulk/status", post(employees::bulk_status_post))
        .with_state(state)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "HR Finance Sync",
            "version": version,
            "description": "HR-to-Finance employee synchronization API",
            "endpoints": {
                "home": "/ (public)",
                "designations": "/designations[/:id], /designations/active, /designations/add/designation",
                "employees": "/employees[/:id], /employees/add/employees, /employees/update/status",
                "search": "/employees/search/all?query= (protected)",
                "stats": "/employees/stats/overview (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
