use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod common;
mod logs;
mod run;
mod services;
mod system;

pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Cluster
        .route("/info", get(system::get_info))
        .route("/config", get(system::get_config))
        .route("/health", get(system::get_health))
        // Services
        .route(
            "/services",
            get(services::list_services)
                .post(services::create_service)
                .put(services::update_service),
        )
        .route(
            "/services/:name",
            get(services::get_service).delete(services::delete_service),
        )
        // Logs
        .route(
            "/logs/:name",
            get(logs::list_jobs).delete(logs::delete_jobs),
        )
        .route(
            "/logs/:name/:job",
            get(logs::get_job_log).delete(logs::delete_job_log),
        )
        // Run
        .route("/run/:name", post(run::run_service))
        // Health
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}
