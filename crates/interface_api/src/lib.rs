//! HTTP API Layer
//!
//! This crate provides the REST API for participant registration using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: submission, entry context, health
//! - **Middleware**: tracing, request logging, embedding headers
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: `{ success, message }` error bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use core_kernel::CoreError;
use domain_registration::{NotionRecordStore, RecordStorePort, SubmissionService};

use crate::config::{ApiConfig, DEFAULT_CONTENT_SECURITY_POLICY};
use crate::handlers::{entry, health, submit};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: SubmissionService,
    pub config: ApiConfig,
}

impl AppState {
    /// Creates state around an existing record store
    pub fn new(store: Arc<dyn RecordStorePort>, config: ApiConfig) -> Self {
        let service = SubmissionService::with_pacing(store, Arc::new(config.pacing()));
        Self { service, config }
    }

    /// Wires the Notion adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` when credentials are missing or
    /// the HTTP client cannot be built.
    pub fn from_config(config: ApiConfig) -> Result<Self, CoreError> {
        let notion = config.notion_config()?;
        let store = NotionRecordStore::new(notion)
            .map_err(|e| CoreError::configuration(format!("Notion client: {e}")))?;
        Ok(Self::new(Arc::new(store), config))
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Submission service and configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let csp = HeaderValue::from_str(&state.config.content_security_policy()).unwrap_or_else(|_| {
        tracing::warn!(
            frame_ancestors = %state.config.frame_ancestors,
            "Invalid frame ancestors, using defaults"
        );
        HeaderValue::from_static(DEFAULT_CONTENT_SECURITY_POLICY)
    });

    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/submit", post(submit::submit_registrations))
        .route("/entry", get(entry::entry_context));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    csp,
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("ALLOWALL"),
                )),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
