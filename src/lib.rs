pub mod api;
pub mod config;
pub mod services;
pub mod utils;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ConverterConfig;
use crate::services::converter::Converter;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::convert::convert_file,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            services::report::RenderPayload,
            services::report::SizeRow,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "convert", description = "File-to-text conversion"),
        (name = "system", description = "Service health")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: ConverterConfig,
    pub converter: Arc<dyn Converter>,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::page::index))
        .route("/convert", post(api::handlers::convert::convert_file))
        .route("/health", get(api::handlers::health::health_check))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .with_state(state)
}
