pub mod handlers;

pub use handlers::{get_invoice, health_check, submit_invoice};

use crate::config::CorsConfig;
use crate::service::InvoiceService;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InvoiceService>,
}

/// 构建路由 (不含 CORS)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/invoice", post(submit_invoice).get(get_invoice))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// 只放行配置中的来源，`*` 表示全部
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}
