pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;

pub use api::{build_router, cors_layer, AppState};
pub use config::AppConfig;
pub use db::{create_pool, run_migrations, InvoiceStore, PgInvoiceStore};
pub use error::AppError;
pub use service::InvoiceService;
