use invoice_extract::{
    api, build_router, create_pool, run_migrations, AppConfig, AppState, InvoiceService,
    PgInvoiceStore,
};
use invoice_extract::service::{GeminiClient, HttpFetcher, InvoiceExtractor, TesseractOcr};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // 创建数据库连接池并建表
    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;
    info!("Database pool created");

    // 组装依赖
    let http = reqwest::Client::new();
    let extractor = InvoiceExtractor::new(
        Arc::new(TesseractOcr::default()),
        Arc::new(GeminiClient::new(
            http.clone(),
            config.gemini.api_key.clone(),
            config.gemini.model.clone(),
        )),
    );
    let service = InvoiceService::new(
        Arc::new(HttpFetcher::new(http)),
        extractor,
        Arc::new(PgInvoiceStore::new(pool)),
        config.storage.output_dir.clone(),
    );

    let app = build_router(AppState {
        service: Arc::new(service),
    })
    .layer(api::cors_layer(&config.cors));

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /invoice        - download, OCR and extract a PDF invoice");
    info!("  GET  /invoice?id=... - fetch a stored invoice");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
