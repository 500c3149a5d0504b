use thiserror::Error;

/// 服务内部错误
///
/// 所有外部依赖 (下载、OCR、模型、数据库) 的失败都归到这里，
/// 由 API 层统一转成 500，详细信息只写日志。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("download failed: {0}")]
    Download(#[source] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ocr failed: {0}")]
    Ocr(String),

    #[error("model request failed: {0}")]
    Model(String),

    #[error("model transport error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("invalid model output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("invalid invoice id: {0}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
