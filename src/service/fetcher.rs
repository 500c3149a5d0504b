use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::Path;

/// 下载远程文件到本地路径
#[async_trait]
pub trait PdfFetcher: Send + Sync {
    /// 已存在的文件直接覆盖
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<()>;
}

/// 基于 reqwest 的下载器
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PdfFetcher for HttpFetcher {
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(AppError::Download)?;
        let body = response.bytes().await.map_err(AppError::Download)?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tracing::info!("Writing downloaded PDF file to {} ({} bytes)", dest.display(), body.len());
        tokio::fs::write(dest, &body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn writes_body_and_overwrites_existing_file() {
        let base = serve(Router::new().route("/test.pdf", get(|| async { "%PDF-1.4 body" }))).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested").join("out.pdf");
        tokio::fs::create_dir_all(dest.parent().unwrap()).await.unwrap();
        tokio::fs::write(&dest, b"stale contents that are longer").await.unwrap();

        HttpFetcher::default()
            .fetch_to(&format!("{}/test.pdf", base), &dest)
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base = serve(Router::new().route("/gone.pdf", get(|| async { StatusCode::NOT_FOUND }))).await;
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");

        let err = HttpFetcher::default()
            .fetch_to(&format!("{}/gone.pdf", base), &dest)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Download(_)));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = HttpFetcher::default()
            .fetch_to("http://127.0.0.1:1/test.pdf", &dir.path().join("out.pdf"))
            .await;
        assert!(matches!(result, Err(AppError::Download(_))));
    }
}
