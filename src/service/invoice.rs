use crate::db::InvoiceStore;
use crate::error::Result;
use crate::models::{InvoiceData, StoredInvoice};
use crate::service::extractor::InvoiceExtractor;
use crate::service::fetcher::PdfFetcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// 发票提交/查询服务
pub struct InvoiceService {
    fetcher: Arc<dyn PdfFetcher>,
    extractor: InvoiceExtractor,
    store: Arc<dyn InvoiceStore>,
    output_dir: PathBuf,
}

impl InvoiceService {
    pub fn new(
        fetcher: Arc<dyn PdfFetcher>,
        extractor: InvoiceExtractor,
        store: Arc<dyn InvoiceStore>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            store,
            output_dir: output_dir.into(),
        }
    }

    /// 下载 -> 识别抽取 -> 入库，返回抽取结果和存储ID
    pub async fn submit(&self, pdf_url: &str) -> Result<(InvoiceData, String)> {
        let process_id = Uuid::new_v4().simple().to_string();
        let download = DownloadedFile::new(self.output_dir.join(format!("{}.pdf", process_id)));

        tracing::info!("Processing {} as {}", pdf_url, process_id);
        let result = self.process(pdf_url, download.path()).await;
        download.remove().await;

        let (invoice, invoice_id) = result?;
        tracing::info!("Process {} stored invoice {}", process_id, invoice_id);
        Ok((invoice, invoice_id))
    }

    async fn process(&self, pdf_url: &str, pdf_path: &Path) -> Result<(InvoiceData, String)> {
        self.fetcher.fetch_to(pdf_url, pdf_path).await?;
        let invoice = self.extractor.extract(pdf_path).await?;
        let invoice_id = self.store.insert(&invoice).await?;
        Ok((invoice, invoice_id))
    }

    /// 按ID查询；不存在时返回空记录 (所有字段缺省)
    pub async fn fetch(&self, id: &str) -> Result<StoredInvoice> {
        match self.store.find_by_id(id).await? {
            Some(invoice) => Ok(invoice),
            None => {
                tracing::warn!("Invoice {} not found", id);
                Ok(StoredInvoice::default())
            }
        }
    }
}

/// 下载文件的作用域守卫
///
/// 正常路径由 `remove` 异步删除；请求被取消时由 `Drop` 兜底同步删除。
struct DownloadedFile {
    path: PathBuf,
    removed: bool,
}

impl DownloadedFile {
    fn new(path: PathBuf) -> Self {
        Self { path, removed: false }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    async fn remove(mut self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
        self.removed = true;
    }
}

impl Drop for DownloadedFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", self.path.display(), e),
        }
    }
}
