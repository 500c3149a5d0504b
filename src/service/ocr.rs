//! PDF 文字识别
//!
//! 先用 `pdftoppm` (poppler-utils) 把每页渲染成 PNG，再逐页交给 `tesseract`。

use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// 从本地 PDF 提取纯文本
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn extract_text(&self, pdf_path: &Path) -> Result<String>;
}

/// 调用本机 tesseract 的识别器
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    pub dpi: u32,
    pub lang: String,
    pub pdftoppm_bin: PathBuf,
    pub tesseract_bin: PathBuf,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            dpi: 300,
            lang: "eng".to_string(),
            pdftoppm_bin: PathBuf::from("pdftoppm"),
            tesseract_bin: PathBuf::from("tesseract"),
        }
    }
}

impl TesseractOcr {
    async fn render_pages(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let output = Command::new(&self.pdftoppm_bin)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(out_dir.join("page"))
            .output()
            .await
            .map_err(|e| AppError::Ocr(format!("failed to run pdftoppm: {}", e)))?;

        if !output.status.success() {
            return Err(AppError::Ocr(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "png") {
                pages.push(path);
            }
        }
        // pdftoppm 输出 page-01.png, page-02.png ... 按文件名即页序
        pages.sort();
        Ok(pages)
    }

    async fn recognize_page(&self, image: &Path) -> Result<String> {
        let output = Command::new(&self.tesseract_bin)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .await
            .map_err(|e| AppError::Ocr(format!("failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            return Err(AppError::Ocr(format!(
                "tesseract failed on {} ({}): {}",
                image.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr)
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TextRecognizer for TesseractOcr {
    async fn extract_text(&self, pdf_path: &Path) -> Result<String> {
        let work_dir = tempfile::tempdir()?;
        let pages = self.render_pages(pdf_path, work_dir.path()).await?;
        if pages.is_empty() {
            return Err(AppError::Ocr("no pages rendered".to_string()));
        }

        tracing::info!("Running OCR on {} page(s) of {}", pages.len(), pdf_path.display());
        let mut texts = Vec::with_capacity(pages.len());
        for page in &pages {
            texts.push(self.recognize_page(page).await?);
        }
        Ok(texts.join("\n"))
    }
}
