use crate::error::Result;
use crate::models::InvoiceData;
use crate::service::gemini::StructuredModel;
use crate::service::ocr::TextRecognizer;
use std::path::Path;
use std::sync::Arc;

/// OCR + 生成式模型 -> 结构化发票
#[derive(Clone)]
pub struct InvoiceExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    model: Arc<dyn StructuredModel>,
}

impl InvoiceExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, model: Arc<dyn StructuredModel>) -> Self {
        Self { recognizer, model }
    }

    /// 识别 PDF 文字并交给模型抽取；模型输出只做 JSON 解析，不做业务校验
    pub async fn extract(&self, pdf_path: &Path) -> Result<InvoiceData> {
        let text = self.recognizer.extract_text(pdf_path).await?;
        tracing::debug!("OCR text for {}:\n{}", pdf_path.display(), text);

        let raw = self.model.generate_json(&build_prompt(&text)).await?;
        tracing::debug!("Model output: {}", raw);

        Ok(serde_json::from_str(&raw)?)
    }
}

pub fn build_prompt(ocr_text: &str) -> String {
    format!(
        "Role: You are a working professional who extracts data from invoice pdfs.\n\
         Task: Extract relevant details like:\n\
         \x20       - Customer details\n\
         \x20       - Products\n\
         \x20       - Amount details and total amount\n\
         Input: OCR text of invoice: {}\n\
         OutputFormat: JSON\n",
        ocr_text
    )
}
