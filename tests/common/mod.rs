//! 测试替身: 存储、下载、OCR、模型

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use invoice_extract::error::{AppError, Result};
use invoice_extract::models::{
    Address, CustomerDetails, InvoiceData, InvoiceDetails, ProductDetails, StoredInvoice, Tax,
    TotalAmount,
};
use invoice_extract::service::{
    InvoiceExtractor, PdfFetcher, StructuredModel, TextRecognizer,
};
use invoice_extract::{build_router, AppState, InvoiceService, InvoiceStore};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// 内存存储，ID 为随机 UUID
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, InvoiceData>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl InvoiceStore for MemoryStore {
    async fn insert(&self, invoice: &InvoiceData) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.records
            .lock()
            .unwrap()
            .insert(id.clone(), invoice.clone());
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredInvoice>> {
        Ok(self.records.lock().unwrap().get(id).map(|invoice| StoredInvoice {
            id: Some(id.to_string()),
            invoice: invoice.clone(),
        }))
    }
}

/// 为任意 URL 写入占位 PDF，并记录请求过的 URL
#[derive(Default)]
pub struct StubFetcher {
    pub requests: Mutex<Vec<String>>,
}

#[async_trait]
impl PdfFetcher for StubFetcher {
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<()> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, format!("%PDF stub for {}", url)).await?;
        Ok(())
    }
}

/// 把下载文件内容原样当作识别结果
pub struct FileEchoOcr;

#[async_trait]
impl TextRecognizer for FileEchoOcr {
    async fn extract_text(&self, pdf_path: &Path) -> Result<String> {
        Ok(tokio::fs::read_to_string(pdf_path).await?)
    }
}

/// 固定返回同一段 JSON
pub struct FixedModel(pub String);

#[async_trait]
impl StructuredModel for FixedModel {
    async fn generate_json(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub struct FailingModel;

#[async_trait]
impl StructuredModel for FailingModel {
    async fn generate_json(&self, _prompt: &str) -> Result<String> {
        Err(AppError::Model("503: backend unavailable".into()))
    }
}

pub fn sample_invoice() -> InvoiceData {
    let address = Address {
        street: Some("12 Residency Road".into()),
        city: Some("Bengaluru".into()),
        state: Some("Karnataka".into()),
        postal_code: Some("560025".into()),
    };
    InvoiceData {
        customer_details: Some(CustomerDetails {
            name: Some("Acme Traders".into()),
            phone: Some("+91 80 1234 5678".into()),
            email: Some("accounts@acme.example".into()),
            billing_address: Some(address.clone()),
            shipping_address: Some(address),
        }),
        invoice_details: Some(InvoiceDetails {
            invoice_number: Some("INV-2024-0042".into()),
            date: Some("12 Mar 2024".into()),
            place_of_supply: Some("29-Karnataka".into()),
        }),
        product_details: Some(vec![ProductDetails {
            description: Some("USB-C cable".into()),
            hsn_sac: Some("8544".into()),
            rate: Some(250.0),
            quantity: Some(4.0),
            amount: Some(1000.0),
            igst: Some(Tax {
                rate: Some("18%".into()),
                amount: Some(180.0),
            }),
            total_amount: Some(1180.0),
        }]),
        total_amount: Some(TotalAmount {
            taxable_amount: Some(1000.0),
            igst: Some(180.0),
            round_off: Some(0.0),
            total_payable: Some(1181.18),
            tcs: Some(Tax {
                rate: Some("0.1%".into()),
                amount: Some(1.18),
            }),
        }),
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub output_dir: tempfile::TempDir,
}

impl TestApp {
    pub fn new(fetcher: Arc<dyn PdfFetcher>, model: Arc<dyn StructuredModel>) -> Self {
        let store = Arc::new(MemoryStore::default());
        let output_dir = tempfile::tempdir().unwrap();
        let service = InvoiceService::new(
            fetcher,
            InvoiceExtractor::new(Arc::new(FileEchoOcr), model),
            store.clone(),
            output_dir.path().join("output"),
        );
        let router = build_router(AppState {
            service: Arc::new(service),
        });
        Self {
            router,
            store,
            output_dir,
        }
    }

    /// 占位下载 + 模型固定返回 [`sample_invoice`]
    pub fn with_sample() -> Self {
        let reply = serde_json::to_string(&sample_invoice()).unwrap();
        Self::new(Arc::new(StubFetcher::default()), Arc::new(FixedModel(reply)))
    }

    pub async fn send(&self, request: Request<Body>) -> (axum::http::StatusCode, axum::body::Bytes) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body)
    }

    pub async fn post_json(&self, body: &str) -> (axum::http::StatusCode, axum::body::Bytes) {
        self.send(
            Request::post("/invoice")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, uri: &str) -> (axum::http::StatusCode, axum::body::Bytes) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// 下载目录中残留的文件数
    pub fn leftover_downloads(&self) -> usize {
        std::fs::read_dir(self.output_dir.path().join("output"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}
