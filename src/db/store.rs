use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::{InvoiceData, StoredInvoice};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// 发票存储: 只有新增和按ID读取
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// 保存记录，返回存储分配的ID
    async fn insert(&self, invoice: &InvoiceData) -> Result<String>;

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredInvoice>>;
}

/// PostgreSQL 实现
#[derive(Clone)]
pub struct PgInvoiceStore {
    pool: PgPool,
}

impl PgInvoiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    async fn insert(&self, invoice: &InvoiceData) -> Result<String> {
        let id = queries::insert_invoice(&self.pool, invoice).await?;
        Ok(id.to_string())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredInvoice>> {
        // 非 UUID 的ID不可能对应任何记录，按类型转换失败处理
        let id = Uuid::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))?;

        let row = queries::get_invoice(&self.pool, id).await?;
        if let Some(row) = &row {
            tracing::debug!("Loaded invoice {} created at {}", row.id, row.created_at);
        }
        Ok(row.map(StoredInvoice::from))
    }
}
