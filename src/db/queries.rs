use crate::models::{InvoiceData, InvoiceRow};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// 写入一张发票，返回数据库生成的ID
pub async fn insert_invoice(pool: &PgPool, invoice: &InvoiceData) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO invoices (customer_details, invoice_details, product_details, total_amount)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#
    )
    .bind(invoice.customer_details.as_ref().map(Json))
    .bind(invoice.invoice_details.as_ref().map(Json))
    .bind(invoice.product_details.as_ref().map(Json))
    .bind(invoice.total_amount.as_ref().map(Json))
    .fetch_one(pool)
    .await
}

/// 按ID查询发票
pub async fn get_invoice(pool: &PgPool, id: Uuid) -> Result<Option<InvoiceRow>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT id, customer_details, invoice_details, product_details, total_amount, created_at
        FROM invoices
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
