use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

// 字段全部可选: 数据来自模型对 OCR 文本的尽力抽取，不保证存在或自洽。

/// 地址
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// 客户信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Address>,
}

/// 发票抬头信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// 原样文本，例如 "12 Mar 2024"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_supply: Option<String>,
}

/// 税额子记录 (IGST / TCS)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tax {
    /// 税率文本，例如 "18%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// 商品明细行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HSN/SAC 编码
    #[serde(rename = "HSN_SAC", default, skip_serializing_if = "Option::is_none")]
    pub hsn_sac: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(rename = "IGST", default, skip_serializing_if = "Option::is_none")]
    pub igst: Option<Tax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

/// 汇总金额
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TotalAmount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable_amount: Option<f64>,
    #[serde(rename = "IGST", default, skip_serializing_if = "Option::is_none")]
    pub igst: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_off: Option<f64>,
    /// 不与明细行重新核对
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_payable: Option<f64>,
    #[serde(rename = "TCS", default, skip_serializing_if = "Option::is_none")]
    pub tcs: Option<Tax>,
}

/// 模型抽取出的完整发票记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_details: Option<InvoiceDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_details: Option<Vec<ProductDetails>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<TotalAmount>,
}

/// 查询返回: 存储ID + 四个子记录
///
/// 记录不存在时所有字段为空，序列化为 `{}`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredInvoice {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub invoice: InvoiceData,
}

/// 发票表行 (invoices)
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub id: Uuid,
    pub customer_details: Option<Json<CustomerDetails>>,
    pub invoice_details: Option<Json<InvoiceDetails>>,
    pub product_details: Option<Json<Vec<ProductDetails>>>,
    pub total_amount: Option<Json<TotalAmount>>,
    pub created_at: DateTime<Utc>,
}

impl From<InvoiceRow> for StoredInvoice {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: Some(row.id.to_string()),
            invoice: InvoiceData {
                customer_details: row.customer_details.map(|j| j.0),
                invoice_details: row.invoice_details.map(|j| j.0),
                product_details: row.product_details.map(|j| j.0),
                total_amount: row.total_amount.map(|j| j.0),
            },
        }
    }
}
