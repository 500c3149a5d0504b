use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// 约束为 JSON 输出的生成式模型
#[async_trait]
pub trait StructuredModel: Send + Sync {
    /// 返回模型输出的原始文本 (应为 JSON)
    async fn generate_json(&self, prompt: &str) -> Result<String>;
}

/// Gemini generateContent 客户端
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": invoice_schema(),
            }
        })
    }
}

#[async_trait]
impl StructuredModel for GeminiClient {
    async fn generate_json(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        tracing::info!("Requesting structured extraction from {}", self.model);

        // 密钥走请求头，错误信息里也去掉 URL
        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Model(format!("{}: {}", status, body)));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;
        json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AppError::Model("response contained no text candidate".to_string()))
    }
}

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn number(description: &str) -> Value {
    json!({ "type": "NUMBER", "description": description })
}

fn address(kind: &str) -> Value {
    json!({
        "type": "OBJECT",
        "description": format!("The {} address for the customer.", kind),
        "properties": {
            "Street": string(&format!("Street address for {}.", kind)),
            "City": string(&format!("City for {}.", kind)),
            "State": string(&format!("State for {}.", kind)),
            "PostalCode": string(&format!("Postal code for {}.", kind)),
        }
    })
}

/// 模型输出约束: 与 `InvoiceData` 字段一一对应
pub fn invoice_schema() -> Value {
    json!({
        "type": "OBJECT",
        "description": "Schema for extracting invoice information, including customer details, products, and total amount.",
        "properties": {
            "CustomerDetails": {
                "type": "OBJECT",
                "description": "Details about the customer, including name, billing, and shipping addresses.",
                "properties": {
                    "Name": string("The full name of the customer."),
                    "BillingAddress": address("billing"),
                    "Phone": string("Contact phone number of the customer."),
                    "Email": string("Email address of the customer."),
                    "ShippingAddress": address("shipping"),
                }
            },
            "InvoiceDetails": {
                "type": "OBJECT",
                "description": "Details about the invoice, such as the invoice number and date.",
                "properties": {
                    "InvoiceNumber": string("Unique identifier for the invoice."),
                    "Date": string("Date of the invoice, formatted as 'DD MMM YYYY'."),
                    "PlaceOfSupply": string("The place of supply, such as state code or name."),
                }
            },
            "ProductDetails": {
                "type": "ARRAY",
                "description": "Details about the products or services listed on the invoice.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "Description": string("Description of the product or service."),
                        "HSN_SAC": string("HSN or SAC code of the product or service."),
                        "Rate": number("Rate per unit of the product or service."),
                        "Quantity": number("Quantity of the product or service."),
                        "Amount": number("Total amount for the product or service."),
                        "IGST": {
                            "type": "OBJECT",
                            "description": "Integrated Goods and Services Tax (IGST) details.",
                            "properties": {
                                "Rate": string("IGST rate, e.g., '18%'."),
                                "Amount": number("Total IGST amount."),
                            }
                        },
                        "TotalAmount": number("Total amount for the product or service, including tax."),
                    }
                }
            },
            "TotalAmount": {
                "type": "OBJECT",
                "description": "Overall totals for the invoice, including taxable amounts and total payable.",
                "properties": {
                    "TaxableAmount": number("Total taxable amount for the invoice."),
                    "IGST": number("Total IGST amount for the invoice."),
                    "RoundOff": number("Any rounding off value applied to the total amount."),
                    "TotalPayable": number("Total amount payable for the invoice."),
                    "TCS": {
                        "type": "OBJECT",
                        "description": "Tax Collected at Source (TCS) details.",
                        "properties": {
                            "Rate": string("TCS rate, e.g., '1%'."),
                            "Amount": number("Total TCS amount."),
                        }
                    },
                }
            },
        }
    })
}
