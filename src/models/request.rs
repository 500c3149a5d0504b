use serde::{de, Deserialize, Deserializer};

/// 请求体: 提交 PDF 链接
///
/// 严格校验: 多余字段或类型不符直接拒绝。
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitInvoiceRequest {
    #[serde(deserialize_with = "non_empty")]
    pub pdf_url: String,
}

/// 查询参数: 发票ID
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetInvoiceQuery {
    #[serde(deserialize_with = "non_empty")]
    pub id: String,
}

/// 空字符串视为校验失败
fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&value),
            &"a non-empty string",
        ));
    }
    Ok(value)
}
