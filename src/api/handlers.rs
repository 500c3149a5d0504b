use crate::api::AppState;
use crate::models::{GetInvoiceQuery, InvoiceData, StoredInvoice, SubmitInvoiceRequest};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 提交响应体
#[derive(Debug, Serialize)]
pub struct SubmitInvoiceResponse {
    pub data: InvoiceData,
    pub invoice_id: String,
}

/// 查询响应体
#[derive(Debug, Serialize)]
pub struct GetInvoiceResponse {
    pub data: StoredInvoice,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 提交发票 PDF 链接
///
/// 校验失败 422，内部失败 500，均无响应体。
pub async fn submit_invoice(
    State(state): State<AppState>,
    payload: Result<Json<SubmitInvoiceRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rejection) => {
            tracing::info!("Rejected invoice submission: {}", rejection.body_text());
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        }
    };

    match state.service.submit(&req.pdf_url).await {
        Ok((data, invoice_id)) => {
            let response = SubmitInvoiceResponse { data, invoice_id };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Invoice extraction failed for {}: {}", req.pdf_url, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// 按ID查询发票
///
/// 记录不存在时仍返回 200，`data` 为空对象。
pub async fn get_invoice(
    State(state): State<AppState>,
    query: Result<Query<GetInvoiceQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::info!("Rejected invoice lookup: {}", rejection.body_text());
            return StatusCode::UNPROCESSABLE_ENTITY.into_response();
        }
    };

    match state.service.fetch(&query.id).await {
        Ok(data) => (StatusCode::OK, Json(GetInvoiceResponse { data })).into_response(),
        Err(e) => {
            tracing::error!("Invoice lookup failed for {}: {}", query.id, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
