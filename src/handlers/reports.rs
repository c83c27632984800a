use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::database::repositories::PaymentRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Per-employee payroll totals over a reporting window (employer only)
pub async fn payroll_report(
    claims: Claims,
    query: web::Query<ReportQuery>,
    payment_repo: web::Data<PaymentRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    if query.start > query.end {
        return Err(AppError::invalid_input("start must not be after end"));
    }

    let rows = payment_repo
        .payroll_report(claims.business_id, query.start, query.end)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}
