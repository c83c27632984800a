use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::CreateRateInput;
use crate::database::repositories::RateRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::payroll;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuery {
    pub employee_id: Uuid,
}

/// Append a new effective rate for an employee (employer only). Earlier
/// entries stay in place as history.
pub async fn create_rate(
    claims: Claims,
    input: web::Json<CreateRateInput>,
    rate_repo: web::Data<RateRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let input = input.into_inner();

    payroll::ensure_positive_rate(&input.hourly_rate)?;

    let effective_from = input
        .effective_from
        .unwrap_or_else(|| Utc::now().date_naive());

    let rate = rate_repo
        .create(
            input.employee_id,
            claims.business_id,
            input.hourly_rate,
            effective_from,
        )
        .await?;

    log::info!(
        "Rate for employee {} set to {} effective {}",
        rate.employee_id,
        rate.hourly_rate,
        rate.effective_from
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(rate)))
}

/// The rate currently in force for an employee. Employees may only look up
/// their own.
pub async fn get_current_rate(
    claims: Claims,
    query: web::Query<RateQuery>,
    rate_repo: web::Data<RateRepository>,
) -> Result<HttpResponse, AppError> {
    if claims.is_employee() {
        claims.require_self(query.employee_id)?;
    }

    let rate = rate_repo
        .current_rate(query.employee_id, claims.business_id, Utc::now().date_naive())
        .await?
        .ok_or_else(|| AppError::not_found("No rate is configured for this employee"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rate)))
}

/// Full rate history for an employee (employer only)
pub async fn get_rate_history(
    claims: Claims,
    query: web::Query<RateQuery>,
    rate_repo: web::Data<RateRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let rates = rate_repo
        .history(query.employee_id, claims.business_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rates)))
}
