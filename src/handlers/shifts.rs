use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::PostedShiftInput;
use crate::database::repositories::{BusinessRepository, ShiftRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::{hours, week_window};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftsQuery {
    pub employee_id: Uuid,
    pub week_start_date: NaiveDate,
}

/// Post a shift on the schedule (employer only). Posting is bounded to the
/// current week through the forward horizon; past weeks are closed.
pub async fn create_shift(
    claims: Claims,
    input: web::Json<PostedShiftInput>,
    business_repo: web::Data<BusinessRepository>,
    shift_repo: web::Data<ShiftRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;
    claims.require_business(input.business_id)?;

    let input = input.into_inner();

    if input.duration_hours <= bigdecimal::BigDecimal::from(0) {
        return Err(AppError::invalid_input("durationHours must be positive"));
    }
    hours::validate_day("shift", &input.duration_hours)?;

    let business = business_repo
        .find_by_id(input.business_id)
        .await?
        .ok_or_else(|| AppError::not_found("Business not found"))?;

    let tz = week_window::resolve_timezone(business.timezone.as_deref());
    let today = week_window::today_in(tz);

    if !week_window::is_shift_postable(input.work_date, today) {
        return Err(AppError::invalid_input(
            "workDate is outside the scheduling window",
        ));
    }

    let shift = shift_repo.create(input).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(shift)))
}

/// List an employee's posted shifts for a week. Employers see any employee
/// of their business; employees only themselves.
pub async fn list_shifts(
    claims: Claims,
    query: web::Query<ShiftsQuery>,
    shift_repo: web::Data<ShiftRepository>,
) -> Result<HttpResponse, AppError> {
    if claims.is_employee() {
        claims.require_self(query.employee_id)?;
    }

    week_window::ensure_week_start(query.week_start_date)?;

    let shifts = shift_repo
        .shifts_for_week(query.employee_id, claims.business_id, query.week_start_date)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(shifts)))
}
