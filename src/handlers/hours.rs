use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{
    ConfirmedHoursRecord, ConfirmedHoursStatus, CreateConfirmedHoursInput, DayHours,
    RejectHoursInput, UpdateConfirmedHoursInput,
};
use crate::database::repositories::{BusinessRepository, ConfirmedHoursRepository, ShiftRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::schedule::{self, WeeklyHours};
use crate::services::{hours, week_window};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHoursQuery {
    pub business_id: Uuid,
    pub week_start_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub employee_id: Option<Uuid>,
    pub status: Option<String>,
}

/// The week as the employee's timesheet screen needs it: the confirmed
/// record when one exists, the scheduled baseline, and the values an edit
/// form should start from.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyHoursView {
    pub week_start_date: NaiveDate,
    pub confirmed: Option<ConfirmedHoursRecord>,
    pub scheduled: WeeklyHours,
    pub prefill: DayHours,
    pub editable: bool,
}

/// Get the weekly hours view for the calling employee
pub async fn get_weekly_hours(
    claims: Claims,
    query: web::Query<WeeklyHoursQuery>,
    business_repo: web::Data<BusinessRepository>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
    shift_repo: web::Data<ShiftRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employee()?;
    claims.require_business(query.business_id)?;

    week_window::ensure_week_start(query.week_start_date)?;

    let business = business_repo
        .find_by_id(query.business_id)
        .await?
        .ok_or_else(|| AppError::not_found("Business not found"))?;

    let tz = week_window::resolve_timezone(business.timezone.as_deref());
    let today = week_window::today_in(tz);

    if !week_window::is_addressable(query.week_start_date, today) {
        return Err(AppError::invalid_input(
            "weekStartDate is beyond the scheduling horizon",
        ));
    }

    let confirmed = hours_repo
        .find_by_week(claims.user_id(), query.business_id, query.week_start_date)
        .await?;

    let durations = shift_repo
        .durations_for_range(
            claims.user_id(),
            query.business_id,
            query.week_start_date,
            query.week_start_date + chrono::Duration::days(6),
        )
        .await?;
    let scheduled = schedule::aggregate_week(query.week_start_date, &durations);

    let prefill = match &confirmed {
        Some(record) => DayHours::from_array(record.day_hours().map(|d| d.clone())),
        None => hours::prefill_from_schedule(&scheduled),
    };

    let editable = week_window::is_hours_editable(query.week_start_date, today)
        && confirmed.as_ref().map_or(true, |r| r.is_editable());

    let view = WeeklyHoursView {
        week_start_date: query.week_start_date,
        confirmed,
        scheduled,
        prefill,
        editable,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// Create a draft hours record for a week (employee only)
pub async fn create_hours(
    claims: Claims,
    input: web::Json<CreateConfirmedHoursInput>,
    business_repo: web::Data<BusinessRepository>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
    shift_repo: web::Data<ShiftRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employee()?;
    claims.require_business(input.business_id)?;

    let input = input.into_inner();

    week_window::ensure_week_start(input.week_start_date)?;

    let business = business_repo
        .find_by_id(input.business_id)
        .await?
        .ok_or_else(|| AppError::not_found("Business not found"))?;

    let tz = week_window::resolve_timezone(business.timezone.as_deref());
    let today = week_window::today_in(tz);

    if !week_window::is_hours_editable(input.week_start_date, today) {
        return Err(AppError::invalid_input(
            "weekStartDate is outside the editable window",
        ));
    }

    let days = match input.day_hours {
        Some(days) => {
            hours::validate_week(&days)?;
            days
        }
        None => {
            // Seed from the posted schedule
            let durations = shift_repo
                .durations_for_range(
                    claims.user_id(),
                    input.business_id,
                    input.week_start_date,
                    input.week_start_date + chrono::Duration::days(6),
                )
                .await?;
            hours::prefill_from_schedule(&schedule::aggregate_week(
                input.week_start_date,
                &durations,
            ))
        }
    };

    let total = hours::week_total(&days);

    let record = hours_repo
        .create(
            claims.user_id(),
            input.business_id,
            input.week_start_date,
            &days,
            total,
            input.notes,
        )
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::conflict(
                "An hours record already exists for this week",
            ),
            other => other,
        })?;

    log::info!(
        "Hours record {} created for employee {} week {}",
        record.id,
        record.employee_id,
        record.week_start_date
    );

    Ok(HttpResponse::Created().json(ApiResponse::success(record)))
}

/// Update the day hours of a draft or rejected record (employee only)
pub async fn update_hours(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<UpdateConfirmedHoursInput>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employee()?;

    let record_id = path.into_inner();
    let input = input.into_inner();

    let record = hours_repo
        .find_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::not_found("Hours record not found"))?;

    claims.require_business(record.business_id)?;
    claims.require_self(record.employee_id)?;

    if !record.is_editable() {
        return Err(AppError::conflict(format!(
            "Hours can only be edited in draft or rejected status; current status is {}",
            record.status
        )));
    }

    hours::validate_week(&input.day_hours)?;
    let total = hours::week_total(&input.day_hours);

    let updated = hours_repo
        .update_content(record_id, &input.day_hours, total, input.notes)
        .await?
        .ok_or_else(|| {
            AppError::conflict("Hours record is no longer editable")
        })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

/// Submit a draft or rejected record for review (employee only)
pub async fn submit_hours(
    claims: Claims,
    path: web::Path<Uuid>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employee()?;

    let record_id = path.into_inner();

    let record = hours_repo
        .find_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::not_found("Hours record not found"))?;

    claims.require_business(record.business_id)?;
    claims.require_self(record.employee_id)?;

    let submitted = hours_repo.submit(record_id).await?.ok_or_else(|| {
        AppError::conflict(format!(
            "Only draft or rejected hours can be submitted; current status is {}",
            record.status
        ))
    })?;

    log::info!(
        "Hours record {} submitted by employee {}",
        submitted.id,
        submitted.employee_id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(submitted)))
}

/// List hours records for the caller's business (employer only)
pub async fn list_review(
    claims: Claims,
    query: web::Query<ReviewQuery>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let status = match &query.status {
        Some(status_str) => match status_str.parse::<ConfirmedHoursStatus>() {
            Ok(status) => Some(status),
            Err(_) => return Err(AppError::invalid_input("Invalid status filter")),
        },
        None => None,
    };

    let records = hours_repo
        .list_for_business(claims.business_id, query.employee_id, status)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
}

/// Approve a submitted record (employer only)
pub async fn approve_hours(
    claims: Claims,
    path: web::Path<Uuid>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let record_id = path.into_inner();

    let record = hours_repo
        .find_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::not_found("Hours record not found"))?;

    claims.require_business(record.business_id)?;

    let approved = hours_repo
        .approve(record_id, claims.user_id())
        .await?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Only submitted hours can be approved; current status is {}",
                record.status
            ))
        })?;

    log::info!(
        "Hours record {} approved by {}",
        approved.id,
        claims.user_id()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(approved)))
}

/// Reject a submitted record with a reason (employer only)
pub async fn reject_hours(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<RejectHoursInput>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let record_id = path.into_inner();
    let reason = input.into_inner().rejection_reason.trim().to_string();

    if reason.is_empty() {
        return Err(AppError::invalid_input("rejectionReason must not be empty"));
    }

    let record = hours_repo
        .find_by_id(record_id)
        .await?
        .ok_or_else(|| AppError::not_found("Hours record not found"))?;

    claims.require_business(record.business_id)?;

    let rejected = hours_repo
        .reject(record_id, claims.user_id(), reason)
        .await?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Only submitted hours can be rejected; current status is {}",
                record.status
            ))
        })?;

    log::info!(
        "Hours record {} rejected by {}",
        rejected.id,
        claims.user_id()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(rejected)))
}
