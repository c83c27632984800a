use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{
    CalculatePaymentInput, MarkPaidInput, PaymentRecord, PaymentStatus, RecalculatePaymentInput,
};
use crate::database::repositories::{
    CalculatedFields, ConfirmedHoursRepository, PaymentRepository, RateRepository, ShiftRepository,
};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::auth::Claims;
use crate::services::{payroll, warnings};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsQuery {
    pub employee_id: Option<Uuid>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// A payment record together with its advisory annotations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub payment: PaymentRecord,
    pub warnings: warnings::PaymentWarnings,
}

struct Calculation {
    fields: CalculatedFields,
    confirmed_total: Option<BigDecimal>,
    scheduled_total: Option<BigDecimal>,
}

/// Resolve hours, look up the rate and compute the monetary fields for one
/// (employee, period). Shared by the create and recalculate paths.
async fn run_calculation(
    business_id: Uuid,
    employee_id: Uuid,
    period_start: NaiveDate,
    period_end: NaiveDate,
    advances: BigDecimal,
    bonuses: BigDecimal,
    deductions: BigDecimal,
    notes: Option<String>,
    hours_repo: &ConfirmedHoursRepository,
    shift_repo: &ShiftRepository,
    rate_repo: &RateRepository,
) -> Result<Calculation, AppError> {
    if period_start > period_end {
        return Err(AppError::invalid_input(
            "periodStart must not be after periodEnd",
        ));
    }

    payroll::ensure_non_negative("advances", &advances)?;
    payroll::ensure_non_negative("bonuses", &bonuses)?;
    payroll::ensure_non_negative("deductions", &deductions)?;

    let rate = rate_repo
        .current_rate(employee_id, business_id, Utc::now().date_naive())
        .await?
        .ok_or_else(|| {
            AppError::invalid_input("No hourly rate is configured for this employee")
        })?;
    payroll::ensure_positive_rate(&rate.hourly_rate)?;

    let approved = hours_repo
        .approved_in_range(employee_id, business_id, period_start, period_end)
        .await?;
    let scheduled = shift_repo
        .durations_for_range(employee_id, business_id, period_start, period_end)
        .await?;

    let resolved = payroll::resolve_period_hours(period_start, period_end, &approved, &scheduled);

    let gross = payroll::gross_pay(&resolved.total, &rate.hourly_rate);
    let net = payroll::net_pay(&gross, &bonuses, &advances, &deductions);

    Ok(Calculation {
        fields: CalculatedFields {
            total_hours: resolved.total,
            hourly_rate: rate.hourly_rate,
            gross_pay: gross,
            advances,
            bonuses,
            deductions,
            net_pay: net,
            hours_source: resolved.source,
            notes,
        },
        confirmed_total: resolved.confirmed_total,
        scheduled_total: resolved.scheduled_total,
    })
}

async fn annotate(
    record: &PaymentRecord,
    calculation: &Calculation,
    payment_repo: &PaymentRepository,
) -> Result<warnings::PaymentWarnings, AppError> {
    let overlapping = payment_repo
        .find_overlapping_paid(
            record.employee_id,
            record.business_id,
            record.period_start,
            record.period_end,
            Some(record.id),
        )
        .await?;

    Ok(warnings::PaymentWarnings {
        discrepancy: warnings::check_discrepancy(
            calculation.confirmed_total.as_ref(),
            calculation.scheduled_total.as_ref(),
        ),
        overlapping_periods: overlapping.iter().map(Into::into).collect(),
        negative_net: record.net_pay < BigDecimal::from(0),
    })
}

/// Calculate a payment for a period, creating the record or overwriting a
/// still-calculated one (employer only)
pub async fn calculate_payment(
    claims: Claims,
    input: web::Json<CalculatePaymentInput>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
    shift_repo: web::Data<ShiftRepository>,
    rate_repo: web::Data<RateRepository>,
    payment_repo: web::Data<PaymentRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let input = input.into_inner();
    let zero = BigDecimal::from(0);

    let calculation = run_calculation(
        claims.business_id,
        input.employee_id,
        input.period_start,
        input.period_end,
        input.advances.unwrap_or_else(|| zero.clone()),
        input.bonuses.unwrap_or_else(|| zero.clone()),
        input.deductions.unwrap_or(zero),
        input.notes,
        &hours_repo,
        &shift_repo,
        &rate_repo,
    )
    .await?;

    let existing = payment_repo
        .find_for_period(
            input.employee_id,
            claims.business_id,
            input.period_start,
            input.period_end,
        )
        .await?;

    let (record, created) = match existing {
        Some(record) if record.status == PaymentStatus::Paid => {
            return Err(AppError::conflict(
                "A paid record already exists for this period",
            ));
        }
        Some(record) => {
            let overwritten = payment_repo
                .overwrite_calculated(record.id, calculation.fields.clone())
                .await?
                .ok_or_else(|| {
                    AppError::conflict("Payment was marked paid by a concurrent request")
                })?;
            (overwritten, false)
        }
        None => {
            let created = payment_repo
                .create(
                    claims.business_id,
                    input.employee_id,
                    input.period_start,
                    input.period_end,
                    calculation.fields.clone(),
                )
                .await?;
            (created, true)
        }
    };

    let warnings = annotate(&record, &calculation, &payment_repo).await?;

    log::info!(
        "Payment {} calculated for employee {} ({} - {}), source {}",
        record.id,
        record.employee_id,
        record.period_start,
        record.period_end,
        record.hours_source
    );

    let view = PaymentView {
        payment: record,
        warnings,
    };

    if created {
        Ok(HttpResponse::Created().json(ApiResponse::success(view)))
    } else {
        Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
    }
}

/// Recalculate an addressed record, keeping its period (employer only)
pub async fn recalculate_payment(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<RecalculatePaymentInput>,
    hours_repo: web::Data<ConfirmedHoursRepository>,
    shift_repo: web::Data<ShiftRepository>,
    rate_repo: web::Data<RateRepository>,
    payment_repo: web::Data<PaymentRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let payment_id = path.into_inner();
    let input = input.into_inner();

    let record = payment_repo
        .find_by_id(payment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment record not found"))?;

    claims.require_business(record.business_id)?;

    if record.status == PaymentStatus::Paid {
        return Err(AppError::conflict(
            "Paid records are immutable; create a new record for this period instead",
        ));
    }

    let calculation = run_calculation(
        record.business_id,
        record.employee_id,
        record.period_start,
        record.period_end,
        input.advances.unwrap_or_else(|| record.advances.clone()),
        input.bonuses.unwrap_or_else(|| record.bonuses.clone()),
        input.deductions.unwrap_or_else(|| record.deductions.clone()),
        input.notes.or_else(|| record.notes.clone()),
        &hours_repo,
        &shift_repo,
        &rate_repo,
    )
    .await?;

    let updated = payment_repo
        .overwrite_calculated(payment_id, calculation.fields.clone())
        .await?
        .ok_or_else(|| AppError::conflict("Payment was marked paid by a concurrent request"))?;

    let warnings = annotate(&updated, &calculation, &payment_repo).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(PaymentView {
        payment: updated,
        warnings,
    })))
}

/// calculated -> paid, one-way (employer only)
pub async fn mark_paid(
    claims: Claims,
    path: web::Path<Uuid>,
    input: web::Json<MarkPaidInput>,
    payment_repo: web::Data<PaymentRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let payment_id = path.into_inner();
    let input = input.into_inner();

    let record = payment_repo
        .find_by_id(payment_id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment record not found"))?;

    claims.require_business(record.business_id)?;

    let paid = payment_repo
        .mark_paid(payment_id, input.payment_method, input.notes)
        .await?
        .ok_or_else(|| {
            AppError::conflict(format!(
                "Only calculated payments can be marked paid; current status is {}",
                record.status
            ))
        })?;

    log::info!(
        "Payment {} marked paid via {} by {}",
        paid.id,
        input.payment_method,
        claims.user_id()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(paid)))
}

/// List payments for the caller's business (employer only)
pub async fn list_payments(
    claims: Claims,
    query: web::Query<PaymentsQuery>,
    payment_repo: web::Data<PaymentRepository>,
) -> Result<HttpResponse, AppError> {
    claims.require_employer()?;

    let records = payment_repo
        .list(claims.business_id, query.employee_id, query.start, query.end)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
}

/// Fetch one payment record; employees may only see their own
pub async fn get_payment(
    claims: Claims,
    path: web::Path<Uuid>,
    payment_repo: web::Data<PaymentRepository>,
) -> Result<HttpResponse, AppError> {
    let record = payment_repo
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Payment record not found"))?;

    claims.require_business(record.business_id)?;

    if claims.is_employee() {
        claims.require_self(record.employee_id)?;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}
