use bigdecimal::{BigDecimal, RoundingMode};

use crate::database::models::DayHours;
use crate::error::AppError;
use crate::services::schedule::WeeklyHours;

const DAY_LABELS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

pub fn round_hours(value: BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// A single day's hours: within [0, 24], in quarter-hour steps.
pub fn validate_day(label: &str, value: &BigDecimal) -> Result<(), AppError> {
    if value < &BigDecimal::from(0) {
        return Err(AppError::invalid_input(format!(
            "{} hours must not be negative",
            label
        )));
    }

    if value > &BigDecimal::from(24) {
        return Err(AppError::invalid_input(format!(
            "{} hours cannot exceed 24",
            label
        )));
    }

    if !(value * BigDecimal::from(4)).is_integer() {
        return Err(AppError::invalid_input(format!(
            "{} hours must be a multiple of 0.25",
            label
        )));
    }

    Ok(())
}

pub fn validate_week(days: &DayHours) -> Result<(), AppError> {
    for (label, value) in DAY_LABELS.iter().zip(days.as_array()) {
        validate_day(label, value)?;
    }

    Ok(())
}

/// The derived total: always the 2-decimal sum of the seven day fields.
pub fn week_total(days: &DayHours) -> BigDecimal {
    round_hours(
        days.as_array()
            .iter()
            .fold(BigDecimal::from(0), |acc, day| acc + *day),
    )
}

/// Seed an employee's first draft from the posted schedule.
pub fn prefill_from_schedule(scheduled: &WeeklyHours) -> DayHours {
    DayHours::from_array(scheduled.days.clone())
}
