use bigdecimal::{num_bigint::BigInt, BigDecimal};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::PaymentRecord;

/// Differences at or below one tracked increment are rounding noise, not a
/// real conflict.
fn tolerance() -> BigDecimal {
    BigDecimal::new(BigInt::from(25), 2) // 0.25
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyWarning {
    pub confirmed_hours: BigDecimal,
    pub scheduled_hours: BigDecimal,
    pub difference: BigDecimal,
}

/// Flag a confirmed-vs-scheduled mismatch. Requires both totals to exist and
/// the gap to exceed (strictly) the tolerance.
pub fn check_discrepancy(
    confirmed: Option<&BigDecimal>,
    scheduled: Option<&BigDecimal>,
) -> Option<DiscrepancyWarning> {
    let confirmed = confirmed?;
    let scheduled = scheduled?;
    let difference = (confirmed - scheduled).abs();

    if difference > tolerance() {
        Some(DiscrepancyWarning {
            confirmed_hours: confirmed.clone(),
            scheduled_hours: scheduled.clone(),
            difference,
        })
    } else {
        None
    }
}

/// Inclusive ranges intersect; merely adjacent ranges do not.
pub fn periods_overlap(
    start: NaiveDate,
    end: NaiveDate,
    other_start: NaiveDate,
    other_end: NaiveDate,
) -> bool {
    start <= other_end && end >= other_start
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapWarning {
    pub payment_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl From<&PaymentRecord> for OverlapWarning {
    fn from(record: &PaymentRecord) -> Self {
        Self {
            payment_id: record.id,
            period_start: record.period_start,
            period_end: record.period_end,
        }
    }
}

/// Advisory annotations returned alongside a calculation. They never block
/// the calculation itself; acting on them is the caller's decision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentWarnings {
    pub discrepancy: Option<DiscrepancyWarning>,
    pub overlapping_periods: Vec<OverlapWarning>,
    pub negative_net: bool,
}
