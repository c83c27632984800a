use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single posted shift on the published schedule.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostedShift {
    pub id: Uuid,
    pub business_id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub duration_hours: BigDecimal, // NUMERIC(4,2)
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedShiftInput {
    pub business_id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub duration_hours: BigDecimal,
}

/// Date and duration only, as consumed by the schedule aggregator.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShiftDuration {
    pub work_date: NaiveDate,
    pub duration_hours: BigDecimal,
}
