use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in an employee's append-only rate history. The current rate is
/// the entry with the latest effective_from on or before today; superseded
/// entries are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRate {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub business_id: Uuid,
    pub hourly_rate: BigDecimal, // NUMERIC(10,2)
    pub effective_from: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRateInput {
    pub employee_id: Uuid,
    pub hourly_rate: BigDecimal,
    /// Defaults to today when omitted.
    pub effective_from: Option<NaiveDate>,
}
