use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ConfirmedHoursStatus {
        Draft => "draft",
        Submitted => "submitted",
        Approved => "approved",
        Rejected => "rejected",
    }
}

/// An employee's self-reported hours for one week, keyed by the canonical
/// Sunday of that week. One row per (employee, business, week).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedHoursRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub business_id: Uuid,
    pub week_start_date: NaiveDate,
    pub sunday_hours: BigDecimal,
    pub monday_hours: BigDecimal,
    pub tuesday_hours: BigDecimal,
    pub wednesday_hours: BigDecimal,
    pub thursday_hours: BigDecimal,
    pub friday_hours: BigDecimal,
    pub saturday_hours: BigDecimal,
    pub total_hours: BigDecimal,
    pub status: ConfirmedHoursStatus,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConfirmedHoursRecord {
    /// Day-hour fields in calendar order, Sunday first.
    pub fn day_hours(&self) -> [&BigDecimal; 7] {
        [
            &self.sunday_hours,
            &self.monday_hours,
            &self.tuesday_hours,
            &self.wednesday_hours,
            &self.thursday_hours,
            &self.friday_hours,
            &self.saturday_hours,
        ]
    }

    /// Content may change only while the employee still owns the record.
    pub fn is_editable(&self) -> bool {
        matches!(
            self.status,
            ConfirmedHoursStatus::Draft | ConfirmedHoursStatus::Rejected
        )
    }
}

/// Seven day-hour values, Sunday first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub sunday: BigDecimal,
    pub monday: BigDecimal,
    pub tuesday: BigDecimal,
    pub wednesday: BigDecimal,
    pub thursday: BigDecimal,
    pub friday: BigDecimal,
    pub saturday: BigDecimal,
}

impl DayHours {
    pub fn from_array(days: [BigDecimal; 7]) -> Self {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] = days;
        Self {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }

    pub fn as_array(&self) -> [&BigDecimal; 7] {
        [
            &self.sunday,
            &self.monday,
            &self.tuesday,
            &self.wednesday,
            &self.thursday,
            &self.friday,
            &self.saturday,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfirmedHoursInput {
    pub business_id: Uuid,
    pub week_start_date: NaiveDate,
    /// Seeded from the posted schedule when omitted.
    pub day_hours: Option<DayHours>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfirmedHoursInput {
    pub day_hours: DayHours,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectHoursInput {
    pub rejection_reason: String,
}
