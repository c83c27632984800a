use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PaymentStatus {
        Calculated => "calculated",
        Paid => "paid",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum PaymentMethod {
        Cash => "cash",
        Check => "check",
        BankTransfer => "bank_transfer",
        Other => "other",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum HoursSource {
        Confirmed => "confirmed",
        Scheduled => "scheduled",
        Mixed => "mixed",
    }
}

/// A payment for one employee over one inclusive date range. Once paid, the
/// monetary fields are immutable; records are retained forever for audit.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub business_id: Uuid,
    pub employee_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_hours: BigDecimal,
    pub hourly_rate: BigDecimal,
    pub gross_pay: BigDecimal,
    pub advances: BigDecimal,
    pub bonuses: BigDecimal,
    pub deductions: BigDecimal,
    pub net_pay: BigDecimal,
    pub hours_source: HoursSource,
    pub status: PaymentStatus,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatePaymentInput {
    pub employee_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub advances: Option<BigDecimal>,
    pub bonuses: Option<BigDecimal>,
    pub deductions: Option<BigDecimal>,
    pub notes: Option<String>,
}

/// Adjustment-only variant used when recalculating an addressed record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculatePaymentInput {
    pub advances: Option<BigDecimal>,
    pub bonuses: Option<BigDecimal>,
    pub deductions: Option<BigDecimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidInput {
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Aggregated payroll totals for one employee over a reporting window.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReportRow {
    pub employee_id: Uuid,
    pub payment_count: i64,
    pub paid_count: i64,
    pub total_hours: BigDecimal,
    pub gross_pay: BigDecimal,
    pub net_pay: BigDecimal,
}
