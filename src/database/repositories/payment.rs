use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{HoursSource, PaymentMethod, PaymentRecord, PaymentStatus, PayrollReportRow},
    utils::sql,
};

const COLUMNS: &str = "id, business_id, employee_id, period_start, period_end, \
    total_hours, hourly_rate, gross_pay, advances, bonuses, deductions, net_pay, \
    hours_source, status, payment_method, notes, paid_at, created_at, updated_at";

/// Computed monetary fields for one calculation pass, bound as a unit so the
/// create and overwrite paths cannot drift apart.
#[derive(Debug, Clone)]
pub struct CalculatedFields {
    pub total_hours: BigDecimal,
    pub hourly_rate: BigDecimal,
    pub gross_pay: BigDecimal,
    pub advances: BigDecimal,
    pub bonuses: BigDecimal,
    pub deductions: BigDecimal,
    pub net_pay: BigDecimal,
    pub hours_source: HoursSource,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        business_id: Uuid,
        employee_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
        fields: CalculatedFields,
    ) -> Result<PaymentRecord> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, PaymentRecord>(&sql(&format!(
            r#"
            INSERT INTO
                payment_records (
                    id,
                    business_id,
                    employee_id,
                    period_start,
                    period_end,
                    total_hours,
                    hourly_rate,
                    gross_pay,
                    advances,
                    bonuses,
                    deductions,
                    net_pay,
                    hours_source,
                    status,
                    notes,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(Uuid::new_v4())
        .bind(business_id)
        .bind(employee_id)
        .bind(period_start)
        .bind(period_end)
        .bind(fields.total_hours)
        .bind(fields.hourly_rate)
        .bind(fields.gross_pay)
        .bind(fields.advances)
        .bind(fields.bonuses)
        .bind(fields.deductions)
        .bind(fields.net_pay)
        .bind(fields.hours_source)
        .bind(PaymentStatus::Calculated)
        .bind(fields.notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PaymentRecord>> {
        let record = sqlx::query_as::<_, PaymentRecord>(&sql(&format!(
            "SELECT {COLUMNS} FROM payment_records WHERE id = ?"
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// The record for an exact (employee, period) key, paid first so the
    /// caller sees the blocking one when both somehow exist.
    pub async fn find_for_period(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<Option<PaymentRecord>> {
        let record = sqlx::query_as::<_, PaymentRecord>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                payment_records
            WHERE
                employee_id = ?
                AND business_id = ?
                AND period_start = ?
                AND period_end = ?
            ORDER BY
                status DESC,
                created_at DESC
            LIMIT 1
            "#
        )))
        .bind(employee_id)
        .bind(business_id)
        .bind(period_start)
        .bind(period_end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Overwrite a still-calculated record with a fresh calculation. Returns
    /// `None` when the record has been paid (or removed) in the meantime.
    pub async fn overwrite_calculated(
        &self,
        id: Uuid,
        fields: CalculatedFields,
    ) -> Result<Option<PaymentRecord>> {
        let record = sqlx::query_as::<_, PaymentRecord>(&sql(&format!(
            r#"
            UPDATE payment_records
            SET
                total_hours = ?,
                hourly_rate = ?,
                gross_pay = ?,
                advances = ?,
                bonuses = ?,
                deductions = ?,
                net_pay = ?,
                hours_source = ?,
                notes = ?,
                updated_at = ?
            WHERE
                id = ?
                AND status = ?
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(fields.total_hours)
        .bind(fields.hourly_rate)
        .bind(fields.gross_pay)
        .bind(fields.advances)
        .bind(fields.bonuses)
        .bind(fields.deductions)
        .bind(fields.net_pay)
        .bind(fields.hours_source)
        .bind(fields.notes)
        .bind(Utc::now())
        .bind(id)
        .bind(PaymentStatus::Calculated)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// calculated -> paid, exactly once.
    pub async fn mark_paid(
        &self,
        id: Uuid,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> Result<Option<PaymentRecord>> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, PaymentRecord>(&sql(&format!(
            r#"
            UPDATE payment_records
            SET
                status = ?,
                payment_method = ?,
                paid_at = ?,
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE
                id = ?
                AND status = ?
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(PaymentStatus::Paid)
        .bind(payment_method)
        .bind(now)
        .bind(notes)
        .bind(now)
        .bind(id)
        .bind(PaymentStatus::Calculated)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Paid records for the same employee whose period intersects the
    /// candidate range. Calculated records never block anything.
    pub async fn find_overlapping_paid(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<PaymentRecord>> {
        let mut query = format!(
            "SELECT {COLUMNS} FROM payment_records \
             WHERE employee_id = $1 AND business_id = $2 AND status = $3 \
             AND period_start <= $4 AND period_end >= $5"
        );

        if exclude_id.is_some() {
            query.push_str(" AND id != $6");
        }

        query.push_str(" ORDER BY period_start");

        let mut prepared = sqlx::query_as::<_, PaymentRecord>(&query)
            .bind(employee_id)
            .bind(business_id)
            .bind(PaymentStatus::Paid)
            .bind(period_end)
            .bind(period_start);

        if let Some(id) = exclude_id {
            prepared = prepared.bind(id);
        }

        let records = prepared.fetch_all(&self.pool).await?;

        Ok(records)
    }

    /// Payment listing for an employer, optionally narrowed to an employee
    /// and to records whose period intersects [start, end].
    pub async fn list(
        &self,
        business_id: Uuid,
        employee_id: Option<Uuid>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<PaymentRecord>> {
        let mut query = format!("SELECT {COLUMNS} FROM payment_records WHERE business_id = $1");
        let mut param = 1;

        if employee_id.is_some() {
            param += 1;
            query.push_str(&format!(" AND employee_id = ${param}"));
        }

        if start.is_some() {
            param += 1;
            query.push_str(&format!(" AND period_end >= ${param}"));
        }

        if end.is_some() {
            param += 1;
            query.push_str(&format!(" AND period_start <= ${param}"));
        }

        query.push_str(" ORDER BY period_start DESC, created_at DESC");

        let mut prepared = sqlx::query_as::<_, PaymentRecord>(&query).bind(business_id);

        if let Some(eid) = employee_id {
            prepared = prepared.bind(eid);
        }

        if let Some(s) = start {
            prepared = prepared.bind(s);
        }

        if let Some(e) = end {
            prepared = prepared.bind(e);
        }

        let records = prepared.fetch_all(&self.pool).await?;

        Ok(records)
    }

    /// Per-employee totals over records whose period falls inside the window.
    pub async fn payroll_report(
        &self,
        business_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PayrollReportRow>> {
        let rows = sqlx::query_as::<_, PayrollReportRow>(&sql(
            r#"
            SELECT
                employee_id,
                COUNT(*) AS payment_count,
                COUNT(*) FILTER (WHERE status = 'paid') AS paid_count,
                COALESCE(SUM(total_hours), 0) AS total_hours,
                COALESCE(SUM(gross_pay), 0) AS gross_pay,
                COALESCE(SUM(net_pay), 0) AS net_pay
            FROM
                payment_records
            WHERE
                business_id = ?
                AND period_start >= ?
                AND period_end <= ?
            GROUP BY
                employee_id
            ORDER BY
                employee_id
            "#,
        ))
        .bind(business_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
