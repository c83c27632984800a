use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{ConfirmedHoursRecord, ConfirmedHoursStatus, DayHours},
    utils::sql,
};

const COLUMNS: &str = "id, employee_id, business_id, week_start_date, \
    sunday_hours, monday_hours, tuesday_hours, wednesday_hours, thursday_hours, \
    friday_hours, saturday_hours, total_hours, status, notes, rejection_reason, \
    submitted_at, approved_at, approved_by, rejected_at, rejected_by, created_at, updated_at";

/// Persistence for confirmed-hours records. Every status transition is a
/// conditional UPDATE guarded on the expected pre-state; a `None` return
/// means a concurrent writer (or a stale caller) lost the race and the
/// record is no longer in that state.
#[derive(Clone)]
pub struct ConfirmedHoursRepository {
    pool: PgPool,
}

impl ConfirmedHoursRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a draft record. The unique (employee, business, week) key makes
    /// a duplicate create fail with a database conflict.
    pub async fn create(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        week_start_date: NaiveDate,
        days: &DayHours,
        total_hours: BigDecimal,
        notes: Option<String>,
    ) -> Result<ConfirmedHoursRecord> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            INSERT INTO
                confirmed_hours (
                    id,
                    employee_id,
                    business_id,
                    week_start_date,
                    sunday_hours,
                    monday_hours,
                    tuesday_hours,
                    wednesday_hours,
                    thursday_hours,
                    friday_hours,
                    saturday_hours,
                    total_hours,
                    status,
                    notes,
                    created_at,
                    updated_at
                )
            VALUES
                (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(business_id)
        .bind(week_start_date)
        .bind(&days.sunday)
        .bind(&days.monday)
        .bind(&days.tuesday)
        .bind(&days.wednesday)
        .bind(&days.thursday)
        .bind(&days.friday)
        .bind(&days.saturday)
        .bind(total_hours)
        .bind(ConfirmedHoursStatus::Draft)
        .bind(notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ConfirmedHoursRecord>> {
        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            "SELECT {COLUMNS} FROM confirmed_hours WHERE id = ?"
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_week(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        week_start_date: NaiveDate,
    ) -> Result<Option<ConfirmedHoursRecord>> {
        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                confirmed_hours
            WHERE
                employee_id = ?
                AND business_id = ?
                AND week_start_date = ?
            "#
        )))
        .bind(employee_id)
        .bind(business_id)
        .bind(week_start_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Approved records whose week intersects the inclusive [start, end] range.
    pub async fn approved_in_range(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ConfirmedHoursRecord>> {
        let records = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                confirmed_hours
            WHERE
                employee_id = ?
                AND business_id = ?
                AND status = ?
                AND week_start_date >= ?
                AND week_start_date <= ?
            ORDER BY
                week_start_date
            "#
        )))
        .bind(employee_id)
        .bind(business_id)
        .bind(ConfirmedHoursStatus::Approved)
        .bind(start - Duration::days(6))
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Employer review listing, optionally narrowed by employee and status.
    pub async fn list_for_business(
        &self,
        business_id: Uuid,
        employee_id: Option<Uuid>,
        status: Option<ConfirmedHoursStatus>,
    ) -> Result<Vec<ConfirmedHoursRecord>> {
        let mut query = format!("SELECT {COLUMNS} FROM confirmed_hours WHERE business_id = $1");
        let mut param = 1;

        if employee_id.is_some() {
            param += 1;
            query.push_str(&format!(" AND employee_id = ${param}"));
        }

        if status.is_some() {
            param += 1;
            query.push_str(&format!(" AND status = ${param}"));
        }

        query.push_str(" ORDER BY week_start_date DESC, created_at DESC");

        let mut prepared = sqlx::query_as::<_, ConfirmedHoursRecord>(&query).bind(business_id);

        if let Some(eid) = employee_id {
            prepared = prepared.bind(eid);
        }

        if let Some(s) = status {
            prepared = prepared.bind(s);
        }

        let records = prepared.fetch_all(&self.pool).await?;

        Ok(records)
    }

    /// Replace day hours and notes. Succeeds only while the record is still
    /// draft or rejected.
    pub async fn update_content(
        &self,
        id: Uuid,
        days: &DayHours,
        total_hours: BigDecimal,
        notes: Option<String>,
    ) -> Result<Option<ConfirmedHoursRecord>> {
        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            UPDATE confirmed_hours
            SET
                sunday_hours = ?,
                monday_hours = ?,
                tuesday_hours = ?,
                wednesday_hours = ?,
                thursday_hours = ?,
                friday_hours = ?,
                saturday_hours = ?,
                total_hours = ?,
                notes = ?,
                updated_at = ?
            WHERE
                id = ?
                AND status IN (?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(&days.sunday)
        .bind(&days.monday)
        .bind(&days.tuesday)
        .bind(&days.wednesday)
        .bind(&days.thursday)
        .bind(&days.friday)
        .bind(&days.saturday)
        .bind(total_hours)
        .bind(notes)
        .bind(Utc::now())
        .bind(id)
        .bind(ConfirmedHoursStatus::Draft)
        .bind(ConfirmedHoursStatus::Rejected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// draft/rejected -> submitted. The previous cycle's rejection fields are
    /// kept until the next rejection so the reviewer retains context.
    pub async fn submit(&self, id: Uuid) -> Result<Option<ConfirmedHoursRecord>> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            UPDATE confirmed_hours
            SET
                status = ?,
                submitted_at = ?,
                updated_at = ?
            WHERE
                id = ?
                AND status IN (?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(ConfirmedHoursStatus::Submitted)
        .bind(now)
        .bind(now)
        .bind(id)
        .bind(ConfirmedHoursStatus::Draft)
        .bind(ConfirmedHoursStatus::Rejected)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// submitted -> approved. Terminal.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
    ) -> Result<Option<ConfirmedHoursRecord>> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            UPDATE confirmed_hours
            SET
                status = ?,
                approved_at = ?,
                approved_by = ?,
                updated_at = ?
            WHERE
                id = ?
                AND status = ?
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(ConfirmedHoursStatus::Approved)
        .bind(now)
        .bind(approved_by)
        .bind(now)
        .bind(id)
        .bind(ConfirmedHoursStatus::Submitted)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// submitted -> rejected. Overwrites the previous cycle's rejection trail.
    pub async fn reject(
        &self,
        id: Uuid,
        rejected_by: Uuid,
        rejection_reason: String,
    ) -> Result<Option<ConfirmedHoursRecord>> {
        let now = Utc::now();

        let record = sqlx::query_as::<_, ConfirmedHoursRecord>(&sql(&format!(
            r#"
            UPDATE confirmed_hours
            SET
                status = ?,
                rejected_at = ?,
                rejected_by = ?,
                rejection_reason = ?,
                updated_at = ?
            WHERE
                id = ?
                AND status = ?
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(ConfirmedHoursStatus::Rejected)
        .bind(now)
        .bind(rejected_by)
        .bind(rejection_reason)
        .bind(now)
        .bind(id)
        .bind(ConfirmedHoursStatus::Submitted)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
