use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{PostedShift, PostedShiftInput, ShiftDuration},
    utils::sql,
};

const COLUMNS: &str = "id, business_id, employee_id, work_date, duration_hours, created_at";

#[derive(Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Post a shift on the published schedule.
    pub async fn create(&self, input: PostedShiftInput) -> Result<PostedShift> {
        let shift = sqlx::query_as::<_, PostedShift>(&sql(&format!(
            r#"
            INSERT INTO
                posted_shifts (id, business_id, employee_id, work_date, duration_hours, created_at)
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(Uuid::new_v4())
        .bind(input.business_id)
        .bind(input.employee_id)
        .bind(input.work_date)
        .bind(input.duration_hours)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(shift)
    }

    /// All of an employee's posted shifts for the week starting at `week_start`.
    pub async fn shifts_for_week(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        week_start: NaiveDate,
    ) -> Result<Vec<PostedShift>> {
        let shifts = sqlx::query_as::<_, PostedShift>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                posted_shifts
            WHERE
                employee_id = ?
                AND business_id = ?
                AND work_date >= ?
                AND work_date < ?
            ORDER BY
                work_date
            "#
        )))
        .bind(employee_id)
        .bind(business_id)
        .bind(week_start)
        .bind(week_start + Duration::days(7))
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    /// Per-date posted durations over an inclusive date range.
    pub async fn durations_for_range(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ShiftDuration>> {
        let durations = sqlx::query_as::<_, ShiftDuration>(&sql(
            r#"
            SELECT
                work_date,
                duration_hours
            FROM
                posted_shifts
            WHERE
                employee_id = ?
                AND business_id = ?
                AND work_date >= ?
                AND work_date <= ?
            ORDER BY
                work_date
            "#,
        ))
        .bind(employee_id)
        .bind(business_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(durations)
    }
}
