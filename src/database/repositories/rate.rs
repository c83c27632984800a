use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{models::EmployeeRate, utils::sql};

const COLUMNS: &str = "id, employee_id, business_id, hourly_rate, effective_from, created_at";

#[derive(Clone)]
pub struct RateRepository {
    pool: PgPool,
}

impl RateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a new rate entry. History is never mutated; a later
    /// effective_from supersedes earlier entries.
    pub async fn create(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        hourly_rate: BigDecimal,
        effective_from: NaiveDate,
    ) -> Result<EmployeeRate> {
        let rate = sqlx::query_as::<_, EmployeeRate>(&sql(&format!(
            r#"
            INSERT INTO
                employee_rates (id, employee_id, business_id, hourly_rate, effective_from, created_at)
            VALUES
                (?, ?, ?, ?, ?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(business_id)
        .bind(hourly_rate)
        .bind(effective_from)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(rate)
    }

    /// The rate in force on `as_of`: latest effective_from on or before it.
    pub async fn current_rate(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<Option<EmployeeRate>> {
        let rate = sqlx::query_as::<_, EmployeeRate>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                employee_rates
            WHERE
                employee_id = ?
                AND business_id = ?
                AND effective_from <= ?
            ORDER BY
                effective_from DESC,
                created_at DESC
            LIMIT 1
            "#
        )))
        .bind(employee_id)
        .bind(business_id)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }

    pub async fn history(&self, employee_id: Uuid, business_id: Uuid) -> Result<Vec<EmployeeRate>> {
        let rates = sqlx::query_as::<_, EmployeeRate>(&sql(&format!(
            r#"
            SELECT
                {COLUMNS}
            FROM
                employee_rates
            WHERE
                employee_id = ?
                AND business_id = ?
            ORDER BY
                effective_from DESC,
                created_at DESC
            "#
        )))
        .bind(employee_id)
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rates)
    }
}
