use anyhow::Result;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Business, CreateBusinessInput},
    utils::sql,
};

const COLUMNS: &str = "id, name, timezone, created_at, updated_at";

#[derive(Clone)]
pub struct BusinessRepository {
    pool: PgPool,
}

impl BusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: CreateBusinessInput) -> Result<Business> {
        let now = Utc::now();

        let business = sqlx::query_as::<_, Business>(&sql(&format!(
            r#"
            INSERT INTO
                businesses (id, name, timezone, created_at, updated_at)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                {COLUMNS}
            "#
        )))
        .bind(Uuid::new_v4())
        .bind(input.name)
        .bind(input.timezone)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(business)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>> {
        let business = sqlx::query_as::<_, Business>(&sql(&format!(
            "SELECT {COLUMNS} FROM businesses WHERE id = ?"
        )))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(business)
    }
}
