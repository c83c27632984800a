#![allow(dead_code)] // each test binary uses a different slice of this module

use std::env;

use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use clockwise_be::config::Config;
use clockwise_be::database::init_database;
use clockwise_be::database::models::{CreateBusinessInput, PostedShiftInput};
use clockwise_be::database::repositories::{BusinessRepository, RateRepository, ShiftRepository};
use clockwise_be::services::auth::{issue_token, Claims, Role};

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        jwt_secret: "test-jwt-secret-key-that-is-long-enough".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
    }
}

/// A pool that never connects; enough to register repositories for tests
/// that must fail before any query runs.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://localhost:5432/clockwise_unused")
        .expect("failed to build lazy pool")
}

/// Test database context. Integration tests that need a live database are
/// skipped unless TEST_DATABASE_URL points at a scratch Postgres instance.
pub struct TestContext {
    pub pool: PgPool,
    pub config: Config,
}

impl TestContext {
    pub async fn new() -> Option<Self> {
        let database_url = match env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL not set; skipping database test");
                return None;
            }
        };

        let pool = init_database(&database_url)
            .await
            .expect("failed to initialize test database");

        sqlx::query(
            "TRUNCATE payment_records, confirmed_hours, employee_rates, posted_shifts, businesses CASCADE",
        )
        .execute(&pool)
        .await
        .expect("failed to reset test database");

        let config = test_config(&database_url);

        Some(TestContext { pool, config })
    }

    pub async fn create_business(&self, timezone: Option<&str>) -> Result<Uuid> {
        let business = BusinessRepository::new(self.pool.clone())
            .create(CreateBusinessInput {
                name: "Test Business".to_string(),
                timezone: timezone.map(str::to_string),
            })
            .await?;

        Ok(business.id)
    }

    pub async fn set_rate(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        hourly_rate: &str,
        effective_from: NaiveDate,
    ) -> Result<()> {
        RateRepository::new(self.pool.clone())
            .create(
                employee_id,
                business_id,
                hourly_rate.parse::<BigDecimal>().expect("valid decimal"),
                effective_from,
            )
            .await?;

        Ok(())
    }

    pub async fn post_shift(
        &self,
        employee_id: Uuid,
        business_id: Uuid,
        work_date: NaiveDate,
        duration_hours: &str,
    ) -> Result<()> {
        ShiftRepository::new(self.pool.clone())
            .create(PostedShiftInput {
                business_id,
                employee_id,
                work_date,
                duration_hours: duration_hours.parse().expect("valid decimal"),
            })
            .await?;

        Ok(())
    }
}

fn token(config: &Config, user_id: Uuid, business_id: Uuid, role: Role) -> String {
    let claims = Claims {
        sub: user_id,
        business_id,
        role,
        exp: (Utc::now() + Duration::days(1)).timestamp() as usize,
    };

    issue_token(&claims, config).expect("failed to issue test token")
}

pub fn employee_token(config: &Config, employee_id: Uuid, business_id: Uuid) -> String {
    token(config, employee_id, business_id, Role::Employee)
}

pub fn employer_token(config: &Config, employer_id: Uuid, business_id: Uuid) -> String {
    token(config, employer_id, business_id, Role::Employer)
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

pub fn setup_test_env() {
    let _ = env_logger::builder().is_test(true).try_init();
}
