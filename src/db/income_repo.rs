// src/db/income_repo.rs

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::{common::error::AppError, models::income::Income};

#[derive(Clone)]
pub struct IncomeRepository {
    pool: SqlitePool,
}

impl IncomeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_income(
        &self,
        user_id: Option<i64>,
        amount: f64,
        source: &str,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Income, AppError> {
        let income = sqlx::query_as::<_, Income>(
            r#"
            INSERT INTO incomes (user_id, amount, source, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, user_id, amount, source, date, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .bind(source)
        .bind(date)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(income)
    }

    pub async fn get_all_incomes(&self, user_id: Option<i64>) -> Result<Vec<Income>, AppError> {
        let incomes = sqlx::query_as::<_, Income>(
            r#"
            SELECT id, user_id, amount, source, date, created_at, updated_at
            FROM incomes
            WHERE ($1 IS NULL OR user_id = $1)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(incomes)
    }

    pub async fn get_income_by_id(&self, id: i64) -> Result<Option<Income>, AppError> {
        let income = sqlx::query_as::<_, Income>(
            r#"
            SELECT id, user_id, amount, source, date, created_at, updated_at
            FROM incomes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(income)
    }

    pub async fn update_income(&self, income: &Income) -> Result<Option<Income>, AppError> {
        let updated = sqlx::query_as::<_, Income>(
            r#"
            UPDATE incomes
            SET amount = $1, source = $2, date = $3, updated_at = $4
            WHERE id = $5
            RETURNING id, user_id, amount, source, date, created_at, updated_at
            "#,
        )
        .bind(income.amount)
        .bind(&income.source)
        .bind(income.date)
        .bind(income.updated_at)
        .bind(income.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete_income(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM incomes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
