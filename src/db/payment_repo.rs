// src/db/payment_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::payment::{NewPayment, Payment, PaymentWithDebt},
};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // Recebe o executor para participar da transação do PaymentService
    pub async fn create_payment<'e, E>(
        &self,
        executor: E,
        payment: &NewPayment,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let created = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (user_id, amount, debt_id, receipt_filename, date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, user_id, amount, debt_id, receipt_filename, date, created_at, updated_at
            "#,
        )
        .bind(payment.user_id)
        .bind(payment.amount)
        .bind(payment.debt_id)
        .bind(payment.receipt_filename.as_deref())
        .bind(payment.date)
        .bind(payment.created_at)
        .fetch_one(executor)
        .await?;

        Ok(created)
    }

    pub async fn get_all_payments(
        &self,
        user_id: Option<i64>,
    ) -> Result<Vec<PaymentWithDebt>, AppError> {
        let payments = sqlx::query_as::<_, PaymentWithDebt>(
            r#"
            SELECT
                p.id, p.user_id, p.amount, p.debt_id, p.receipt_filename, p.date,
                p.created_at, p.updated_at,
                d.name AS debt_name,
                d.remaining_amount AS debt_remaining_amount,
                d.installment_amount AS debt_installment_amount
            FROM payments p
            INNER JOIN debts d ON p.debt_id = d.id
            WHERE ($1 IS NULL OR p.user_id = $1)
            ORDER BY p.date DESC, p.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, user_id, amount, debt_id, receipt_filename, date, created_at, updated_at
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payment)
    }

    pub async fn delete_payment(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
