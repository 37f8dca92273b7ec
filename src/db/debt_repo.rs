// src/db/debt_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::debt::{Debt, NewDebt},
};

const DEBT_COLUMNS: &str = r#"
    id, user_id, name, total_amount, remaining_amount, due_date, interest_rate,
    num_installments, installment_amount, payment_day, paid, created_at, updated_at
"#;

#[derive(Clone)]
pub struct DebtRepository {
    pool: SqlitePool,
}

impl DebtRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_debt(&self, debt: &NewDebt) -> Result<Debt, AppError> {
        // Toda dívida nasce em aberto (paid = 0)
        let query = format!(
            r#"
            INSERT INTO debts (
                user_id, name, total_amount, remaining_amount, due_date, interest_rate,
                num_installments, installment_amount, payment_day, paid, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, $10, $10)
            RETURNING {DEBT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Debt>(&query)
            .bind(debt.user_id)
            .bind(&debt.name)
            .bind(debt.total_amount)
            .bind(debt.remaining_amount)
            .bind(debt.due_date)
            .bind(debt.interest_rate)
            .bind(debt.num_installments)
            .bind(debt.installment_amount)
            .bind(debt.payment_day)
            .bind(debt.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    // Sem filtro devolve todas as dívidas (o filtro por usuário é opcional)
    pub async fn get_all_debts(&self, user_id: Option<i64>) -> Result<Vec<Debt>, AppError> {
        let query = format!(
            r#"
            SELECT {DEBT_COLUMNS}
            FROM debts
            WHERE ($1 IS NULL OR user_id = $1)
            ORDER BY created_at DESC, id DESC
            "#
        );

        let debts = sqlx::query_as::<_, Debt>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(debts)
    }

    pub async fn get_debt_by_id(&self, id: i64) -> Result<Option<Debt>, AppError> {
        let query = format!("SELECT {DEBT_COLUMNS} FROM debts WHERE id = $1");

        let debt = sqlx::query_as::<_, Debt>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(debt)
    }

    /// Grava todos os campos editáveis. `None` quando o id não existe mais.
    pub async fn update_debt(&self, debt: &Debt) -> Result<Option<Debt>, AppError> {
        let query = format!(
            r#"
            UPDATE debts
            SET name = $1, total_amount = $2, remaining_amount = $3, due_date = $4,
                interest_rate = $5, num_installments = $6, installment_amount = $7,
                payment_day = $8, paid = $9, updated_at = $10
            WHERE id = $11
            RETURNING {DEBT_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Debt>(&query)
            .bind(&debt.name)
            .bind(debt.total_amount)
            .bind(debt.remaining_amount)
            .bind(debt.due_date)
            .bind(debt.interest_rate)
            .bind(debt.num_installments)
            .bind(debt.installment_amount)
            .bind(debt.payment_day)
            .bind(debt.paid)
            .bind(debt.updated_at)
            .bind(debt.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Retorna o número de linhas removidas (0 = não existia).
    pub async fn delete_debt(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM debts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  APLICAÇÃO DE PAGAMENTO
    // =========================================================================

    /// Abate `amount` do saldo numa única instrução, para rodar dentro da
    /// transação do pagamento. O saldo nunca fica negativo e o `paid` só vira
    /// verdadeiro (nunca volta para falso) quando o saldo antigo menos o valor
    /// chega a zero. Devolve a dívida já atualizada, ou `None` se ela não existe.
    pub async fn apply_payment<'e, E>(
        &self,
        executor: E,
        debt_id: i64,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Debt>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let query = format!(
            r#"
            UPDATE debts
            SET remaining_amount = CASE
                    WHEN remaining_amount - $1 < 0 THEN 0.0
                    ELSE remaining_amount - $1
                END,
                paid = CASE
                    WHEN remaining_amount - $1 <= 0 THEN 1
                    ELSE paid
                END,
                updated_at = $2
            WHERE id = $3
            RETURNING {DEBT_COLUMNS}
            "#
        );

        let settled = sqlx::query_as::<_, Debt>(&query)
            .bind(amount)
            .bind(now)
            .bind(debt_id)
            .fetch_optional(executor)
            .await?;

        Ok(settled)
    }
}
