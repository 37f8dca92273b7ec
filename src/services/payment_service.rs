// src/services/payment_service.rs

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    common::{dates::parse_date, error::AppError},
    db::{DebtRepository, PaymentRepository},
    models::payment::{CreatePaymentPayload, NewPayment, Payment, PaymentWithDebt},
};

#[derive(Clone)]
pub struct PaymentService {
    pool: SqlitePool,
    payment_repo: PaymentRepository,
    debt_repo: DebtRepository,
}

impl PaymentService {
    pub fn new(pool: SqlitePool, payment_repo: PaymentRepository, debt_repo: DebtRepository) -> Self {
        Self {
            pool,
            payment_repo,
            debt_repo,
        }
    }

    /// Registra o pagamento e abate o saldo da dívida como uma única unidade.
    ///
    /// As duas escritas (INSERT do pagamento e UPDATE da dívida) rodam na mesma
    /// transação: se qualquer uma falhar, nenhuma fica visível. O abatimento é
    /// feito dentro do próprio `UPDATE`, então pagamentos concorrentes na mesma
    /// dívida são serializados pelo lock de escrita do banco e nenhum se perde.
    pub async fn create_payment(
        &self,
        user_id: Option<i64>,
        payload: &CreatePaymentPayload,
        receipt_filename: Option<String>,
    ) -> Result<Payment, AppError> {
        // Data vazia = hoje
        let date = match payload.date.as_deref().filter(|d| !d.is_empty()) {
            Some(raw) => parse_date(raw).ok_or(AppError::InvalidPaymentData)?,
            None => Utc::now().date_naive(),
        };
        let now = Utc::now();

        // --- INÍCIO DA TRANSAÇÃO ---
        // Se algo falhar antes do commit, o drop do `tx` faz o rollback.
        let mut tx = self.pool.begin().await?;

        // 1. Insere o pagamento
        let payment = self
            .payment_repo
            .create_payment(
                &mut *tx,
                &NewPayment {
                    user_id,
                    amount: payload.amount,
                    debt_id: payload.debt_id,
                    receipt_filename,
                    date,
                    created_at: now,
                },
            )
            .await?;

        // 2. Abate o saldo da dívida
        let debt = self
            .debt_repo
            .apply_payment(&mut *tx, payment.debt_id, payment.amount, now)
            .await?;

        // 3. Commit das duas escritas juntas
        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        match debt {
            Some(debt) => {
                tracing::info!(
                    "💸 Pagamento {} de {:.2} aplicado na dívida {} (saldo {:.2})",
                    payment.id,
                    payment.amount,
                    debt.id,
                    debt.remaining_amount
                );
                if debt.paid {
                    tracing::info!("✅ Dívida {} quitada", debt.id);
                }
            }
            None => tracing::warn!(
                "Pagamento {} referencia a dívida {} que não existe",
                payment.id,
                payment.debt_id
            ),
        }
        Ok(payment)
    }

    /// Lista com os dados da dívida junto. `None` devolve todos os usuários.
    pub async fn get_all_payments(
        &self,
        user_id: Option<i64>,
    ) -> Result<Vec<PaymentWithDebt>, AppError> {
        self.payment_repo.get_all_payments(user_id).await
    }

    pub async fn get_payment_by_id(&self, id: i64) -> Result<Payment, AppError> {
        self.payment_repo
            .get_payment_by_id(id)
            .await?
            .ok_or(AppError::PaymentNotFound)
    }

    /// Remove só o pagamento. O saldo da dívida NÃO é restaurado.
    pub async fn delete_payment(&self, id: i64) -> Result<Payment, AppError> {
        let payment = self.get_payment_by_id(id).await?;

        if self.payment_repo.delete_payment(id).await? == 0 {
            return Err(AppError::PaymentNotFound);
        }
        Ok(payment)
    }
}
