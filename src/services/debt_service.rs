// src/services/debt_service.rs

use chrono::Utc;

use crate::{
    common::{dates::parse_date, error::AppError},
    db::DebtRepository,
    models::debt::{CreateDebtPayload, Debt, NewDebt, UpdateDebtPayload},
};

#[derive(Clone)]
pub struct DebtService {
    repo: DebtRepository,
}

impl DebtService {
    pub fn new(repo: DebtRepository) -> Self {
        Self { repo }
    }

    pub async fn create_debt(
        &self,
        user_id: Option<i64>,
        payload: &CreateDebtPayload,
    ) -> Result<Debt, AppError> {
        let due_date = parse_date(&payload.due_date).ok_or(AppError::InvalidDebtData)?;

        let debt = self
            .repo
            .create_debt(&NewDebt {
                user_id,
                name: payload.name.clone(),
                total_amount: payload.total_amount,
                remaining_amount: payload.remaining_amount,
                due_date,
                interest_rate: payload.interest_rate,
                num_installments: payload.num_installments,
                installment_amount: payload.installment_amount,
                payment_day: payload.payment_day,
                created_at: Utc::now(),
            })
            .await?;

        Ok(debt)
    }

    /// `None` devolve as dívidas de todos os usuários.
    pub async fn get_all_debts(&self, user_id: Option<i64>) -> Result<Vec<Debt>, AppError> {
        self.repo.get_all_debts(user_id).await
    }

    pub async fn get_debt_by_id(&self, id: i64) -> Result<Debt, AppError> {
        self.repo
            .get_debt_by_id(id)
            .await?
            .ok_or(AppError::DebtNotFound)
    }

    pub async fn update_debt(
        &self,
        id: i64,
        payload: &UpdateDebtPayload,
    ) -> Result<Debt, AppError> {
        let mut debt = self.get_debt_by_id(id).await?;

        let due_date = parse_date(&payload.due_date).ok_or(AppError::InvalidDebtData)?;

        // Substituição completa dos campos editáveis
        debt.name = payload.name.clone();
        debt.total_amount = payload.total_amount;
        debt.remaining_amount = payload.remaining_amount;
        debt.due_date = due_date;
        debt.interest_rate = payload.interest_rate;
        debt.num_installments = payload.num_installments;
        debt.installment_amount = payload.installment_amount;
        debt.payment_day = payload.payment_day;
        debt.paid = payload.paid;
        debt.updated_at = Utc::now();

        self.repo
            .update_debt(&debt)
            .await?
            .ok_or(AppError::DebtNotFound)
    }

    /// Remove a dívida (os pagamentos dela caem junto, por cascata).
    pub async fn delete_debt(&self, id: i64) -> Result<(), AppError> {
        self.get_debt_by_id(id).await?;

        if self.repo.delete_debt(id).await? == 0 {
            return Err(AppError::DebtNotFound);
        }

        tracing::info!("🗑️ Dívida {} removida", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        common::error::AppError,
        models::debt::{DebtResponse, UpdateDebtPayload},
        test_support::{debt_payload, test_state},
    };

    #[tokio::test]
    async fn crud_round_trip() {
        let (state, _db) = test_state().await;
        let service = &state.debt_service;

        let payload = debt_payload(900.0, 100.0);
        let created = service.create_debt(None, &payload).await.unwrap();
        assert!(created.id > 0);
        assert!(!created.paid);

        let fetched = service.get_debt_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, payload.name);
        assert_eq!(fetched.total_amount, payload.total_amount);
        assert_eq!(fetched.remaining_amount, 900.0);
        assert_eq!(fetched.interest_rate, payload.interest_rate);
        assert_eq!(fetched.num_installments, payload.num_installments);
        assert_eq!(fetched.installment_amount, 100.0);
        assert_eq!(fetched.payment_day, payload.payment_day);
        assert_eq!(fetched.created_at, created.created_at);

        tokio::time::sleep(Duration::from_millis(5)).await;

        let update = UpdateDebtPayload {
            name: "Cartão de crédito".into(),
            total_amount: 2000.0,
            remaining_amount: 1500.0,
            due_date: "2025-01-10".into(),
            interest_rate: 3.0,
            num_installments: 12,
            installment_amount: 125.0,
            payment_day: 10,
            paid: false,
        };
        service.update_debt(created.id, &update).await.unwrap();

        let reread = service.get_debt_by_id(created.id).await.unwrap();
        assert_eq!(reread.name, "Cartão de crédito");
        assert_eq!(reread.total_amount, 2000.0);
        assert_eq!(reread.remaining_amount, 1500.0);
        assert_eq!(DebtResponse::from(&reread).due_date, "2025-01-10");
        assert_eq!(reread.num_installments, 12);
        assert_eq!(reread.payment_day, 10);
        assert!(reread.updated_at > created.updated_at);

        service.delete_debt(created.id).await.unwrap();
        let err = service.get_debt_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::DebtNotFound));
    }

    #[tokio::test]
    async fn due_date_round_trips_through_the_response() {
        let (state, _db) = test_state().await;
        let created = state
            .debt_service
            .create_debt(None, &debt_payload(100.0, 10.0))
            .await
            .unwrap();

        let fetched = state.debt_service.get_debt_by_id(created.id).await.unwrap();
        assert_eq!(DebtResponse::from(&fetched).due_date, "2024-03-15");
    }

    #[tokio::test]
    async fn invalid_due_date_is_invalid_debt_data() {
        let (state, _db) = test_state().await;
        let mut payload = debt_payload(100.0, 10.0);
        payload.due_date = "15/03/2024".into();

        let err = state.debt_service.create_debt(None, &payload).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidDebtData));
        assert!(state.debt_service.get_all_debts(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_sets_the_paid_flag_from_the_request() {
        let (state, _db) = test_state().await;
        let created = state
            .debt_service
            .create_debt(None, &debt_payload(100.0, 10.0))
            .await
            .unwrap();

        let update = UpdateDebtPayload {
            name: created.name.clone(),
            total_amount: created.total_amount,
            remaining_amount: 40.0,
            due_date: "2024-03-15".into(),
            interest_rate: created.interest_rate,
            num_installments: created.num_installments,
            installment_amount: created.installment_amount,
            payment_day: created.payment_day,
            paid: true,
        };
        let updated = state.debt_service.update_debt(created.id, &update).await.unwrap();
        assert!(updated.paid);
        assert_eq!(updated.remaining_amount, 40.0);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (state, _db) = test_state().await;
        let service = &state.debt_service;

        let update = UpdateDebtPayload {
            name: "x".into(),
            total_amount: 1.0,
            remaining_amount: 1.0,
            due_date: "2024-03-15".into(),
            interest_rate: 0.0,
            num_installments: 1,
            installment_amount: 1.0,
            payment_day: 1,
            paid: false,
        };
        assert!(matches!(
            service.update_debt(404, &update).await.unwrap_err(),
            AppError::DebtNotFound
        ));
        assert!(matches!(
            service.delete_debt(404).await.unwrap_err(),
            AppError::DebtNotFound
        ));
    }

    #[tokio::test]
    async fn user_filter_is_advisory() {
        let (state, _db) = test_state().await;
        let ana = state
            .auth_service
            .register_user("ana@exemplo.com", "segredo123")
            .await
            .unwrap();

        state
            .debt_service
            .create_debt(Some(ana.id), &debt_payload(100.0, 10.0))
            .await
            .unwrap();
        state
            .debt_service
            .create_debt(None, &debt_payload(200.0, 10.0))
            .await
            .unwrap();

        let mine = state.debt_service.get_all_debts(Some(ana.id)).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, Some(ana.id));

        let everything = state.debt_service.get_all_debts(None).await.unwrap();
        assert_eq!(everything.len(), 2);
        // Mais recente primeiro
        assert_eq!(everything[0].remaining_amount, 200.0);
    }
}
