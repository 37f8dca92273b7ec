// src/services/income_service.rs

use chrono::Utc;

use crate::{
    common::{dates::parse_date, error::AppError},
    db::IncomeRepository,
    models::income::{Income, IncomePayload},
};

#[derive(Clone)]
pub struct IncomeService {
    repo: IncomeRepository,
}

impl IncomeService {
    pub fn new(repo: IncomeRepository) -> Self {
        Self { repo }
    }

    pub async fn create_income(
        &self,
        user_id: Option<i64>,
        payload: &IncomePayload,
    ) -> Result<Income, AppError> {
        let date = parse_date(&payload.date).ok_or(AppError::InvalidIncomeData)?;

        self.repo
            .create_income(user_id, payload.amount, &payload.source, date, Utc::now())
            .await
    }

    pub async fn get_all_incomes(&self, user_id: Option<i64>) -> Result<Vec<Income>, AppError> {
        self.repo.get_all_incomes(user_id).await
    }

    pub async fn get_income_by_id(&self, id: i64) -> Result<Income, AppError> {
        self.repo
            .get_income_by_id(id)
            .await?
            .ok_or(AppError::IncomeNotFound)
    }

    pub async fn update_income(&self, id: i64, payload: &IncomePayload) -> Result<Income, AppError> {
        let mut income = self.get_income_by_id(id).await?;

        income.date = parse_date(&payload.date).ok_or(AppError::InvalidIncomeData)?;
        income.amount = payload.amount;
        income.source = payload.source.clone();
        income.updated_at = Utc::now();

        self.repo
            .update_income(&income)
            .await?
            .ok_or(AppError::IncomeNotFound)
    }

    pub async fn delete_income(&self, id: i64) -> Result<(), AppError> {
        self.get_income_by_id(id).await?;

        if self.repo.delete_income(id).await? == 0 {
            return Err(AppError::IncomeNotFound);
        }
        Ok(())
    }
}
