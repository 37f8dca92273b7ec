// src/models/income.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::dates::format_date;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Income {
    pub id: i64,
    pub user_id: Option<i64>,
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Criação e edição usam o mesmo formato
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct IncomePayload {
    #[validate(range(exclusive_min = 0.0, message = "O valor deve ser maior que zero."))]
    #[schema(example = 3500.0)]
    pub amount: f64,

    #[validate(length(min = 1, message = "A origem é obrigatória."))]
    #[schema(example = "Salário")]
    pub source: String,

    #[validate(length(min = 1, message = "A data é obrigatória."))]
    #[schema(example = "2024-03-05")]
    pub date: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IncomeResponse {
    pub id: i64,
    pub amount: f64,
    pub source: String,
    #[schema(example = "2024-03-05")]
    pub date: String,
}

impl From<&Income> for IncomeResponse {
    fn from(income: &Income) -> Self {
        Self {
            id: income.id,
            amount: income.amount,
            source: income.source.clone(),
            date: format_date(income.date),
        }
    }
}
