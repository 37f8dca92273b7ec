// src/models/debt.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::dates::format_date, services::amortization::remaining_installments};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Debt {
    pub id: i64,
    pub user_id: Option<i64>,
    pub name: String,

    // Valores
    pub total_amount: f64,
    pub remaining_amount: f64, // Quanto falta pagar

    pub due_date: NaiveDate,
    pub interest_rate: f64,
    pub num_installments: i64,
    pub installment_amount: f64,
    pub payment_day: i64,

    // Gravado no banco: só muda por pagamento ou por edição completa
    pub paid: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha a ser inserida; o id e o `paid` ficam por conta do banco.
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub user_id: Option<i64>,
    pub name: String,
    pub total_amount: f64,
    pub remaining_amount: f64,
    pub due_date: NaiveDate,
    pub interest_rate: f64,
    pub num_installments: i64,
    pub installment_amount: f64,
    pub payment_day: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateDebtPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Financiamento do carro")]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "O valor total deve ser maior que zero."))]
    #[schema(example = 12000.0)]
    pub total_amount: f64,

    #[validate(range(min = 0.0, message = "O saldo devedor não pode ser negativo."))]
    #[schema(example = 9000.0)]
    pub remaining_amount: f64,

    #[validate(length(min = 1, message = "A data de vencimento é obrigatória."))]
    #[schema(example = "2024-03-15")]
    pub due_date: String,

    #[validate(range(min = 0.0, message = "A taxa de juros não pode ser negativa."))]
    #[serde(default)]
    pub interest_rate: f64,

    #[validate(range(min = 1, message = "O número de parcelas deve ser maior que zero."))]
    pub num_installments: i64,

    #[validate(range(exclusive_min = 0.0, message = "O valor da parcela deve ser maior que zero."))]
    pub installment_amount: f64,

    #[validate(range(min = 1, max = 31, message = "O dia de pagamento deve estar entre 1 e 31."))]
    pub payment_day: i64,
}

// Edição é substituição completa (não é patch), incluindo o `paid`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDebtPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "O valor total deve ser maior que zero."))]
    pub total_amount: f64,

    #[validate(range(min = 0.0, message = "O saldo devedor não pode ser negativo."))]
    pub remaining_amount: f64,

    #[validate(length(min = 1, message = "A data de vencimento é obrigatória."))]
    pub due_date: String,

    #[validate(range(min = 0.0, message = "A taxa de juros não pode ser negativa."))]
    #[serde(default)]
    pub interest_rate: f64,

    #[validate(range(min = 1, message = "O número de parcelas deve ser maior que zero."))]
    pub num_installments: i64,

    #[validate(range(exclusive_min = 0.0, message = "O valor da parcela deve ser maior que zero."))]
    pub installment_amount: f64,

    #[validate(range(min = 1, max = 31, message = "O dia de pagamento deve estar entre 1 e 31."))]
    pub payment_day: i64,

    #[serde(default)]
    pub paid: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DebtResponse {
    pub id: i64,
    pub name: String,
    pub total_amount: f64,
    pub remaining_amount: f64,
    #[schema(example = "2024-03-15")]
    pub due_date: String,
    pub interest_rate: f64,
    pub num_installments: i64,
    pub installment_amount: f64,
    pub payment_day: i64,
    pub remaining_payments: i64,
    pub paid: bool,
}

impl From<&Debt> for DebtResponse {
    fn from(debt: &Debt) -> Self {
        Self {
            id: debt.id,
            name: debt.name.clone(),
            total_amount: debt.total_amount,
            remaining_amount: debt.remaining_amount,
            due_date: format_date(debt.due_date),
            interest_rate: debt.interest_rate,
            num_installments: debt.num_installments,
            installment_amount: debt.installment_amount,
            payment_day: debt.payment_day,
            remaining_payments: remaining_installments(
                debt.remaining_amount,
                debt.installment_amount,
            ),
            paid: debt.paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn sample_debt() -> Debt {
        let now = Utc::now();
        Debt {
            id: 7,
            user_id: Some(1),
            name: "Cartão".into(),
            total_amount: 1000.0,
            remaining_amount: 450.0,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            interest_rate: 2.5,
            num_installments: 10,
            installment_amount: 100.0,
            payment_day: 10,
            paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn response_formats_due_date_and_derives_remaining_payments() {
        let response = DebtResponse::from(&sample_debt());
        assert_eq!(response.due_date, "2024-03-15");
        assert_eq!(response.remaining_payments, 4);
        assert!(!response.paid);
    }

    #[test]
    fn response_does_not_recompute_the_stored_paid_flag() {
        let mut debt = sample_debt();
        debt.remaining_amount = 0.0;
        debt.paid = false;
        let response = DebtResponse::from(&debt);
        assert_eq!(response.remaining_payments, 0);
        assert!(!response.paid);
    }

    #[test]
    fn payload_validation_rejects_out_of_range_fields() {
        let payload = CreateDebtPayload {
            name: "".into(),
            total_amount: 0.0,
            remaining_amount: -1.0,
            due_date: "2024-03-15".into(),
            interest_rate: 0.0,
            num_installments: 0,
            installment_amount: 50.0,
            payment_day: 32,
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("total_amount"));
        assert!(fields.contains_key("remaining_amount"));
        assert!(fields.contains_key("num_installments"));
        assert!(fields.contains_key("payment_day"));
        assert!(!fields.contains_key("installment_amount"));
    }
}
