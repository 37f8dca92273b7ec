// src/models/payment.rs

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::dates::format_date, services::amortization::remaining_installments};

// Rota que serve os comprovantes; o `receipt_url` aponta para ela
pub const RECEIPT_ROUTE_PREFIX: &str = "/finances/payment/receipt/";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i64,
    pub user_id: Option<i64>,
    pub amount: f64,
    pub debt_id: i64,
    pub receipt_filename: Option<String>,
    #[schema(value_type = String, format = Date, example = "2024-03-15")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: Option<i64>,
    pub amount: f64,
    pub debt_id: i64,
    pub receipt_filename: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Pagamento junto com os dados da dívida (só leitura, nunca gravado).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PaymentWithDebt {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub payment: Payment,
    pub debt_name: String,
    pub debt_remaining_amount: f64,
    pub debt_installment_amount: f64,
}

// Campos do formulário multipart (o arquivo `receipt` vem à parte)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentPayload {
    #[validate(range(exclusive_min = 0.0, message = "O valor deve ser maior que zero."))]
    #[schema(example = 250.0)]
    pub amount: f64,

    #[validate(range(min = 1, message = "O campo 'debt_id' é obrigatório."))]
    pub debt_id: i64,

    // Vazio = hoje
    #[schema(example = "2024-03-15")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    pub debt_id: i64,
    pub amount: f64,
    #[schema(example = "2024-03-15")]
    pub date: String,
    pub created_at: String,
    pub debt_name: String,
    pub remaining_installments: i64,
    pub remaining_amount: f64,
    #[schema(example = "/finances/payment/receipt/1710460800_boleto.pdf")]
    pub receipt_url: String,
}

pub fn receipt_url(receipt_filename: Option<&str>) -> String {
    match receipt_filename {
        Some(name) if !name.is_empty() => format!("{RECEIPT_ROUTE_PREFIX}{name}"),
        _ => String::new(),
    }
}

impl From<&PaymentWithDebt> for PaymentResponse {
    fn from(pwd: &PaymentWithDebt) -> Self {
        let payment = &pwd.payment;
        Self {
            id: payment.id,
            debt_id: payment.debt_id,
            amount: payment.amount,
            date: format_date(payment.date),
            created_at: payment.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            debt_name: pwd.debt_name.clone(),
            remaining_installments: remaining_installments(
                pwd.debt_remaining_amount,
                pwd.debt_installment_amount,
            ),
            remaining_amount: pwd.debt_remaining_amount,
            receipt_url: receipt_url(payment.receipt_filename.as_deref()),
        }
    }
}
