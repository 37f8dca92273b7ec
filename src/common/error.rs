// src/common/error.rs

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Formulário inválido: {0}")]
    InvalidMultipart(#[from] MultipartError),

    // Campo de formulário ausente ou que não pôde ser convertido
    #[error("Campo inválido ou ausente: {0}")]
    InvalidField(&'static str),

    #[error("Dívida não encontrada")]
    DebtNotFound,

    #[error("Receita não encontrada")]
    IncomeNotFound,

    #[error("Pagamento não encontrado")]
    PaymentNotFound,

    #[error("Comprovante não encontrado")]
    ReceiptNotFound,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Dados da dívida inválidos")]
    InvalidDebtData,

    #[error("Dados da receita inválidos")]
    InvalidIncomeData,

    #[error("Dados do pagamento inválidos")]
    InvalidPaymentData,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro ao gravar comprovante: {0}")]
    ReceiptStorageError(#[from] std::io::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidMultipart(_)
            | AppError::InvalidField(_)
            | AppError::InvalidDebtData
            | AppError::InvalidIncomeData
            | AppError::InvalidPaymentData => StatusCode::BAD_REQUEST,
            AppError::DebtNotFound
            | AppError::IncomeNotFound
            | AppError::PaymentNotFound
            | AppError::ReceiptNotFound
            | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_)
            | AppError::BcryptError(_)
            | AppError::ReceiptStorageError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Código estável enviado no campo `error` da resposta.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidMultipart(_) => "error_parsing_form",
            AppError::InvalidField(_) => "invalid_field",
            AppError::DebtNotFound => "debt_not_found",
            AppError::IncomeNotFound => "income_not_found",
            AppError::PaymentNotFound => "payment_not_found",
            AppError::ReceiptNotFound => "file_not_found",
            AppError::UserNotFound => "user_not_found",
            AppError::InvalidDebtData => "invalid_debt_data",
            AppError::InvalidIncomeData => "invalid_income_data",
            AppError::InvalidPaymentData => "invalid_payment_data",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::DatabaseError(_) => "database_error",
            AppError::BcryptError(_)
            | AppError::ReceiptStorageError(_)
            | AppError::InternalServerError(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": code,
                    "message": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::DebtNotFound => "Dívida não encontrada.".to_string(),
            AppError::IncomeNotFound => "Receita não encontrada.".to_string(),
            AppError::PaymentNotFound => "Pagamento não encontrado.".to_string(),
            AppError::ReceiptNotFound => "Arquivo de comprovante não encontrado.".to_string(),
            AppError::UserNotFound => "Usuário não encontrado.".to_string(),
            AppError::InvalidDebtData
            | AppError::InvalidIncomeData
            | AppError::InvalidPaymentData => {
                "Data inválida, use o formato AAAA-MM-DD.".to_string()
            }
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::InvalidMultipart(_) | AppError::InvalidField(_) => self.to_string(),

            // Erros internos viram 500. O detalhe fica no log, não na resposta.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": code, "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_input_errors_are_distinct_from_storage_errors() {
        assert_eq!(AppError::DebtNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::IncomeNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::PaymentNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidDebtData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidPaymentData.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::DatabaseError(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn internal_errors_hide_details_from_the_client() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "database_error");
        assert_eq!(body["message"], "Ocorreu um erro inesperado.");
    }
}
