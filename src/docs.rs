// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,

        // --- Debts ---
        handlers::debt::list_debts,
        handlers::debt::get_debt,
        handlers::debt::create_debt,
        handlers::debt::update_debt,
        handlers::debt::delete_debt,

        // --- Incomes ---
        handlers::income::list_incomes,
        handlers::income::get_income,
        handlers::income::create_income,
        handlers::income::update_income,
        handlers::income::delete_income,

        // --- Payments ---
        handlers::payment::list_payments,
        handlers::payment::get_payment,
        handlers::payment::create_payment,
        handlers::payment::delete_payment,
        handlers::payment::get_receipt,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Debts ---
            models::debt::CreateDebtPayload,
            models::debt::UpdateDebtPayload,
            models::debt::DebtResponse,

            // --- Incomes ---
            models::income::IncomePayload,
            models::income::IncomeResponse,

            // --- Payments ---
            models::payment::Payment,
            models::payment::CreatePaymentPayload,
            models::payment::PaymentResponse,

            models::message::MessageResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registro e conferência de credenciais"),
        (name = "Debts", description = "Dívidas e parcelamentos"),
        (name = "Incomes", description = "Receitas"),
        (name = "Payments", description = "Pagamentos e comprovantes")
    ),
    modifiers(&UserHeaderAddon)
)]
pub struct ApiDoc;

// Documenta o cabeçalho X-User-ID usado como filtro de dono
struct UserHeaderAddon;

impl utoipa::Modify for UserHeaderAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "user_id_header",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-User-ID"))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/auth/register",
            "/auth/login",
            "/auth/logout",
            "/finances/debt",
            "/finances/debt/{id}",
            "/finances/income",
            "/finances/income/{id}",
            "/finances/payment",
            "/finances/payment/{id}",
            "/finances/payment/receipt/{filename}",
        ] {
            assert!(paths.contains(&expected), "faltando {expected}");
        }
    }
}
