// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::{AuthResponse, LoginUserPayload, RegisterUserPayload},
        message::MessageResponse,
    },
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário registrado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    payload.validate()?;

    let user = app_state
        .auth_service
        .register_user(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Usuário registrado com sucesso".into(),
            user_id: user.id,
            email: user.email,
        }),
    ))
}

// Handler de login: só confere as credenciais
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Credenciais válidas", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let user = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse {
        message: "Login realizado com sucesso".into(),
        user_id: user.id,
        email: user.email,
    }))
}

// Sem sessão no servidor: o logout só confirma
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Logout", body = MessageResponse))
)]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logout realizado com sucesso"))
}
