// src/handlers/debt.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::user_scope::UserScope,
    models::{
        debt::{CreateDebtPayload, DebtResponse, UpdateDebtPayload},
        message::MessageResponse,
    },
};

#[utoipa::path(
    get,
    path = "/finances/debt",
    tag = "Debts",
    params(("X-User-ID" = Option<i64>, Header, description = "Filtra pelo dono")),
    responses((status = 200, description = "Dívidas, mais recentes primeiro", body = [DebtResponse]))
)]
pub async fn list_debts(
    State(app_state): State<AppState>,
    UserScope(user_id): UserScope,
) -> Result<Json<Vec<DebtResponse>>, AppError> {
    let debts = app_state.debt_service.get_all_debts(user_id).await?;
    Ok(Json(debts.iter().map(DebtResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/finances/debt/{id}",
    tag = "Debts",
    params(("id" = i64, Path, description = "ID da dívida")),
    responses(
        (status = 200, description = "OK", body = DebtResponse),
        (status = 404, description = "Dívida não encontrada")
    )
)]
pub async fn get_debt(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DebtResponse>, AppError> {
    let debt = app_state.debt_service.get_debt_by_id(id).await?;
    Ok(Json(DebtResponse::from(&debt)))
}

#[utoipa::path(
    post,
    path = "/finances/debt",
    tag = "Debts",
    request_body = CreateDebtPayload,
    responses(
        (status = 201, description = "Dívida criada", body = DebtResponse),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_debt(
    State(app_state): State<AppState>,
    UserScope(user_id): UserScope,
    Json(payload): Json<CreateDebtPayload>,
) -> Result<(StatusCode, Json<DebtResponse>), AppError> {
    payload.validate()?;

    let debt = app_state.debt_service.create_debt(user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(DebtResponse::from(&debt))))
}

#[utoipa::path(
    put,
    path = "/finances/debt/{id}",
    tag = "Debts",
    params(("id" = i64, Path, description = "ID da dívida")),
    request_body = UpdateDebtPayload,
    responses(
        (status = 200, description = "OK", body = DebtResponse),
        (status = 404, description = "Dívida não encontrada")
    )
)]
pub async fn update_debt(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDebtPayload>,
) -> Result<Json<DebtResponse>, AppError> {
    payload.validate()?;

    let debt = app_state.debt_service.update_debt(id, &payload).await?;
    Ok(Json(DebtResponse::from(&debt)))
}

#[utoipa::path(
    delete,
    path = "/finances/debt/{id}",
    tag = "Debts",
    params(("id" = i64, Path, description = "ID da dívida")),
    responses(
        (status = 200, description = "OK", body = MessageResponse),
        (status = 404, description = "Dívida não encontrada")
    )
)]
pub async fn delete_debt(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.debt_service.delete_debt(id).await?;
    Ok(Json(MessageResponse::new("Dívida removida com sucesso")))
}
