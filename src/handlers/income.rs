// src/handlers/income.rs

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
        income::{IncomePayload, IncomeResponse},
        message::MessageResponse,
    },
};

#[utoipa::path(
    get,
    path = "/finances/income",
    tag = "Incomes",
    params(("X-User-ID" = Option<i64>, Header, description = "Filtra pelo dono")),
    responses((status = 200, description = "Receitas por data, mais recentes primeiro", body = [IncomeResponse]))
)]
pub async fn list_incomes(
    State(app_state): State<AppState>,
    UserScope(user_id): UserScope,
) -> Result<Json<Vec<IncomeResponse>>, AppError> {
    let incomes = app_state.income_service.get_all_incomes(user_id).await?;
    Ok(Json(incomes.iter().map(IncomeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/finances/income/{id}",
    tag = "Incomes",
    params(("id" = i64, Path, description = "ID da receita")),
    responses(
        (status = 200, description = "OK", body = IncomeResponse),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn get_income(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<IncomeResponse>, AppError> {
    let income = app_state.income_service.get_income_by_id(id).await?;
    Ok(Json(IncomeResponse::from(&income)))
}

#[utoipa::path(
    post,
    path = "/finances/income",
    tag = "Incomes",
    request_body = IncomePayload,
    responses(
        (status = 201, description = "Receita criada", body = IncomeResponse),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_income(
    State(app_state): State<AppState>,
    UserScope(user_id): UserScope,
    Json(payload): Json<IncomePayload>,
) -> Result<(StatusCode, Json<IncomeResponse>), AppError> {
    payload.validate()?;

    let income = app_state.income_service.create_income(user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(IncomeResponse::from(&income))))
}

#[utoipa::path(
    put,
    path = "/finances/income/{id}",
    tag = "Incomes",
    params(("id" = i64, Path, description = "ID da receita")),
    request_body = IncomePayload,
    responses(
        (status = 200, description = "OK", body = IncomeResponse),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn update_income(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<IncomePayload>,
) -> Result<Json<IncomeResponse>, AppError> {
    payload.validate()?;

    let income = app_state.income_service.update_income(id, &payload).await?;
    Ok(Json(IncomeResponse::from(&income)))
}

#[utoipa::path(
    delete,
    path = "/finances/income/{id}",
    tag = "Incomes",
    params(("id" = i64, Path, description = "ID da receita")),
    responses(
        (status = 200, description = "OK", body = MessageResponse),
        (status = 404, description = "Receita não encontrada")
    )
)]
pub async fn delete_income(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.income_service.delete_income(id).await?;
    Ok(Json(MessageResponse::new("Receita removida com sucesso")))
}
