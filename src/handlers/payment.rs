// src/handlers/payment.rs

use axum::{
    body::Body,
    extract::{Multipart, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::user_scope::UserScope,
    models::{
        message::MessageResponse,
        payment::{CreatePaymentPayload, Payment, PaymentResponse},
    },
};

#[utoipa::path(
    get,
    path = "/finances/payment",
    tag = "Payments",
    params(("X-User-ID" = Option<i64>, Header, description = "Filtra pelo dono")),
    responses((status = 200, description = "Pagamentos com os dados da dívida", body = [PaymentResponse]))
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
    UserScope(user_id): UserScope,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let payments = app_state.payment_service.get_all_payments(user_id).await?;
    Ok(Json(payments.iter().map(PaymentResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/finances/payment/{id}",
    tag = "Payments",
    params(("id" = i64, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "OK", body = Payment),
        (status = 404, description = "Pagamento não encontrado")
    )
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Payment>, AppError> {
    let payment = app_state.payment_service.get_payment_by_id(id).await?;
    Ok(Json(payment))
}

// Comprovante opcional que veio no formulário
struct UploadedReceipt {
    original_name: String,
    bytes: Vec<u8>,
}

// ---
// Leitura do formulário multipart
// ---
async fn read_payment_form(
    mut multipart: Multipart,
) -> Result<(CreatePaymentPayload, Option<UploadedReceipt>), AppError> {
    let mut amount = None;
    let mut debt_id = None;
    let mut date = None;
    let mut receipt = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "amount" => {
                let raw = field.text().await?;
                // "inf" e "NaN" passam no parse, mas não são valores válidos
                amount = Some(
                    raw.trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or(AppError::InvalidField("amount"))?,
                );
            }
            "debt_id" => {
                let raw = field.text().await?;
                debt_id = Some(
                    raw.trim()
                        .parse::<i64>()
                        .map_err(|_| AppError::InvalidField("debt_id"))?,
                );
            }
            "date" => date = Some(field.text().await?.trim().to_string()),
            "receipt" | "file" => {
                let original_name = field.file_name().unwrap_or("receipt").to_string();
                let bytes = field.bytes().await?;
                // Campo de arquivo enviado vazio = sem comprovante
                if !bytes.is_empty() {
                    receipt = Some(UploadedReceipt {
                        original_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let payload = CreatePaymentPayload {
        amount: amount.ok_or(AppError::InvalidField("amount"))?,
        debt_id: debt_id.ok_or(AppError::InvalidField("debt_id"))?,
        date,
    };
    Ok((payload, receipt))
}

#[utoipa::path(
    post,
    path = "/finances/payment",
    tag = "Payments",
    request_body(content = CreatePaymentPayload, content_type = "multipart/form-data",
        description = "Campos amount, debt_id, date e o arquivo opcional `receipt`"),
    responses(
        (status = 201, description = "Pagamento registrado e dívida abatida", body = Payment),
        (status = 400, description = "Formulário inválido")
    )
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    UserScope(user_id): UserScope,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let (payload, receipt) = read_payment_form(multipart).await?;
    payload.validate()?;

    // O arquivo só é gravado depois que o formulário passou na validação
    let receipt_filename = match receipt {
        Some(upload) => Some(
            app_state
                .receipt_storage
                .save(&upload.bytes, &upload.original_name)
                .await?,
        ),
        None => None,
    };

    match app_state
        .payment_service
        .create_payment(user_id, &payload, receipt_filename.clone())
        .await
    {
        Ok(payment) => Ok((StatusCode::CREATED, Json(payment))),
        Err(e) => {
            // Pagamento não gravado: o comprovante fica órfão
            if let Some(stored) = receipt_filename {
                app_state.receipt_storage.discard(&stored).await;
            }
            Err(e)
        }
    }
}

#[utoipa::path(
    delete,
    path = "/finances/payment/{id}",
    tag = "Payments",
    params(("id" = i64, Path, description = "ID do pagamento")),
    responses(
        (status = 200, description = "Removido; o saldo da dívida não é restaurado", body = MessageResponse),
        (status = 404, description = "Pagamento não encontrado")
    )
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.payment_service.delete_payment(id).await?;
    Ok(Json(MessageResponse::new("Pagamento removido com sucesso")))
}

#[utoipa::path(
    get,
    path = "/finances/payment/receipt/{filename}",
    tag = "Payments",
    params(("filename" = String, Path, description = "Nome gravado do comprovante")),
    responses(
        (status = 200, description = "Arquivo do comprovante"),
        (status = 404, description = "Comprovante não encontrado")
    )
)]
pub async fn get_receipt(
    State(app_state): State<AppState>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let path = app_state.receipt_storage.path_for(&filename);

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(AppError::ReceiptNotFound);
    }

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.map(Body::new).into_response(),
        Err(never) => match never {},
    };
    Ok(response)
}
