// src/routes.rs

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::{AppState, Config, Scope},
    docs::ApiDoc,
    handlers,
    services::receipt_storage::MAX_RECEIPT_SIZE,
};

async fn health() -> &'static str {
    "OK - PayVue API Server"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// Somente leitura (processo "reader")
fn reader_routes() -> Router<AppState> {
    Router::new()
        .route("/finances/income", get(handlers::income::list_incomes))
        .route("/finances/income/{id}", get(handlers::income::get_income))
        .route("/finances/debt", get(handlers::debt::list_debts))
        .route("/finances/debt/{id}", get(handlers::debt::get_debt))
        .route("/finances/payment", get(handlers::payment::list_payments))
        .route("/finances/payment/{id}", get(handlers::payment::get_payment))
        .route(
            "/finances/payment/receipt/{filename}",
            get(handlers::payment::get_receipt),
        )
}

// Mutações (processo "writer")
fn writer_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/finances/income", post(handlers::income::create_income))
        .route(
            "/finances/income/{id}",
            put(handlers::income::update_income)
                .delete(handlers::income::delete_income),
        )
        .route("/finances/debt", post(handlers::debt::create_debt))
        .route(
            "/finances/debt/{id}",
            put(handlers::debt::update_debt).delete(handlers::debt::delete_debt),
        )
        .route(
            "/finances/payment",
            post(handlers::payment::create_payment)
                .layer(DefaultBodyLimit::max(MAX_RECEIPT_SIZE)),
        )
        .route(
            "/finances/payment/{id}",
            delete(handlers::payment::delete_payment),
        )
}

/// Monta o router com o subconjunto de rotas que o `scope` expõe.
pub fn build_router(app_state: AppState, scope: Scope) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    if scope.serves_reads() {
        router = router.merge(reader_routes());
    }
    if scope.serves_writes() {
        router = router.merge(writer_routes());
    }

    router.with_state(app_state)
}

fn cors_layer(allowed_origins: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-user-id"),
        ])
        .expose_headers([header::LINK])
        .max_age(Duration::from_secs(300));

    if allowed_origins.trim() == "*" {
        // Com origem curinga o navegador não aceita credenciais
        return Ok(cors.allow_origin(Any));
    }

    let origins = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true))
}

/// Camadas aplicadas a todas as rotas: log de requisições, timeout e CORS.
pub fn with_http_layers(router: Router, config: &Config) -> anyhow::Result<Router> {
    Ok(router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server_timeout),
        ))
        .layer(cors_layer(&config.cors_allowed_origins)?)
        .layer(TraceLayer::new_for_http()))
}
