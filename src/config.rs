// src/config.rs

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{DebtRepository, IncomeRepository, PaymentRepository, UserRepository},
    services::{
        auth::AuthService, debt_service::DebtService, income_service::IncomeService,
        payment_service::PaymentService, receipt_storage::ReceiptStorage,
    },
};

/// Qual parte da API este processo expõe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Reader,
    Writer,
    Unified,
}

impl Scope {
    pub fn serves_reads(self) -> bool {
        matches!(self, Scope::Reader | Scope::Unified)
    }

    pub fn serves_writes(self) -> bool {
        matches!(self, Scope::Writer | Scope::Unified)
    }
}

impl FromStr for Scope {
    type Err = anyhow::Error;

    // Aceita `<app>` ou `<ambiente>-<app>` (ex: `prod-reader`)
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.trim().split('-').collect();
        let app = if parts.len() >= 2 { parts[1] } else { parts[0] };

        match app.to_ascii_lowercase().as_str() {
            "" | "unified" => Ok(Scope::Unified),
            "reader" => Ok(Scope::Reader),
            "writer" => Ok(Scope::Writer),
            other => anyhow::bail!("SCOPE desconhecido: '{}' (use reader, writer ou unified)", other),
        }
    }
}

// Configuração lida uma única vez, na inicialização
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub environment: String,
    pub log_level: String,
    pub cors_allowed_origins: String,
    pub server_timeout: u64,
    pub upload_dir: PathBuf,
    pub scope: Scope,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // O .env é opcional: em produção as variáveis vêm do ambiente
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = get("PORT", "8080")
            .parse()
            .context("PORT deve ser um número de porta válido")?;
        let server_timeout = get("SERVER_TIMEOUT", "60")
            .parse()
            .context("SERVER_TIMEOUT deve ser um número de segundos")?;
        let bcrypt_cost = get("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
            .parse()
            .context("BCRYPT_COST deve ser um número")?;
        let scope = get("SCOPE", "unified").parse()?;

        Ok(Self {
            port,
            database_url: get("DATABASE_URL", "sqlite://finance.db"),
            environment: get("ENVIRONMENT", "development"),
            log_level: get("LOG_LEVEL", "info"),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS", "*"),
            server_timeout,
            upload_dir: PathBuf::from(get("UPLOAD_DIR", "./uploads")),
            scope,
            bcrypt_cost,
        })
    }
}

pub async fn connect_pool(
    options: SqliteConnectOptions,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub debt_service: DebtService,
    pub income_service: IncomeService,
    pub payment_service: PaymentService,
    pub receipt_storage: ReceiptStorage,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("DATABASE_URL inválida: {}", config.database_url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let db_pool = connect_pool(options, 5)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let receipt_storage = ReceiptStorage::init(config.upload_dir.clone())
            .await
            .with_context(|| {
                format!("Falha ao criar a pasta de uploads {}", config.upload_dir.display())
            })?;

        Ok(Self::from_parts(db_pool, receipt_storage, config.bcrypt_cost))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_parts(db_pool: SqlitePool, receipt_storage: ReceiptStorage, bcrypt_cost: u32) -> Self {
        let debt_repo = DebtRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(UserRepository::new(db_pool.clone()), bcrypt_cost),
            debt_service: DebtService::new(debt_repo.clone()),
            income_service: IncomeService::new(IncomeRepository::new(db_pool.clone())),
            payment_service: PaymentService::new(
                db_pool.clone(),
                PaymentRepository::new(db_pool.clone()),
                debt_repo,
            ),
            receipt_storage,
            db_pool,
        }
    }
}
