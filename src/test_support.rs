//! Utilidades de teste: banco SQLite descartável e estado da aplicação.

use std::time::Duration;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    SqlitePool,
};
use tempfile::TempDir;

use crate::{
    config::{connect_pool, AppState},
    models::debt::{CreateDebtPayload, Debt},
    services::receipt_storage::ReceiptStorage,
};

// Custo mínimo do bcrypt, para os testes não ficarem lentos
pub const TEST_BCRYPT_COST: u32 = 4;

/// Mantém o diretório temporário vivo enquanto o teste usa o banco.
pub struct TestDb {
    pub pool: SqlitePool,
    pub dir: TempDir,
}

/// Cria um arquivo SQLite novo com as migrações aplicadas.
/// Arquivo (e não `:memory:`) para que várias conexões vejam o mesmo banco.
pub async fn setup_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("ledger.db"))
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(10));

    let pool = connect_pool(options, 5).await.unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();

    TestDb { pool, dir }
}

pub async fn test_state() -> (AppState, TestDb) {
    let db = setup_test_db().await;
    let receipts = ReceiptStorage::init(db.dir.path().join("uploads"))
        .await
        .unwrap();
    let state = AppState::from_parts(db.pool.clone(), receipts, TEST_BCRYPT_COST);
    (state, db)
}

pub fn debt_payload(remaining_amount: f64, installment_amount: f64) -> CreateDebtPayload {
    CreateDebtPayload {
        name: "Financiamento".into(),
        total_amount: remaining_amount.max(1.0),
        remaining_amount,
        due_date: "2024-03-15".into(),
        interest_rate: 1.5,
        num_installments: 10,
        installment_amount,
        payment_day: 15,
    }
}

/// Cria uma dívida sem dono com o saldo informado e parcelas de 10.
pub async fn create_test_debt(state: &AppState, remaining_amount: f64) -> Debt {
    state
        .debt_service
        .create_debt(None, &debt_payload(remaining_amount, 10.0))
        .await
        .unwrap()
}
