pub mod user_repo;
pub use user_repo::UserRepository;
pub mod debt_repo;
pub use debt_repo::DebtRepository;
pub mod income_repo;
pub use income_repo::IncomeRepository;
pub mod payment_repo;
pub use payment_repo::PaymentRepository;
