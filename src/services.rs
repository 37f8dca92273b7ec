pub mod amortization;
pub mod auth;
pub mod debt_service;
pub mod income_service;
pub mod payment_service;
pub mod receipt_storage;
