pub mod auth;
pub mod debt;
pub mod income;
pub mod payment;
