pub mod auth;
pub mod debt;
pub mod income;
pub mod message;
pub mod payment;
