pub mod user_scope;
