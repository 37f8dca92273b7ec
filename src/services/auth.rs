// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;

use crate::{common::error::AppError, db::UserRepository, models::auth::User};

// Registro e conferência de credenciais. Não há tokens nem sessões:
// o login apenas confirma que e-mail e senha batem.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, bcrypt_cost: u32) -> Self {
        Self { user_repo, bcrypt_cost }
    }

    pub async fn register_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing em thread separada para não travar o runtime
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed_password = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .user_repo
            .create_user(email, &hashed_password, Utc::now())
            .await?;

        tracing::info!("👤 Usuário {} registrado", user.id);
        Ok(user)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<User, AppError> {
        // E-mail desconhecido não pode ser distinguido de senha errada
        let user = match self.get_user_by_email(email).await {
            Err(AppError::UserNotFound) => return Err(AppError::InvalidCredentials),
            other => other?,
        };

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, AppError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}
