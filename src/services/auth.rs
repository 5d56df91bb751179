//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{CreateUser, UpdateUser, User, UserClaims},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username/password and return a JWT token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Create a new user
    pub async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let hash = self.hash_password(&data.password)?;
        self.repository
            .users
            .insert(
                &data.username,
                &hash,
                data.display_name.as_deref(),
                data.role.unwrap_or(UserRole::Staff),
            )
            .await
    }

    /// Update a user
    pub async fn update_user(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        let hash = match &data.password {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };
        self.repository.users.update(id, data, hash.as_deref()).await
    }

    /// Seed the admin account on first run
    pub async fn ensure_bootstrap_admin(&self) -> AppResult<()> {
        if self.repository.users.is_empty().await? {
            let hash = self.hash_password(&self.config.bootstrap_admin_password)?;
            self.repository
                .users
                .insert("admin", &hash, Some("Administrator"), UserRole::Admin)
                .await?;
            tracing::info!("Created bootstrap admin account");
        }
        Ok(())
    }
}
