//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

use super::enums::UserRole;

/// Staff user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
}

/// Update user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// JWT claims carried by every authenticated request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Any active staff account may run day-to-day ledger operations
    pub fn require_staff(&self) -> Result<(), AppError> {
        match self.role {
            UserRole::Admin | UserRole::Staff => Ok(()),
        }
    }

    /// User management and destructive deletes need the admin role
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == UserRole::Admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Admin role required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> UserClaims {
        UserClaims {
            sub: "test".to_string(),
            user_id: 1,
            role,
            exp: 4102444800,
            iat: 0,
        }
    }

    #[test]
    fn test_staff_cannot_pass_admin_gate() {
        assert!(claims(UserRole::Staff).require_admin().is_err());
        assert!(claims(UserRole::Staff).require_staff().is_ok());
    }

    #[test]
    fn test_admin_passes_both_gates() {
        assert!(claims(UserRole::Admin).require_admin().is_ok());
        assert!(claims(UserRole::Admin).require_staff().is_ok());
    }

    #[test]
    fn test_token_round_trip() {
        let c = claims(UserRole::Admin);
        let token = c.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 1);
        assert_eq!(parsed.role, UserRole::Admin);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let c = claims(UserRole::Staff);
        let token = c.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }
}
