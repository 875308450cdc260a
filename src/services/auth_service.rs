//! Authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    constants::roles,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::{normalize_email, sanitize_string},
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub name: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Freshly issued bearer token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new student account and issue a token
    pub async fn signup(
        pool: &PgPool,
        jwt: &JwtConfig,
        email: &str,
        name: &str,
        password: &str,
    ) -> AppResult<(User, IssuedToken)> {
        let email = normalize_email(email);
        let name = sanitize_string(name);

        if UserRepository::find_by_email(pool, &email).await?.is_some() {
            return Err(email_taken());
        }

        let password_hash = Self::hash_password(password)?;

        // A concurrent signup can still win the unique index
        let user = UserRepository::create(pool, &email, &name, &password_hash, roles::STUDENT)
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists(_) => email_taken(),
                other => other,
            })?;

        tracing::info!(user_id = %user.id, "User signed up");

        let token = Self::generate_access_token(&user, jwt)?;
        Ok((user, token))
    }

    /// Login with email and password
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        email: &str,
        password: &str,
    ) -> AppResult<(User, IssuedToken)> {
        let user = UserRepository::find_by_email(pool, &normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        let token = Self::generate_access_token(&user, jwt)?;
        Ok((user, token))
    }

    /// Get user by ID
    pub async fn get_user_by_id(pool: &PgPool, user_id: &Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(pool, user_id).await
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    pub fn generate_access_token(user: &User, jwt: &JwtConfig) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(jwt.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: jwt.expiry_hours * 3600,
        })
    }
}

fn email_taken() -> AppError {
    AppError::Conflict("Email already registered".to_string())
}
