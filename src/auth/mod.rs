use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use chrono::Utc;

use crate::{
    domain::{AuthResponse, LoginRequest, RegisterRequest, User, ROLE_USER},
    error::{AppError, Result},
    repository::{NewUser, TokenRepository, UserRepository},
};

pub mod jwt;

pub use jwt::{Claims, JwtService};

pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn TokenRepository>,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        token_repo: Arc<dyn TokenRepository>,
        jwt: JwtService,
    ) -> Self {
        Self { user_repo, token_repo, jwt }
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        let argon2 = Argon2::default();

        Ok(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }

    pub async fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(password_hash.to_string())
    }

    /// Creates an enabled account with the default role and signs it in.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        request.validate()?;

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(&request.password).await?;

        let user = self.user_repo
            .create(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
                phone: request.phone,
                role: ROLE_USER.to_string(),
            })
            .await?;

        tracing::info!("Registered user {} ({})", user.id, user.email);

        self.issue_token(&user).await
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        let password_hash = self.user_repo
            .find_password_hash(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !Self::verify_password(&request.password, &password_hash).await? {
            tracing::debug!("Failed login for {}", request.email);
            return Err(AppError::Unauthorized);
        }

        let user = self.user_repo
            .find_by_email(&request.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.can_sign_in() {
            return Err(AppError::Unauthorized);
        }

        self.issue_token(&user).await
    }

    /// Resolves a bearer token to the user it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let subject = self.jwt.extract_subject(token)?;

        let user = self.user_repo
            .find_by_email(&subject)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !self.jwt.is_valid(token, &user.email) || !user.can_sign_in() {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    async fn issue_token(&self, user: &User) -> Result<AuthResponse> {
        let token = self.jwt.issue(&user.email)?;
        self.token_repo.save(user.id, &token, Utc::now()).await?;

        Ok(AuthResponse { token })
    }
}
