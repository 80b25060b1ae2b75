use std::sync::Arc;

use crate::{
    auth::AuthService,
    domain::{UpdateUserRequest, User, ROLE_ADMIN},
    error::{AppError, Result},
    repository::{UserChanges, UserRepository},
};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.repo.find_by_id(id).await?
            .ok_or_else(|| not_found(id))
    }

    /// Replaces only the fields present in the request.
    pub async fn update(&self, actor: &User, id: i64, request: UpdateUserRequest) -> Result<User> {
        ensure_can_manage(actor, id)?;
        request.validate()?;

        let password_hash = match request.password {
            Some(ref password) => Some(AuthService::hash_password(password).await?),
            None => None,
        };

        let changes = UserChanges {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash,
        };

        self.repo.update(id, changes).await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, actor: &User, id: i64) -> Result<()> {
        ensure_can_manage(actor, id)?;

        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}

/// Users manage their own account; admins manage everyone's.
fn ensure_can_manage(actor: &User, id: i64) -> Result<()> {
    if actor.id == id || actor.has_role(ROLE_ADMIN) {
        Ok(())
    } else {
        tracing::warn!("User {} tried to modify user {}", actor.id, id);
        Err(AppError::Forbidden)
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User not found with id: {}", id))
}
