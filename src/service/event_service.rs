use std::sync::Arc;

use crate::{
    domain::{Event, EventRequest, User, ROLE_ADMIN},
    error::{AppError, Result},
    repository::EventRepository,
};

pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        self.repo.list().await
    }

    pub async fn list_approved(&self) -> Result<Vec<Event>> {
        self.repo.list_approved().await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Event>> {
        self.repo.list_by_category(category).await
    }

    pub async fn get(&self, id: i64) -> Result<Event> {
        self.repo.find_by_id(id).await?
            .ok_or_else(|| not_found(id))
    }

    /// New events always wait for approval, whatever the request says.
    pub async fn create(&self, request: EventRequest) -> Result<Event> {
        request.validate()?;

        let event = self.repo.create(request).await?;
        tracing::info!("Created event {} ({}), pending approval", event.id, event.name);

        Ok(event)
    }

    /// Only admins can change the approval flag here; for anyone else the
    /// stored value is kept.
    pub async fn update(&self, id: i64, request: EventRequest, actor: &User) -> Result<Event> {
        request.validate()?;

        let approval = if actor.has_role(ROLE_ADMIN) {
            Some(request.is_approved)
        } else {
            None
        };

        self.repo.update(id, request, approval).await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Deleted event {}", id);
        Ok(())
    }

    pub async fn approve(&self, id: i64) -> Result<Event> {
        let event = self.repo.approve(id).await?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Approved event {}", id);
        Ok(event)
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Event not found with id: {}", id))
}
