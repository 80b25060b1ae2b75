use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    api::state::AppState,
    domain::{User, ROLE_ADMIN},
    error::{AppError, Result},
};

#[derive(Clone)]
pub struct CurrentUser {
    pub user: User,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User> {
    let token = bearer_token(headers)?;
    state.service_context.auth_service.authenticate(token).await
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let user = authenticate(&state, request.headers()).await?;

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let user = authenticate(&state, request.headers()).await?;

    if !user.has_role(ROLE_ADMIN) {
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(request).await)
}
