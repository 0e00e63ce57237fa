//! JWT authentication middleware.
//!
//! Several read routes are public, so the middleware attaches an identity
//! when a token is present rather than demanding one; the policy table then
//! decides per route what an anonymous caller may do. A present-but-invalid
//! token is still rejected outright.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::Role;
use crate::errors::AppError;

/// Authenticated caller extracted from a JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Resolve the caller's role from an optional identity.
pub fn role_of(user: Option<&CurrentUser>) -> Option<Role> {
    user.map(|u| u.role)
}

/// Optional-authentication middleware.
///
/// When an Authorization header is present it must carry a valid Bearer
/// token; the decoded identity is injected into the request extensions.
/// Requests without the header pass through anonymously.
pub async fn auth_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(auth_header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        let token = auth_header
            .strip_prefix(BEARER_TOKEN_PREFIX)
            .ok_or(AppError::Unauthorized)?;

        let claims = state.auth_service.verify_token(token)?;
        let role = Role::parse(&claims.role).ok_or(AppError::Unauthorized)?;

        let current_user = CurrentUser {
            id: claims.sub,
            username: claims.username,
            role,
        };
        request.extensions_mut().insert(current_user);
    }

    Ok(next.run(request).await)
}
