use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Roles allowed into the dashboard.
pub const STAFF_ROLES: [&str; 2] = ["administrator", "manager"];

/// Identity resolved upstream and carried as a signed bearer token.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub role: String,
    pub exp: usize,
}

/// Who is looking at the page. Anonymous when no token is sent.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub user_name: Option<String>,
    pub role_name: Option<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_staff(&self) -> bool {
        self.role_name
            .as_deref()
            .is_some_and(|role| STAFF_ROLES.contains(&role))
    }
}

/// A viewer whose role grants dashboard access.
#[derive(Debug, Clone)]
pub struct StaffUser(pub Viewer);

pub fn ensure_staff(viewer: &Viewer) -> Result<(), AppError> {
    if !viewer.is_staff() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn decode_viewer(token: &str, secret: &str) -> Result<Viewer, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::BadRequest("Invalid or expired token".into()))?;

    Ok(Viewer {
        user_name: Some(decoded.claims.name),
        role_name: Some(decoded.claims.role),
    })
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
            return Ok(Viewer::anonymous());
        };

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::BadRequest("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

        decode_viewer(token, &secret)
    }
}

impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let viewer = Viewer::from_request_parts(parts, state).await?;
        ensure_staff(&viewer)?;
        Ok(StaffUser(viewer))
    }
}
