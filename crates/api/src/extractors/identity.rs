//! Caller identity extractor.
//!
//! Authentication and session issuance live in an upstream identity layer;
//! by the time a request reaches this service the gateway has already
//! verified the caller and forwards their identity as trusted headers.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the authenticated user id (uuid).
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role (`worker` or `manager`).
pub const USER_ROLE_HEADER: &str = "x-user-role";
/// Optional header carrying the caller's display name.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Caller role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Worker,
    Manager,
}

impl Role {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "worker" => Some(Role::Worker),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }
}

/// Authenticated caller identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
    pub display_name: String,
}

impl Identity {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Guards manager-only operations.
    pub fn require_manager(&self) -> Result<(), ApiError> {
        if self.is_manager() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Manager access required".to_string()))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("Missing x-user-id header".to_string()))?;
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| ApiError::Unauthenticated("Invalid x-user-id header".to_string()))?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(Role::parse)
            .ok_or_else(|| {
                ApiError::Unauthenticated("Missing or invalid x-user-role header".to_string())
            })?;

        let display_name = parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(Identity {
            user_id,
            role,
            display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("worker"), Some(Role::Worker));
        assert_eq!(Role::parse("manager"), Some(Role::Manager));
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_require_manager() {
        let manager = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Manager,
            display_name: "M".to_string(),
        };
        assert!(manager.require_manager().is_ok());

        let worker = Identity {
            user_id: Uuid::new_v4(),
            role: Role::Worker,
            display_name: "W".to_string(),
        };
        assert!(matches!(
            worker.require_manager(),
            Err(ApiError::Forbidden(_))
        ));
    }
}
