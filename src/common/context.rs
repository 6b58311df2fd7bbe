use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, header, request::Parts};
use uuid::Uuid;

use crate::common::AppState;
use crate::error::{AppError, AuthError};
use crate::identity::Identity;
use crate::identity::permissions::{Permission, PermissionSet};

pub const NOTICE_HEADER: HeaderName = HeaderName::from_static("x-notice");

/// Per-request view of the caller.
///
/// Built from the bearer token on every request and handed to handlers
/// explicitly; nothing about the current user lives in shared state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub token: Uuid,
    pub identity: Identity,
    pub permissions: PermissionSet,
    notices: Vec<String>,
}

impl RequestContext {
    #[must_use]
    pub fn new(token: Uuid, identity: Identity) -> Self {
        let permissions = PermissionSet::from_roles(&identity.roles);
        Self {
            token,
            identity,
            permissions,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> i32 {
        self.identity.user_id
    }

    /// Fail with `Forbidden` unless the caller holds `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), AuthError> {
        self.permissions.require(permission)
    }

    /// Queue a message for the caller alongside the response.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    pub fn extend_notices(&mut self, messages: impl IntoIterator<Item = String>) {
        self.notices.extend(messages);
    }

    /// Drain pending messages into one `x-notice` header each.
    pub fn notice_headers(&mut self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for notice in std::mem::take(&mut self.notices) {
            match HeaderValue::from_str(&notice) {
                Ok(value) => {
                    headers.append(NOTICE_HEADER, value);
                }
                Err(_) => tracing::debug!(%notice, "notice_not_header_safe"),
            }
        }
        headers
    }
}

/// Token from an `Authorization: Bearer <uuid>` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    token.trim().parse().ok()
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::Unauthenticated)?;
        let identity = state
            .sessions
            .resolve(token)
            .await
            .ok_or(AuthError::Unauthenticated)?;

        Ok(Self::new(token, identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::roles::RoleName;
    use std::collections::BTreeSet;

    #[test]
    fn parses_bearer_header() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        assert_eq!(bearer_token(&headers), Some(token));
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic YWRtaW46YWRtaW4="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-uuid"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn notices_drain_into_headers() {
        let identity = Identity {
            user_id: 7,
            username: "console".into(),
            full_name: "Con Sole".into(),
            roles: BTreeSet::from([RoleName::Console]),
        };
        let mut ctx = RequestContext::new(Uuid::new_v4(), identity);
        assert!(ctx.require(Permission::RecordCastPhases).is_ok());
        assert!(ctx.require(Permission::ManageUsers).is_err());

        ctx.notify("capture start saved before beginning position was recorded");
        ctx.extend_notices(["second".to_string()]);

        let headers = ctx.notice_headers();
        assert_eq!(headers.get_all(NOTICE_HEADER).iter().count(), 2);
        assert!(ctx.notice_headers().is_empty());
    }
}
