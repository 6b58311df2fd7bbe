use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

use super::Identity;

/// Bearer-token sessions held in memory.
///
/// Entries expire after `idle` without use. A restart logs everyone out.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Identity>,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(10_000)
            .time_to_idle(idle)
            .support_invalidation_closures()
            .build();

        Self { sessions }
    }

    pub async fn open(&self, identity: Identity) -> Uuid {
        let token = Uuid::new_v4();
        tracing::debug!(user_id = identity.user_id, "session_opened");
        self.sessions.insert(token, identity).await;
        token
    }

    pub async fn resolve(&self, token: Uuid) -> Option<Identity> {
        self.sessions.get(&token).await
    }

    pub async fn close(&self, token: Uuid) {
        self.sessions.invalidate(&token).await;
    }

    /// Drop every session belonging to `user_id`.
    pub fn revoke_user(&self, user_id: i32) {
        if let Err(e) = self
            .sessions
            .invalidate_entries_if(move |_, identity| identity.user_id == user_id)
        {
            tracing::error!(user_id, error = %e, "session_revoke_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::roles::RoleName;
    use std::collections::BTreeSet;

    fn identity(user_id: i32) -> Identity {
        Identity {
            user_id,
            username: format!("user{user_id}"),
            full_name: "Test User".into(),
            roles: BTreeSet::from([RoleName::Console]),
        }
    }

    #[tokio::test]
    async fn open_resolve_close() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.open(identity(1)).await;
        assert_eq!(store.resolve(token).await.map(|i| i.user_id), Some(1));

        store.close(token).await;
        assert!(store.resolve(token).await.is_none());
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_nothing() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.resolve(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn revoke_only_touches_that_user() {
        let store = SessionStore::new(Duration::from_secs(60));
        let a = store.open(identity(1)).await;
        let b = store.open(identity(2)).await;

        store.revoke_user(1);
        store.sessions.run_pending_tasks().await;

        assert!(store.resolve(a).await.is_none());
        assert!(store.resolve(b).await.is_some());
    }
}
