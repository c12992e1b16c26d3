//! Session middleware configuration.
//!
//! Sessions live in a `moka` cache with the same idle expiry and capacity as
//! the session contexts, so a session record and its
//! [`SessionContext`](crate::assistant::SessionContext) age out together.
//! The session only carries the context id; nothing is persisted.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};
use tower_sessions::{Expiry, SessionManagerLayer};

use crate::assistant::MAX_SESSIONS;
use crate::config::AssistantConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "fa_session";

/// In-memory session store that evicts idle and excess records.
#[derive(Clone, Debug)]
pub struct SessionCache {
    records: Cache<Id, Record>,
}

impl SessionCache {
    #[must_use]
    pub fn new(idle: Duration, max_capacity: u64) -> Self {
        let records = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();

        Self { records }
    }
}

#[async_trait]
impl SessionStore for SessionCache {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let record = self.records.get(id).await;
        Ok(record.filter(|r| r.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.records.invalidate(id).await;
        Ok(())
    }
}

/// Create the session layer.
///
/// Sessions expire after the configured inactivity period, matching the
/// lifetime of the session contexts.
#[must_use]
pub fn create_session_layer(config: &AssistantConfig) -> SessionManagerLayer<SessionCache> {
    let idle_seconds = i64::try_from(config.session_idle.as_secs()).unwrap_or(i64::MAX);
    let store = SessionCache::new(config.session_idle, MAX_SESSIONS);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
