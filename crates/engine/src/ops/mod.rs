use std::sync::Arc;

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::{EngineError, MemoryStore, ResultEngine, SqlStore, repository::Store};

mod access;
mod cities;
mod hotels;
mod imports;
mod sessions;
mod users;

pub use access::{Caller, ManagerContext, Role};
pub use imports::Upsert;

/// Sessions live two weeks unless configured otherwise.
const DEFAULT_SESSION_TTL_HOURS: i64 = 24 * 14;

pub struct Engine {
    store: Arc<dyn Store>,
    session_ttl: Duration,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("session_ttl", &self.session_ttl)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    store: Option<Arc<dyn Store>>,
    session_ttl: Duration,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            store: None,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        }
    }
}

impl EngineBuilder {
    /// Persist through sea-orm on the given database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.store = Some(Arc::new(SqlStore::new(db)));
        self
    }

    /// Keep everything in process memory
    pub fn in_memory(mut self) -> EngineBuilder {
        self.store = Some(Arc::new(MemoryStore::new()));
        self
    }

    /// Use any repository implementation
    pub fn store(mut self, store: Arc<dyn Store>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    pub fn session_ttl(mut self, ttl: Duration) -> EngineBuilder {
        self.session_ttl = ttl;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self.store.ok_or(EngineError::MissingStore)?;
        Ok(Engine {
            store,
            session_ttl: self.session_ttl,
        })
    }
}
