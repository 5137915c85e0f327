use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::{
    amm::Dex,
    connection::{Connection, Owner},
};

/// Builds a fresh session from a connection and an owner
///
/// Implemented by an SDK binding; construction typically fetches program and
/// pool metadata over the connection.
pub trait SessionLoader: Send + Sync {
    type Session: Dex;

    fn load(
        &self,
        connection: &Connection,
        owner: Option<&Owner>,
    ) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// Arguments of a session request
#[derive(Debug, Clone)]
pub struct InitParams {
    pub connection: Connection,
    pub owner: Option<Owner>,
    pub reload: bool,
}

impl InitParams {
    pub fn new(connection: Connection, owner: Option<Owner>) -> Self {
        Self {
            connection,
            owner,
            reload: false,
        }
    }

    pub fn with_reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }
}

/// Caller-owned cache holding at most one live session
///
/// The first request builds a session, later requests get the same `Arc` back
/// unless they ask for a reload. The lock is held across construction, so
/// concurrent first requests build exactly one session and concurrent reloads
/// are applied one after another.
pub struct SessionCache<L: SessionLoader> {
    loader: L,
    slot: Mutex<Option<Arc<L::Session>>>,
}

impl<L: SessionLoader> SessionCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slot: Mutex::new(None),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Get the cached session, building (or rebuilding on `reload`) when needed
    ///
    /// # Arguments
    /// * `connection` - Used only when a session is built
    /// * `owner` - Used only when a session is built
    /// * `reload` - Discard the cached session and build a new one
    ///
    /// # Returns
    /// Returns the live session. A failed build leaves the previous session cached.
    pub async fn get(
        &self,
        connection: &Connection,
        owner: Option<&Owner>,
        reload: bool,
    ) -> Result<Arc<L::Session>> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref().filter(|_| !reload) {
            log::debug!("Reusing cached session on {}", session.connection().endpoint());
            return Ok(Arc::clone(session));
        }

        let session = Arc::new(self.loader.load(connection, owner).await?);

        if slot.replace(Arc::clone(&session)).is_some() {
            log::info!("Session reloaded on {}", connection.endpoint());
        } else {
            log::info!("Session initialized on {}", connection.endpoint());
        }

        Ok(session)
    }

    pub async fn session(&self, params: &InitParams) -> Result<Arc<L::Session>> {
        self.get(&params.connection, params.owner.as_ref(), params.reload)
            .await
    }

    /// Replace the cached session with one built from `connection` and `owner`
    pub async fn refresh(
        &self,
        connection: &Connection,
        owner: Option<&Owner>,
    ) -> Result<Arc<L::Session>> {
        self.get(connection, owner, true).await
    }

    /// The cached session, without building one
    pub async fn current(&self) -> Option<Arc<L::Session>> {
        self.slot.lock().await.clone()
    }

    pub async fn clear(&self) {
        self.slot.lock().await.take();
    }
}
