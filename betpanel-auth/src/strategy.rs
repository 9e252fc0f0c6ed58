//! The polymorphic tenant auth capability set.
//!
//! Both tenants expose the same surface (session lookup, login,
//! logout, verification) so the shell and guards never special-case
//! tenant identity. The two implementations live in
//! [`crate::primary`] and [`crate::secondary`].

use std::sync::Arc;

use async_trait::async_trait;
use betpanel_core::config::PanelConfig;
use betpanel_core::error::PanelResult;
use betpanel_core::storage::Storage;
use betpanel_core::tenant::Tenant;

use crate::primary::PrimaryStrategy;
use crate::secondary::SecondaryStrategy;
use crate::session::{Identity, Session, SessionStore};

#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
pub trait TenantAuthStrategy: Send + Sync {
    fn tenant(&self) -> Tenant;

    /// Current local session, without network I/O.
    fn session(&self) -> Option<Session>;

    /// Authenticate against the tenant's backend and establish a
    /// local session.
    async fn login(&self, credentials: &LoginCredentials) -> PanelResult<Session>;

    /// Tear down the session. Local state is always cleared, even when
    /// a server-side logout call fails.
    async fn logout(&self) -> PanelResult<()>;

    /// Confirm the stored credential still identifies someone. Failure
    /// of any kind (absent credential, rejection, transport) means the
    /// caller must treat the session as gone.
    async fn verify(&self) -> PanelResult<Identity>;
}

/// Both tenants' strategies behind one handle, sharing one session
/// store.
pub struct TenantAuth {
    sessions: Arc<SessionStore>,
    primary: Arc<PrimaryStrategy>,
    secondary: Arc<SecondaryStrategy>,
}

impl TenantAuth {
    pub fn new(config: &PanelConfig, storage: Arc<dyn Storage>) -> Self {
        let sessions = Arc::new(SessionStore::new(storage));
        let primary = Arc::new(PrimaryStrategy::new(config, sessions.clone()));
        let secondary = Arc::new(SecondaryStrategy::new(config, sessions.clone()));
        Self {
            sessions,
            primary,
            secondary,
        }
    }

    pub fn strategy(&self, tenant: Tenant) -> Arc<dyn TenantAuthStrategy> {
        match tenant {
            Tenant::Primary => self.primary.clone(),
            Tenant::Secondary => self.secondary.clone(),
        }
    }

    /// Concrete Primary strategy, for injecting the externally
    /// resolved identity signal.
    pub fn primary(&self) -> &Arc<PrimaryStrategy> {
        &self.primary
    }

    pub fn secondary(&self) -> &Arc<SecondaryStrategy> {
        &self.secondary
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }
}
