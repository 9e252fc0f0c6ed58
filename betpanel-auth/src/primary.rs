//! Cookie-session strategy for the Primary tenant.

use std::sync::Arc;

use async_trait::async_trait;
use betpanel_core::config::PanelConfig;
use betpanel_core::error::{PanelError, PanelResult};
use betpanel_core::tenant::Tenant;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::session::{Identity, Session, SessionStore};
use crate::strategy::{LoginCredentials, TenantAuthStrategy};
use crate::wire::{ApiEnvelope, UserPayload};

/// Primary authentication rides on a server-set session cookie. The
/// credential itself is opaque to this process; session presence is
/// the in-memory identity, which arrives either from `login` or from
/// the embedding app's own "current user" resolution via
/// [`PrimaryStrategy::resolve_identity`].
pub struct PrimaryStrategy {
    client: ApiClient,
    sessions: Arc<SessionStore>,
}

impl PrimaryStrategy {
    pub fn new(config: &PanelConfig, sessions: Arc<SessionStore>) -> Self {
        Self {
            client: ApiClient::new(Tenant::Primary, config, sessions.clone()),
            sessions,
        }
    }

    /// Inject the externally resolved identity signal. `None` marks
    /// the signal as resolved-to-nobody and drops any cached identity.
    pub fn resolve_identity(&self, identity: Option<Identity>) {
        match identity {
            Some(identity) => self.sessions.set_identity(Tenant::Primary, identity),
            None => self.sessions.clear(Tenant::Primary),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl TenantAuthStrategy for PrimaryStrategy {
    fn tenant(&self) -> Tenant {
        Tenant::Primary
    }

    fn session(&self) -> Option<Session> {
        self.sessions.get(Tenant::Primary)
    }

    async fn login(&self, credentials: &LoginCredentials) -> PanelResult<Session> {
        let envelope: ApiEnvelope<Value> = self
            .client
            .post(
                "/auth/admin/login",
                &json!({
                    "email": credentials.email,
                    "password": credentials.password,
                }),
            )
            .await?;

        if !envelope.success {
            return Err(PanelError::not_authenticated(
                envelope
                    .message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            ));
        }

        // The cookie is already in the jar. The login payload may or
        // may not carry the user; absent one, a minimal admin identity
        // stands in until the external signal resolves.
        let identity = envelope
            .data
            .as_ref()
            .and_then(|data| data.get("user").cloned())
            .and_then(|user| serde_json::from_value::<UserPayload>(user).ok())
            .map(Identity::from)
            .unwrap_or_else(|| Identity {
                id: String::new(),
                name: String::new(),
                email: credentials.email.clone(),
                role: "admin".to_string(),
                is_admin: true,
                invite_code: None,
            });

        debug!(email = %identity.email, "primary login succeeded");
        let session = Session::cookie(identity.clone());
        self.sessions.set_identity(Tenant::Primary, identity);
        Ok(session)
    }

    async fn logout(&self) -> PanelResult<()> {
        let result: PanelResult<Value> = self.client.post("/auth/logout", &json!({})).await;
        if let Err(err) = result {
            // The session is being discarded either way; a failed
            // server call must not strand the user logged-in locally.
            warn!(%err, "primary logout endpoint failed, clearing local state anyway");
        }
        self.sessions.clear(Tenant::Primary);
        Ok(())
    }

    async fn verify(&self) -> PanelResult<Identity> {
        self.sessions
            .identity(Tenant::Primary)
            .ok_or_else(|| PanelError::not_authenticated("no resolved primary identity"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use betpanel_core::storage::MemoryStorage;

    fn strategy() -> PrimaryStrategy {
        let sessions = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        PrimaryStrategy::new(&PanelConfig::default(), sessions)
    }

    fn identity() -> Identity {
        Identity {
            id: "u1".to_string(),
            name: "Admin".to_string(),
            email: "admin@sporty.io".to_string(),
            role: "admin".to_string(),
            is_admin: true,
            invite_code: None,
        }
    }

    #[tokio::test]
    async fn verify_fails_closed_without_resolved_identity() {
        let strategy = strategy();
        let err = strategy.verify().await.unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn resolved_identity_becomes_the_session() {
        let strategy = strategy();
        strategy.resolve_identity(Some(identity()));

        assert_eq!(strategy.verify().await.unwrap().email, "admin@sporty.io");
        assert!(strategy.session().is_some());

        strategy.resolve_identity(None);
        assert!(strategy.session().is_none());
        assert!(strategy.verify().await.is_err());
    }
}
