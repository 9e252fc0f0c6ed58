//! Bearer-token strategy for the Secondary tenant.

use std::sync::Arc;

use async_trait::async_trait;
use betpanel_core::config::PanelConfig;
use betpanel_core::error::{PanelError, PanelResult};
use betpanel_core::tenant::Tenant;
use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::session::{Identity, Session, SessionStore};
use crate::strategy::{LoginCredentials, TenantAuthStrategy};
use crate::wire::{ApiEnvelope, LoginData, MeData};

/// Stateless bearer scheme: the token returned by
/// `POST /auth/admin/login` is stored locally and attached to every
/// request by the signer; `GET /auth/me` proves it still identifies an
/// administrator. Logout is purely local.
pub struct SecondaryStrategy {
    client: ApiClient,
    sessions: Arc<SessionStore>,
}

impl SecondaryStrategy {
    pub fn new(config: &PanelConfig, sessions: Arc<SessionStore>) -> Self {
        Self {
            client: ApiClient::new(Tenant::Secondary, config, sessions.clone()),
            sessions,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn fetch_identity(&self) -> PanelResult<Identity> {
        let envelope: ApiEnvelope<MeData> = self.client.get("/auth/me").await?;
        match envelope.data {
            Some(data) if envelope.success => Ok(Identity::from(data.user)),
            _ => Err(PanelError::not_authenticated(
                envelope
                    .message
                    .unwrap_or_else(|| "token verification failed".to_string()),
            )),
        }
    }
}

#[async_trait]
impl TenantAuthStrategy for SecondaryStrategy {
    fn tenant(&self) -> Tenant {
        Tenant::Secondary
    }

    fn session(&self) -> Option<Session> {
        self.sessions.get(Tenant::Secondary)
    }

    async fn login(&self, credentials: &LoginCredentials) -> PanelResult<Session> {
        let envelope: ApiEnvelope<LoginData> = self
            .client
            .post(
                "/auth/admin/login",
                &json!({
                    "email": credentials.email,
                    "password": credentials.password,
                }),
            )
            .await?;

        let data = match envelope.data {
            Some(data) if envelope.success => data,
            _ => {
                return Err(PanelError::not_authenticated(
                    envelope
                        .message
                        .unwrap_or_else(|| "Invalid credentials".to_string()),
                ))
            }
        };

        let login_identity = Identity::from(data.user);
        self.sessions.set(
            Tenant::Secondary,
            Session::bearer(data.token, Some(login_identity.clone())),
        );

        // Enrich with role/inviteCode from /auth/me now that the token
        // is stored; the login identity stands when enrichment fails.
        let identity = match self.fetch_identity().await {
            Ok(identity) => {
                self.sessions.set_identity(Tenant::Secondary, identity.clone());
                identity
            }
            Err(err) => {
                debug!(%err, "identity enrichment failed, keeping login identity");
                login_identity
            }
        };

        debug!(email = %identity.email, "secondary login succeeded");
        self.sessions
            .get(Tenant::Secondary)
            .ok_or_else(|| PanelError::not_authenticated("login produced no stored credential"))
    }

    async fn logout(&self) -> PanelResult<()> {
        // No server call: the bearer scheme is stateless.
        self.sessions.clear(Tenant::Secondary);
        Ok(())
    }

    async fn verify(&self) -> PanelResult<Identity> {
        if self.sessions.token(Tenant::Secondary).is_none() {
            return Err(PanelError::not_authenticated("no stored credential"));
        }

        match self.fetch_identity().await {
            Ok(identity) => {
                self.sessions.set_identity(Tenant::Secondary, identity.clone());
                Ok(identity)
            }
            Err(err) => {
                // Verification failure of any kind invalidates the
                // stored token (the signer already cleared it on 401).
                self.sessions.clear(Tenant::Secondary);
                Err(err)
            }
        }
    }
}
