//! Top-level app shell: reconciles the browser path with the active
//! tenant, mounts the matching subtree, and models the shared header.

use std::sync::Arc;

use betpanel_auth::TenantAuth;
use betpanel_core::config::PanelConfig;
use betpanel_core::storage::Storage;
use betpanel_core::tenant::Tenant;
use betpanel_core::toggle::AppToggle;
use tracing::debug;

use crate::guard::RouteGuard;
use crate::routes::{match_path, RouteOutcome};

/// What the shell decided for one path change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The tenant the path belongs to (and, after reconciliation, the
    /// active tenant).
    pub tenant: Tenant,
    pub outcome: RouteOutcome,
}

/// Model of the shared header: which brand to show and whether the
/// switch/logout controls render at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub active: Tenant,
    /// Controls render only while either tenant has a session.
    pub show_controls: bool,
}

pub struct AppShell {
    toggle: AppToggle,
    auth: TenantAuth,
}

impl AppShell {
    pub fn new(config: &PanelConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            toggle: AppToggle::new(storage.clone()),
            auth: TenantAuth::new(config, storage),
        }
    }

    pub fn toggle(&self) -> &AppToggle {
        &self.toggle
    }

    pub fn auth(&self) -> &TenantAuth {
        &self.auth
    }

    /// Reconcile one path change: force the active tenant to follow
    /// the path (one-way sync, a bare state change never navigates),
    /// then classify the path against the route table.
    pub fn resolve(&self, path: &str) -> Resolved {
        let tenant = Tenant::of_path(path);
        if tenant != self.toggle.active() {
            debug!(%path, %tenant, "path drives tenant switch");
            self.toggle.switch_to(tenant);
        }

        let primary_authenticated = self.auth.sessions().has_session(Tenant::Primary);
        Resolved {
            tenant,
            outcome: match_path(path, primary_authenticated),
        }
    }

    /// Fresh guard for mounting one tenant's protected subtree.
    pub fn guard(&self, tenant: Tenant) -> RouteGuard {
        RouteGuard::new(self.auth.strategy(tenant))
    }

    /// `resolve` plus the guard's verification step: a protected
    /// outcome whose guard settles unauthenticated becomes a redirect
    /// to that tenant's login.
    pub async fn resolve_checked(&self, path: &str) -> Resolved {
        let resolved = self.resolve(path);
        let tenant = match &resolved.outcome {
            RouteOutcome::Protected { tenant, .. } => *tenant,
            _ => return resolved,
        };

        let mut guard = self.guard(tenant);
        guard.check().await;
        match guard.redirect() {
            Some(login) => Resolved {
                tenant: resolved.tenant,
                outcome: RouteOutcome::Redirect(login.to_string()),
            },
            None => resolved,
        }
    }

    pub fn header(&self) -> Header {
        let active = self.toggle.active();
        let sessions = self.auth.sessions();
        Header {
            title: active.label(),
            active,
            show_controls: sessions.has_session(Tenant::Primary)
                || sessions.has_session(Tenant::Secondary),
        }
    }

    /// Explicit header switch action. Returns the navigation target:
    /// the chosen tenant's home, or its login when it has no session.
    /// This is the one place a state change drives navigation.
    pub fn switch_app(&self, tenant: Tenant) -> &'static str {
        self.toggle.switch_to(tenant);
        match tenant {
            Tenant::Primary => Tenant::Primary.home_path(),
            Tenant::Secondary => {
                if self.auth.sessions().has_session(Tenant::Secondary) {
                    Tenant::Secondary.home_path()
                } else {
                    Tenant::Secondary.login_path()
                }
            }
        }
    }

    /// Header logout action, dispatched against whichever tenant holds
    /// a session (Primary wins when both do, matching the header's
    /// precedence). Returns the navigation target, or `None` when no
    /// session existed.
    pub async fn logout(&self) -> Option<&'static str> {
        let sessions = self.auth.sessions();
        let tenant = if sessions.has_session(Tenant::Primary) {
            Tenant::Primary
        } else if sessions.has_session(Tenant::Secondary) {
            Tenant::Secondary
        } else {
            return None;
        };

        // Strategy logout never strands local state on server failure.
        if let Err(err) = self.auth.strategy(tenant).logout().await {
            debug!(%tenant, %err, "logout reported an error");
        }
        Some(tenant.login_path())
    }
}
