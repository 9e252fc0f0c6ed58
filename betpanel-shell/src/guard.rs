//! Per-tenant route guard.
//!
//! The guard is an explicit three-state machine so the fail-closed
//! policy is auditable: `Checking` resolves exactly once, to
//! `Authenticated` on verification success and to `Unauthenticated` on
//! anything else: absent credential, rejected token, or a transport
//! error that leaves the answer ambiguous. Terminal states never
//! re-enter `Checking`; a remount means constructing a fresh guard.

use std::sync::Arc;

use betpanel_auth::{Identity, TenantAuthStrategy};
use betpanel_core::tenant::Tenant;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated(Identity),
    Unauthenticated,
}

pub struct RouteGuard {
    strategy: Arc<dyn TenantAuthStrategy>,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(strategy: Arc<dyn TenantAuthStrategy>) -> Self {
        Self {
            strategy,
            state: GuardState::Checking,
        }
    }

    pub fn tenant(&self) -> Tenant {
        self.strategy.tenant()
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Run the verification step if it has not run yet, then return
    /// the settled state.
    pub async fn check(&mut self) -> &GuardState {
        if self.state == GuardState::Checking {
            self.state = match self.strategy.verify().await {
                Ok(identity) => GuardState::Authenticated(identity),
                Err(err) => {
                    debug!(tenant = %self.strategy.tenant(), %err, "guard verification failed");
                    GuardState::Unauthenticated
                }
            };
        }
        &self.state
    }

    /// Where to send the user when the guard settled unauthenticated:
    /// always this tenant's own login, with no return-path state.
    pub fn redirect(&self) -> Option<&'static str> {
        match self.state {
            GuardState::Unauthenticated => Some(self.strategy.tenant().login_path()),
            _ => None,
        }
    }
}
