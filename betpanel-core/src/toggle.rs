//! Active-tenant switch state.
//!
//! `AppToggle` is the single source of truth for which tenant's UI is
//! visible. The value is persisted under [`ACTIVE_APP_KEY`] so a
//! reload resumes the same tenant; consumers subscribe through a
//! `watch` channel rather than polling.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::storage::{Storage, ACTIVE_APP_KEY};
use crate::tenant::Tenant;

pub struct AppToggle {
    storage: Arc<dyn Storage>,
    tx: watch::Sender<Tenant>,
}

impl AppToggle {
    /// Initialize from persisted state. An absent or unrecognized
    /// selector defaults to `Primary`, and that default is persisted
    /// immediately so the next load reads a valid value.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let active = match storage.get(ACTIVE_APP_KEY).map(|s| s.parse::<Tenant>()) {
            Some(Ok(tenant)) => tenant,
            saved => {
                debug!(?saved, "no valid persisted tenant, defaulting to primary");
                storage.set(ACTIVE_APP_KEY, Tenant::Primary.as_str());
                Tenant::Primary
            }
        };

        let (tx, _rx) = watch::channel(active);
        Self { storage, tx }
    }

    pub fn active(&self) -> Tenant {
        *self.tx.borrow()
    }

    /// Make `tenant` the active one. Idempotent: switching to the
    /// already-active tenant neither persists nor notifies.
    pub fn switch_to(&self, tenant: Tenant) {
        if self.active() == tenant {
            return;
        }
        debug!(%tenant, "switching active tenant");
        self.storage.set(ACTIVE_APP_KEY, tenant.as_str());
        // send_replace never fails; a value without receivers is fine.
        self.tx.send_replace(tenant);
    }

    /// Flip between the two tenants.
    pub fn toggle(&self) {
        self.switch_to(self.active().other());
    }

    /// Subscribe to tenant changes. The receiver observes the current
    /// value immediately and every change thereafter.
    pub fn subscribe(&self) -> watch::Receiver<Tenant> {
        self.tx.subscribe()
    }
}
