//! Per-tenant sessions and the local session store.

use std::collections::HashMap;
use std::sync::Arc;

use betpanel_core::storage::{Storage, PRIMARY_TOKEN_KEY, SECONDARY_TOKEN_KEY};
use betpanel_core::tenant::Tenant;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Cached identity of the signed-in administrator.
///
/// `role` and `invite_code` distinguish the root administrator from
/// delegated administrators on the Secondary tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
    pub invite_code: Option<String>,
}

/// Proof-of-authentication credential for one tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Opaque bearer token, stored locally and attached to requests.
    Bearer(String),
    /// Server-held cookie; the client cannot read it, only transmit it.
    Cookie,
}

/// One tenant's session: credential plus whatever identity is known.
///
/// Identity is `None` when a persisted bearer token survived a restart
/// but no verification call has resolved the user behind it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub credential: Credential,
    pub identity: Option<Identity>,
}

impl Session {
    pub fn bearer(token: impl Into<String>, identity: Option<Identity>) -> Self {
        Self {
            credential: Credential::Bearer(token.into()),
            identity,
        }
    }

    pub fn cookie(identity: Identity) -> Self {
        Self {
            credential: Credential::Cookie,
            identity: Some(identity),
        }
    }
}

fn token_key(tenant: Tenant) -> &'static str {
    match tenant {
        Tenant::Primary => PRIMARY_TOKEN_KEY,
        Tenant::Secondary => SECONDARY_TOKEN_KEY,
    }
}

/// Local read/write/clear of per-tenant credentials and identities.
///
/// All operations are synchronous and never touch the network. The two
/// tenants live under distinct storage keys and distinct identity
/// slots; clearing one never disturbs the other.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    identities: RwLock<HashMap<Tenant, Identity>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            identities: RwLock::new(HashMap::new()),
        }
    }

    /// Current session for `tenant`, if any.
    ///
    /// Primary presence is inferred from the in-memory identity (the
    /// cookie itself is opaque); Secondary presence is the persisted
    /// bearer token.
    pub fn get(&self, tenant: Tenant) -> Option<Session> {
        match tenant {
            Tenant::Primary => self.identity(tenant).map(Session::cookie),
            Tenant::Secondary => self
                .token(tenant)
                .map(|token| Session::bearer(token, self.identity(tenant))),
        }
    }

    pub fn set(&self, tenant: Tenant, session: Session) {
        if let Credential::Bearer(token) = &session.credential {
            self.storage.set(token_key(tenant), token);
        }
        match session.identity {
            Some(identity) => self.set_identity(tenant, identity),
            None => {
                self.identities.write().remove(&tenant);
            }
        }
    }

    pub fn clear(&self, tenant: Tenant) {
        self.storage.remove(token_key(tenant));
        self.identities.write().remove(&tenant);
    }

    /// Persisted bearer token for `tenant`, if one is stored.
    pub fn token(&self, tenant: Tenant) -> Option<String> {
        self.storage.get(token_key(tenant)).filter(|t| !t.is_empty())
    }

    pub fn identity(&self, tenant: Tenant) -> Option<Identity> {
        self.identities.read().get(&tenant).cloned()
    }

    pub fn set_identity(&self, tenant: Tenant, identity: Identity) {
        self.identities.write().insert(tenant, identity);
    }

    pub fn has_session(&self, tenant: Tenant) -> bool {
        self.get(tenant).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use betpanel_core::storage::MemoryStorage;

    fn identity(email: &str) -> Identity {
        Identity {
            id: "u1".to_string(),
            name: "Admin".to_string(),
            email: email.to_string(),
            role: "admin".to_string(),
            is_admin: true,
            invite_code: None,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn secondary_session_is_the_persisted_token() {
        let sessions = store();
        assert!(sessions.get(Tenant::Secondary).is_none());

        sessions.set(
            Tenant::Secondary,
            Session::bearer("tok-1", Some(identity("a@1win.io"))),
        );

        let session = sessions.get(Tenant::Secondary).unwrap();
        assert_eq!(session.credential, Credential::Bearer("tok-1".to_string()));
        assert_eq!(session.identity.unwrap().email, "a@1win.io");
    }

    #[test]
    fn primary_session_is_the_in_memory_identity() {
        let sessions = store();
        // A Primary cookie without a resolved identity is not a session.
        assert!(sessions.get(Tenant::Primary).is_none());

        sessions.set_identity(Tenant::Primary, identity("a@sporty.io"));
        let session = sessions.get(Tenant::Primary).unwrap();
        assert_eq!(session.credential, Credential::Cookie);
    }

    #[test]
    fn clearing_one_tenant_leaves_the_other() {
        let sessions = store();
        sessions.set_identity(Tenant::Primary, identity("a@sporty.io"));
        sessions.set(Tenant::Secondary, Session::bearer("tok-2", None));

        sessions.clear(Tenant::Secondary);
        assert!(sessions.get(Tenant::Secondary).is_none());
        assert!(sessions.get(Tenant::Primary).is_some());
    }

    #[test]
    fn empty_token_is_not_a_credential() {
        let sessions = store();
        sessions.set(Tenant::Secondary, Session::bearer("", None));
        assert!(sessions.token(Tenant::Secondary).is_none());
        assert!(!sessions.has_session(Tenant::Secondary));
    }
}
