//! Request signer: a per-tenant HTTP client that attaches the tenant's
//! credential to outgoing requests and reacts to authentication
//! failures.
//!
//! The signer never navigates. A 401 from the Secondary API clears that
//! tenant's stored token locally and surfaces the failure to the
//! caller; routing decisions belong to the guard and shell, which keeps
//! concurrent in-flight requests from fighting over redirects.

use std::sync::Arc;

use betpanel_core::config::PanelConfig;
use betpanel_core::error::{PanelError, PanelResult};
use betpanel_core::tenant::Tenant;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::session::SessionStore;

pub struct ApiClient {
    tenant: Tenant,
    base_url: String,
    inner: reqwest::Client,
    sessions: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(tenant: Tenant, config: &PanelConfig, sessions: Arc<SessionStore>) -> Self {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout())
            // Primary auth is cookie based; the jar holds the session
            // cookie the login endpoint sets. Secondary is stateless
            // bearer and sends no cookies.
            .cookie_store(tenant == Tenant::Primary);

        let inner = builder.build().expect("reqwest client construction is infallible here");

        Self {
            tenant,
            base_url: config
                .endpoints(tenant)
                .base_url
                .trim_end_matches('/')
                .to_string(),
            inner,
            sessions,
        }
    }

    pub fn tenant(&self) -> Tenant {
        self.tenant
    }

    /// Resolve a caller-supplied path against the configured base,
    /// applying the base exactly once.
    ///
    /// Absolute URLs pass through. A relative path that redundantly
    /// repeats the base's own path prefix (or a bare `/api` prefix)
    /// has it stripped first, so callers mixing absolute and relative
    /// styles cannot double-apply the prefix.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let mut path = path.to_string();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }

        for prefix in [self.base_path(), "/api"] {
            if prefix.is_empty() || prefix == "/" {
                continue;
            }
            if let Some(rest) = path.strip_prefix(prefix) {
                if rest.is_empty() {
                    path = "/".to_string();
                    break;
                }
                if rest.starts_with('/') {
                    path = rest.to_string();
                    break;
                }
            }
        }

        format!("{}{}", self.base_url, path)
    }

    /// Path portion of the configured base URL (e.g. `/api/1win`).
    fn base_path(&self) -> &str {
        let rest = match self.base_url.find("://") {
            Some(idx) => &self.base_url[idx + 3..],
            None => return "",
        };
        match rest.find('/') {
            Some(idx) => &rest[idx..],
            None => "",
        }
    }

    /// Which bearer token, if any, to attach for this target URL.
    ///
    /// Secondary signs every request to its API while a token is
    /// stored. Primary normally rides on cookies and only attaches its
    /// fallback token for admin-scoped targets (cross-origin setups
    /// where the cookie is not transmitted).
    fn bearer_for(&self, url: &str) -> Option<String> {
        match self.tenant {
            Tenant::Secondary => self.sessions.token(Tenant::Secondary),
            Tenant::Primary => {
                if url.contains("/admin/") {
                    self.sessions.token(Tenant::Primary)
                } else {
                    None
                }
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> PanelResult<T> {
        self.execute(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> PanelResult<T> {
        let body = serde_json::to_value(body).map_err(|e| PanelError::storage(e.to_string()))?;
        self.execute(Method::POST, path, Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> PanelResult<T> {
        let body = serde_json::to_value(body).map_err(|e| PanelError::storage(e.to_string()))?;
        self.execute(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> PanelResult<T> {
        self.execute(Method::DELETE, path, None).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> PanelResult<T> {
        let url = self.endpoint(path);
        debug!(tenant = %self.tenant, %method, %url, "dispatching request");

        let mut request = self.inner.request(method, &url);
        if let Some(token) = self.bearer_for(&url) {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        // Transport failures (no response at all) are reported as
        // Network so callers can tell "retry later" from "log in
        // again". Dropping this future aborts the request.
        let response = request
            .send()
            .await
            .map_err(|err| PanelError::network(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            if self.tenant == Tenant::Secondary {
                warn!(tenant = %self.tenant, "401 response, clearing stored credential");
                self.sessions.clear(Tenant::Secondary);
            }
            let message = error_message(response).await;
            return Err(PanelError::not_authenticated(message));
        }

        if !status.is_success() {
            let message = error_message(response).await;
            return Err(PanelError::api(status.as_u16(), message));
        }

        response
            .json::<T>()
            .await
            .map_err(|err| PanelError::api(status.as_u16(), format!("invalid response body: {err}")))
    }
}

/// Backend error messages are surfaced verbatim when present.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use betpanel_core::storage::MemoryStorage;
    use betpanel_core::PanelConfig;

    fn client(tenant: Tenant) -> ApiClient {
        let sessions = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        ApiClient::new(tenant, &PanelConfig::default(), sessions)
    }

    #[test]
    fn endpoint_applies_base_once() {
        let client = client(Tenant::Secondary);
        assert_eq!(
            client.endpoint("/users"),
            "http://localhost:5008/api/1win/users"
        );
        assert_eq!(
            client.endpoint("users"),
            "http://localhost:5008/api/1win/users"
        );
        // Caller already included the base's path prefix.
        assert_eq!(
            client.endpoint("/api/1win/users"),
            "http://localhost:5008/api/1win/users"
        );
        // Caller included a bare /api prefix.
        assert_eq!(
            client.endpoint("/api/users"),
            "http://localhost:5008/api/1win/users"
        );
    }

    #[test]
    fn endpoint_passes_absolute_urls_through() {
        let client = client(Tenant::Secondary);
        assert_eq!(
            client.endpoint("https://elsewhere.example.com/x"),
            "https://elsewhere.example.com/x"
        );
        // Applying endpoint() to its own output changes nothing.
        let once = client.endpoint("/users");
        assert_eq!(client.endpoint(&once), once);
    }

    #[test]
    fn endpoint_respects_segment_boundaries() {
        let client = client(Tenant::Secondary);
        // "/api/1winx" does not match the "/api/1win" prefix at a
        // segment boundary, so only the bare "/api" is stripped.
        assert_eq!(
            client.endpoint("/api/1winx/users"),
            "http://localhost:5008/api/1win/1winx/users"
        );
        // "/apifoo" matches neither prefix at a boundary.
        assert_eq!(
            client.endpoint("/apifoo"),
            "http://localhost:5008/api/1win/apifoo"
        );
    }

    #[test]
    fn secondary_signs_whenever_a_token_is_stored() {
        let sessions = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let client = ApiClient::new(Tenant::Secondary, &PanelConfig::default(), sessions.clone());

        assert_eq!(client.bearer_for("http://localhost:5008/api/1win/users"), None);
        sessions.set(
            Tenant::Secondary,
            crate::session::Session::bearer("tok-9", None),
        );
        assert_eq!(
            client.bearer_for("http://localhost:5008/api/1win/users"),
            Some("tok-9".to_string())
        );
    }

    #[test]
    fn primary_signs_only_admin_scoped_targets() {
        let sessions = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let client = ApiClient::new(Tenant::Primary, &PanelConfig::default(), sessions.clone());
        sessions.set(
            Tenant::Primary,
            crate::session::Session::bearer("fallback-1", None),
        );

        assert_eq!(
            client.bearer_for("http://localhost:5008/api/admin/users"),
            Some("fallback-1".to_string())
        );
        assert_eq!(client.bearer_for("http://localhost:5008/api/matches"), None);
    }

    #[test]
    fn primary_never_reads_the_secondary_token() {
        let sessions = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let client = ApiClient::new(Tenant::Primary, &PanelConfig::default(), sessions.clone());
        sessions.set(
            Tenant::Secondary,
            crate::session::Session::bearer("secondary-tok", None),
        );

        assert_eq!(client.bearer_for("http://localhost:5008/api/admin/users"), None);
    }
}
