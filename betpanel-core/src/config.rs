//! Console configuration.
//!
//! Typed config with serde support plus an environment override layer:
//!
//! ```bash
//! export BETPANEL_PRIMARY_API_URL=https://sportybet.example.com/api
//! export BETPANEL_SECONDARY_API_URL=https://onewin.example.com/api/1win
//! ```

use std::time::Duration;

use serde::Deserialize;

/// Where one tenant's backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TenantEndpoints {
    /// Base API address, including any path prefix the backend mounts
    /// its routes under (e.g. `/api/1win` for the Secondary tenant).
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub primary: TenantEndpoints,
    pub secondary: TenantEndpoints,
    /// Per-request timeout, seconds.
    pub timeout_secs: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            primary: TenantEndpoints {
                base_url: "http://localhost:5008/api".to_string(),
            },
            secondary: TenantEndpoints {
                base_url: "http://localhost:5008/api/1win".to_string(),
            },
            timeout_secs: 30,
        }
    }
}

impl PanelConfig {
    /// Defaults layered with `BETPANEL_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("BETPANEL_PRIMARY_API_URL") {
            if !url.trim().is_empty() {
                config.primary.base_url = url.trim().to_string();
            }
        }
        if let Ok(url) = std::env::var("BETPANEL_SECONDARY_API_URL") {
            if !url.trim().is_empty() {
                config.secondary.base_url = url.trim().to_string();
            }
        }
        if let Some(secs) = std::env::var("BETPANEL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout_secs = secs;
        }
        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoints(&self, tenant: crate::tenant::Tenant) -> &TenantEndpoints {
        match tenant {
            crate::tenant::Tenant::Primary => &self.primary,
            crate::tenant::Tenant::Secondary => &self.secondary,
        }
    }
}
