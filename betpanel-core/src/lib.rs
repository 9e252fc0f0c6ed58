//! betpanel-core: tenant model, persistence, and switch state for the
//! betpanel admin console.

pub mod config;
pub mod error;
pub mod storage;
pub mod tenant;
pub mod toggle;

pub use config::{PanelConfig, TenantEndpoints};
pub use error::{PanelError, PanelResult};
pub use storage::{
    JsonFileStorage, MemoryStorage, Storage, ACTIVE_APP_KEY, PRIMARY_TOKEN_KEY,
    SECONDARY_TOKEN_KEY,
};
pub use tenant::{Tenant, SECONDARY_PREFIX};
pub use toggle::AppToggle;
