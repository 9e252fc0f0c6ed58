//! betpanel-auth: per-tenant sessions, authentication strategies, and
//! the request-signing API client.

pub mod client;
pub mod primary;
pub mod secondary;
pub mod session;
pub mod strategy;
pub mod wire;

pub use client::ApiClient;
pub use primary::PrimaryStrategy;
pub use secondary::SecondaryStrategy;
pub use session::{Credential, Identity, Session, SessionStore};
pub use strategy::{LoginCredentials, TenantAuth, TenantAuthStrategy};
pub use wire::{ApiEnvelope, LoginData, MeData, UserPayload};
