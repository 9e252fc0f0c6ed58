//! Wire types for the tenant backends' JSON envelope.

use serde::Deserialize;

use crate::session::Identity;

/// Every backend response wraps its payload as
/// `{ success, data, message }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub invite_code: Option<String>,
}

impl From<UserPayload> for Identity {
    fn from(user: UserPayload) -> Self {
        let role = user
            .role
            .unwrap_or_else(|| if user.is_admin { "admin" } else { "user" }.to_string());
        Identity {
            id: user.id,
            name: user.name,
            email: user.email,
            role,
            is_admin: user.is_admin,
            invite_code: user.invite_code,
        }
    }
}

/// `POST /auth/admin/login` payload: `{ token, user }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserPayload,
}

/// `GET /auth/me` payload: `{ user }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeData {
    pub user: UserPayload,
}
