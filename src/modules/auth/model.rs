use serde::{Deserialize, Serialize};

pub use crate::shared::session::UserProfile;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub user_name_or_email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    pub user_name: String,
    pub email: String,
    pub full_name: String,
}

impl LoginData {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_name: self.user_name.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}
