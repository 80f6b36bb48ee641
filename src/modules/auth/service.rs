use serde::Deserialize;
use std::sync::Arc;

use crate::log_info;
use crate::shared::api::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::session::{Session, UserProfile};
use crate::shared::validation::{
    EmailShape, FieldsMatch, MinLen, PhoneShape, Required, ValidationChain,
};

use super::model::{LoginData, LoginPayload, RegisterPayload};

fn login_rules() -> ValidationChain<LoginPayload> {
    ValidationChain::new()
        .add_rule(EmailShape::new("userNameOrEmail", |p: &LoginPayload| {
            &p.user_name_or_email
        }))
        .add_rule(MinLen::new("password", 8, |p: &LoginPayload| &p.password))
}

fn register_rules() -> ValidationChain<RegisterPayload> {
    ValidationChain::new()
        .add_rule(Required::new("firstName", |p: &RegisterPayload| {
            &p.first_name
        }))
        .add_rule(Required::new("lastName", |p: &RegisterPayload| &p.last_name))
        .add_rule(EmailShape::new("email", |p: &RegisterPayload| &p.email))
        .add_rule(PhoneShape::new("phoneNumber", |p: &RegisterPayload| {
            &p.phone_number
        }))
        .add_rule(MinLen::new("password", 8, |p: &RegisterPayload| &p.password))
        .add_rule(FieldsMatch::new(
            "passwords do not match",
            |p: &RegisterPayload| &p.password,
            |p: &RegisterPayload| &p.confirm_password,
        ))
}

/// Login, registration, and sign-out against the authentication endpoints.
/// A successful login is persisted into the session context every other
/// client reads.
pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<Session>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, payload: LoginPayload) -> AppResult<UserProfile> {
        login_rules().validate(&payload).into_result()?;

        let data: LoginData = self
            .api
            .post_data(
                "/Api/V1/Authentication/Login",
                serde_json::to_value(&payload)?,
            )
            .await?;

        let profile = data.profile();
        self.session.sign_in(data.access_token, profile.clone())?;
        log_info!("Signed in as {}", profile.user_name);
        Ok(profile)
    }

    /// Registers a new account; resolves to the server's confirmation
    /// message. Registration does not sign the user in.
    pub async fn register(&self, payload: RegisterPayload) -> AppResult<String> {
        register_rules().validate(&payload).into_result()?;

        #[derive(Deserialize)]
        struct RegisterData {
            message: String,
        }

        let data: RegisterData = self
            .api
            .post_data(
                "/Api/V1/Authentication/Register",
                serde_json::to_value(&payload)?,
            )
            .await?;
        Ok(data.message)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.session.sign_out()?;
        log_info!("Signed out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
