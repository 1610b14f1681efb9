//! Sign-up, log-in and log-out against the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only writer of the session store. Sign-up creates an account but does
//! not start a session; log-in does. Navigation after either call belongs to
//! the page layer so this service never depends on the router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use crate::error::ApiError;
use crate::net::api::{ApiRequest, ApiResponse, FormField, LOG_IN_ENDPOINT, LOG_OUT_ENDPOINT, SIGN_UP_ENDPOINT, Transport};
use crate::net::types::{LogInCredentials, LogInResponse, Role, SignUpForm, User};
use crate::state::session::{Session, SessionStore};

#[derive(Clone)]
pub struct AuthService {
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl AuthService {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self { transport, session }
    }

    /// Create an account via `POST /api/sign_up/`.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error; the session is never touched.
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<User, ApiError> {
        let request = ApiRequest::post_multipart(SIGN_UP_ENDPOINT, sign_up_fields(form));
        let user: User = self
            .transport
            .send(request)
            .await
            .and_then(|response| response.decode())
            .inspect_err(|e| tracing::warn!(username = %form.username, error = %e, "sign-up failed"))?;
        tracing::info!(username = %user.username, group = %user.group, "signed up");
        Ok(user)
    }

    /// Log in via `POST /api/log_in/` and store the returned session.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error; the session is left as it was.
    pub async fn log_in(&self, credentials: &LogInCredentials) -> Result<User, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response: LogInResponse = self
            .transport
            .send(ApiRequest::post_json(LOG_IN_ENDPOINT, body))
            .await
            .and_then(|response| response.decode())
            .inspect_err(|e| tracing::warn!(username = %credentials.username, error = %e, "log-in failed"))?;

        let user = response.user.clone();
        self.session.set(Session { user: response.user, token: response.token });
        tracing::info!(username = %user.username, group = %user.group, "logged in");
        Ok(user)
    }

    /// Tell the server to drop the session, then clear it locally.
    ///
    /// The local session is cleared even if the server call fails.
    pub async fn log_out(&self) {
        if let Some(token) = self.session.token() {
            let request = ApiRequest::post(LOG_OUT_ENDPOINT).with_token(Some(token));
            if let Err(e) = self.transport.send(request).await.and_then(ApiResponse::into_result) {
                tracing::warn!(error = %e, "server log-out failed; clearing local session anyway");
            }
        }
        self.session.clear();
        tracing::info!("logged out");
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.session.user()
    }

    #[must_use]
    pub fn current_user_role(&self) -> Option<Role> {
        self.session.role()
    }
}

fn sign_up_fields(form: &SignUpForm) -> Vec<FormField> {
    let mut fields = vec![
        FormField::text("username", &form.username),
        FormField::text("first_name", &form.first_name),
        FormField::text("last_name", &form.last_name),
        FormField::text("password1", &form.password1),
        FormField::text("password2", &form.password2),
        FormField::text("group", form.group.as_str()),
    ];
    if let Some(photo) = &form.photo {
        fields.push(FormField::File {
            name: "photo".to_owned(),
            file_name: photo.file_name.clone(),
            content_type: photo.content_type.clone(),
            bytes: photo.bytes.clone(),
        });
    }
    fields
}
