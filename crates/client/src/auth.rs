use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use models::{TeamMemberDraft, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::forms;
use crate::http::ApiClient;

#[derive(Serialize)]
struct LoginInput<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordInput<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Login and `/users/me` wrap the profile one level deeper than the other
/// endpoints: `data: { user: {...} }`.
#[derive(Deserialize)]
struct SessionData {
    user: User,
}

/// Session state for the admin area: either unauthenticated or holding the
/// current user profile. The session itself lives in the shared cookie jar;
/// this store tracks who the cookie belongs to.
pub struct AuthStore {
    api: ApiClient,
    user: ArcSwapOption<User>,
    authenticated: AtomicBool,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Arc<Self> {
        Arc::new(Self {
            api,
            user: ArcSwapOption::empty(),
            authenticated: AtomicBool::new(false),
        })
    }

    pub fn user(&self) -> Option<Arc<User>> {
        self.user.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn apply_session(&self, user: User) {
        self.user.store(Some(Arc::new(user)));
        self.authenticated.store(true, Ordering::SeqCst);
    }

    fn clear_session(&self) {
        self.user.store(None);
        self.authenticated.store(false, Ordering::SeqCst);
    }

    /// Authenticate with credentials. On success the session cookie is set
    /// by the server and the profile is kept locally; on failure the state
    /// stays unauthenticated and the server message propagates.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let session = self
            .api
            .post_json::<SessionData, _>("users/login", &LoginInput { email, password })
            .await?;
        self.apply_session(session.user.clone());
        Ok(session.user)
    }

    /// Best-effort server call, then unconditionally clear local state.
    pub async fn logout(&self) {
        if let Err(e) = self.api.get_opt::<serde_json::Value>("users/logout").await {
            debug!(error = %e, "logout call failed; clearing session anyway");
        }
        self.clear_session();
    }

    /// Silently restore the session from the cookie. A 401 from `/users/me`
    /// triggers exactly one call to `/users/refresh-token` and, if that
    /// succeeds, exactly one retry of `/users/me`; any other outcome leaves
    /// the store unauthenticated with no user.
    pub async fn check_auth_status(&self) -> bool {
        match self.fetch_me().await {
            Ok(user) => {
                self.apply_session(user);
                true
            }
            Err(e) if e.is_unauthorized() => {
                if let Err(refresh_err) = self.api.post_empty("users/refresh-token").await {
                    debug!(error = %refresh_err, "token refresh failed");
                    self.clear_session();
                    return false;
                }
                match self.fetch_me().await {
                    Ok(user) => {
                        self.apply_session(user);
                        true
                    }
                    Err(retry_err) => {
                        debug!(error = %retry_err, "whoami retry failed after refresh");
                        self.clear_session();
                        false
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "auth status check failed");
                self.clear_session();
                false
            }
        }
    }

    /// Update the signed-in user's profile (multipart: the avatar is a file
    /// part). Requires an authenticated session.
    pub async fn update_profile(&self, draft: &TeamMemberDraft) -> Result<(), ClientError> {
        let Some(user) = self.user() else {
            return Err(ClientError::Unauthenticated);
        };
        let form = forms::team_member_form(draft, false)?;
        self.api
            .put_multipart::<serde_json::Value>(&format!("users/users/{}", user.user_id), form)
            .await?;
        // Pick up the server-validated profile.
        if let Ok(user) = self.fetch_me().await {
            self.apply_session(user);
        }
        Ok(())
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::Unauthenticated);
        }
        self.api
            .post_json_opt::<serde_json::Value, _>(
                "users/change-password",
                &ChangePasswordInput {
                    current_password,
                    new_password,
                },
            )
            .await
            .map(|_| ())
    }

    async fn fetch_me(&self) -> Result<User, ClientError> {
        self.api
            .get::<SessionData>("users/me")
            .await
            .map(|session| session.user)
    }
}
