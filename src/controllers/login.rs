use serde::Serialize;

use crate::api::BloomsApi;
use crate::auth::Route;
use crate::models::Credentials;
use crate::session::Session;
use crate::validation::{FieldErrors, Validate};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("username", &self.username, "Username is required");
        errors.require("password", &self.password, "Password is required");
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    /// Signed in; continue to the dashboard
    Navigate(Route),
    /// Stay on the login page; see `errors` / `form_error`
    Stay,
}

pub struct LoginController<'a, A: BloomsApi + ?Sized> {
    api: &'a A,
    pub form: LoginForm,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
    pub submitting: bool,
}

impl<'a, A: BloomsApi + ?Sized> LoginController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            form: LoginForm::default(),
            errors: FieldErrors::new(),
            form_error: None,
            submitting: false,
        }
    }

    /// An empty response body means bad credentials, not a failure
    pub async fn submit(&mut self, session: &mut Session) -> LoginOutcome {
        self.form_error = None;
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return LoginOutcome::Stay;
        }

        let credentials = Credentials {
            username: self.form.username.trim().to_string(),
            password: self.form.password.clone(),
        };

        self.submitting = true;
        let result = self.api.login(&credentials).await;
        self.submitting = false;

        match result {
            Ok(Some(identity)) => match session.login(identity) {
                Ok(()) => LoginOutcome::Navigate(Route::Admin),
                Err(err) => {
                    tracing::error!("Could not persist session: {}", err);
                    self.form_error = Some(format!("Could not save session: {}", err));
                    LoginOutcome::Stay
                }
            },
            Ok(None) => {
                tracing::info!("Login rejected for '{}'", credentials.username);
                self.form_error = Some(INVALID_CREDENTIALS.to_string());
                LoginOutcome::Stay
            }
            Err(err) => {
                tracing::warn!("Login request failed: {}", err);
                self.form_error = Some(super::user_message(&err, LOGIN_FAILED));
                LoginOutcome::Stay
            }
        }
    }
}
