use serde::Serialize;

use crate::api::BloomsApi;
use crate::auth::Route;
use crate::models::{RegisterPayload, User};
use crate::validation::{FieldErrors, Validate};

const REGISTER_FAILED: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl Validate for RegisterForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require("username", &self.username, "Username is required");
        errors.require("email", &self.email, "Email is required");
        errors.require("password", &self.password, "Password is required");
        if errors.get("email").is_none() && !self.email.contains('@') {
            errors.insert("email", "Email must be a valid address");
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterOutcome {
    Navigate(Route),
    Stay,
}

pub struct RegisterController<'a, A: BloomsApi + ?Sized> {
    api: &'a A,
    pub form: RegisterForm,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
    pub submitting: bool,
    /// Account the server created, when it echoed one back
    pub registered: Option<User>,
}

impl<'a, A: BloomsApi + ?Sized> RegisterController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            form: RegisterForm::default(),
            errors: FieldErrors::new(),
            form_error: None,
            submitting: false,
            registered: None,
        }
    }

    /// Registration does not sign in; the user continues to the login page
    pub async fn submit(&mut self) -> RegisterOutcome {
        self.form_error = None;
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return RegisterOutcome::Stay;
        }

        let payload = RegisterPayload {
            name: self.form.name.trim().to_string(),
            username: self.form.username.trim().to_string(),
            email: self.form.email.trim().to_string(),
            password: self.form.password.clone(),
        };

        self.submitting = true;
        let result = self.api.register(&payload).await;
        self.submitting = false;

        match result {
            Ok(body) => {
                self.registered = body.and_then(|v| serde_json::from_value(v).ok());
                tracing::info!("Registered user '{}'", payload.username);
                self.form = RegisterForm::default();
                RegisterOutcome::Navigate(Route::Login)
            }
            Err(err) => {
                tracing::warn!("Registration of '{}' failed: {}", payload.username, err);
                self.form_error = Some(super::user_message(&err, REGISTER_FAILED));
                RegisterOutcome::Stay
            }
        }
    }
}
