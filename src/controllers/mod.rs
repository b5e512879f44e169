//! Screen controllers: form state, validation and the load/submit/delete
//! lifecycle for each admin page.
//!
//! Every mutation is followed by a full reload; nothing is patched locally.

pub mod blog;
pub mod category;
pub mod dashboard;
pub mod login;
pub mod register;
pub mod subcategory;

use serde::Serialize;

use crate::error::RequestError;
use crate::types::{EntityId, Operation};
use crate::validation::FieldErrors;

pub use blog::{BlogController, BlogForm};
pub use category::{CategoryController, CategoryForm};
pub use dashboard::{DashboardController, Stats};
pub use login::{LoginController, LoginForm, LoginOutcome};
pub use register::{RegisterController, RegisterForm, RegisterOutcome};
pub use subcategory::{SubCategoryController, SubCategoryForm, SubCategoryRow};

/// Blocking yes/no question asked before destructive actions
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Fixed answer, for `--yes` and tests
#[derive(Debug, Clone, Copy)]
pub struct Assume(pub bool);

impl Confirm for Assume {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Items shown on a screen plus the outcome of the last load.
///
/// A failed reload keeps the previous items on screen.
#[derive(Debug, Clone, Serialize)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub list_error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            list_error: None,
        }
    }
}

impl<T> ListState<T> {
    fn begin(&mut self) {
        self.loading = true;
    }

    /// Returns true when the load succeeded
    fn finish<E: std::fmt::Display>(&mut self, result: Result<Vec<T>, E>, message: &str) -> bool {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.list_error = None;
                true
            }
            Err(err) => {
                tracing::warn!("{}: {}", message, err);
                self.list_error = Some(message.to_string());
                false
            }
        }
    }
}

/// Editable record plus everything the form shows around it
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormState<F> {
    pub form: F,
    pub edit_id: Option<EntityId>,
    pub errors: FieldErrors,
    pub form_error: Option<String>,
    pub submitting: bool,
}

impl<F: Default> FormState<F> {
    pub fn reset(&mut self) {
        self.form = F::default();
        self.edit_id = None;
        self.errors = FieldErrors::new();
        self.form_error = None;
    }

    pub fn is_editing(&self) -> bool {
        self.edit_id.is_some()
    }

    fn operation(&self) -> Operation {
        if self.edit_id.is_some() {
            Operation::Update
        } else {
            Operation::Create
        }
    }

    /// Apply validation results; true when the form may be submitted
    fn accept(&mut self, errors: FieldErrors) -> bool {
        self.form_error = None;
        let ok = errors.is_empty();
        self.errors = errors;
        ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid,
    Saved(Operation),
    /// The server rejected the request; see `form_error`
    Failed,
    /// No signed-in user to attribute the change to
    Unauthenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    /// See `list_error`
    Failed,
}

/// Server-supplied message when there is one, otherwise `fallback`
pub(crate) fn user_message(err: &RequestError, fallback: &str) -> String {
    err.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
