use serde::Serialize;

use crate::api::BloomsApi;
use crate::controllers::{user_message, Confirm, DeleteOutcome, FormState, ListState, SubmitOutcome};
use crate::models::{Category, CategoryPayload, SubCategory};
use crate::taxonomy::{self, CategoryGroup};
use crate::types::{EntityId, Operation};
use crate::validation::{non_blank, FieldErrors, Validate};

pub const LOAD_ERROR: &str = "Failed to load categories. Please try again.";
const SAVE_ERROR: &str = "Could not save category. Please try again.";
const DELETE_ERROR: &str = "Could not delete category. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub title: String,
    pub desc: String,
    pub category_url: String,
}

impl CategoryForm {
    fn to_payload(&self, id: Option<EntityId>) -> CategoryPayload {
        CategoryPayload {
            id,
            title: self.title.trim().to_string(),
            desc: self.desc.trim().to_string(),
            category_url: non_blank(&self.category_url),
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            title: category.title.clone(),
            desc: category.desc.clone(),
            category_url: category.category_url.clone().unwrap_or_default(),
        }
    }
}

impl Validate for CategoryForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title is required");
        errors.require("desc", &self.desc, "Description is required");
        errors.optional_url("categoryUrl", &self.category_url);
        errors
    }
}

/// Category screen: the category list with each category's subcategories
pub struct CategoryController<'a, A: BloomsApi + ?Sized> {
    api: &'a A,
    pub list: ListState<Category>,
    pub subcategories: Vec<SubCategory>,
    pub state: FormState<CategoryForm>,
}

impl<'a, A: BloomsApi + ?Sized> CategoryController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            list: ListState::default(),
            subcategories: Vec::new(),
            state: FormState::default(),
        }
    }

    /// Fetch categories and subcategories together; either failing fails both
    pub async fn load(&mut self) -> bool {
        self.list.begin();
        let result = futures::try_join!(self.api.categories(), self.api.subcategories());
        let result = result.map(|(categories, subcategories)| {
            self.subcategories = subcategories;
            categories
        });
        self.list.finish(result, LOAD_ERROR)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.accept(self.state.form.validate()) {
            return SubmitOutcome::Invalid;
        }

        let operation = self.state.operation();
        let payload = self.state.form.to_payload(self.state.edit_id.clone());

        self.state.submitting = true;
        let result = match operation {
            Operation::Update => self.api.update_category(&payload).await,
            Operation::Create => self.api.create_category(&payload).await,
        };
        self.state.submitting = false;

        match result {
            Ok(_) => {
                tracing::info!("Category '{}' saved ({:?})", payload.title, operation);
                self.state.reset();
                self.load().await;
                SubmitOutcome::Saved(operation)
            }
            Err(err) => {
                tracing::warn!("Saving category '{}' failed: {}", payload.title, err);
                self.state.form_error = Some(user_message(&err, SAVE_ERROR));
                SubmitOutcome::Failed
            }
        }
    }

    /// Copy a loaded row into the form. No fetch.
    pub fn edit(&mut self, id: &EntityId) -> bool {
        match self.list.items.iter().find(|c| &c.id == id) {
            Some(category) => {
                self.state.form = CategoryForm::from(category);
                self.state.edit_id = Some(category.id.clone());
                self.state.errors = FieldErrors::new();
                self.state.form_error = None;
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.state.reset();
    }

    pub async fn delete(&mut self, id: &EntityId, confirm: &mut dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm("Delete this category?") {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_category(id).await {
            Ok(_) => {
                tracing::info!("Category {} deleted", id);
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!("Deleting category {} failed: {}", id, err);
                self.list.list_error = Some(user_message(&err, DELETE_ERROR));
                DeleteOutcome::Failed
            }
        }
    }

    pub fn subcategories_of(&self, category_id: &EntityId) -> Vec<&SubCategory> {
        taxonomy::subcategories_of(&self.subcategories, category_id)
    }

    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        taxonomy::group_by_category(&self.list.items, &self.subcategories)
    }
}
