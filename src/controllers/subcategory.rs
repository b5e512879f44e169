use serde::Serialize;

use crate::api::BloomsApi;
use crate::controllers::{user_message, Confirm, DeleteOutcome, FormState, ListState, SubmitOutcome};
use crate::models::{Category, SubCategory, SubCategoryPayload};
use crate::taxonomy;
use crate::types::{EntityId, Operation};
use crate::validation::{non_blank, FieldErrors, Validate};

pub const LOAD_ERROR: &str = "Failed to load subcategories. Please try again.";
const SAVE_ERROR: &str = "Could not save subcategory. Please try again.";
const DELETE_ERROR: &str = "Could not delete subcategory. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryForm {
    pub title: String,
    pub desc: String,
    pub c_url: String,
    pub category_id: Option<EntityId>,
}

impl SubCategoryForm {
    fn to_payload(&self, id: Option<EntityId>) -> Option<SubCategoryPayload> {
        Some(SubCategoryPayload {
            id,
            title: self.title.trim().to_string(),
            desc: self.desc.trim().to_string(),
            c_url: non_blank(&self.c_url),
            category_id: self.category_id.clone()?,
        })
    }
}

impl From<&SubCategory> for SubCategoryForm {
    fn from(sub: &SubCategory) -> Self {
        Self {
            title: sub.title.clone(),
            desc: sub.desc.clone(),
            c_url: sub.c_url.clone().unwrap_or_default(),
            category_id: sub.category_id.clone(),
        }
    }
}

impl Validate for SubCategoryForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title is required");
        if self.category_id.is_none() {
            errors.insert("categoryId", "Category is required");
        }
        errors.optional_url("cUrl", &self.c_url);
        errors
    }
}

/// One list row with its category label resolved
#[derive(Debug, Serialize)]
pub struct SubCategoryRow<'a> {
    #[serde(flatten)]
    pub sub_category: &'a SubCategory,
    pub category_label: &'a str,
}

/// Subcategory screen: list plus the category selector options
pub struct SubCategoryController<'a, A: BloomsApi + ?Sized> {
    api: &'a A,
    pub list: ListState<SubCategory>,
    pub categories: Vec<Category>,
    pub state: FormState<SubCategoryForm>,
}

impl<'a, A: BloomsApi + ?Sized> SubCategoryController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            list: ListState::default(),
            categories: Vec::new(),
            state: FormState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        self.list.begin();
        let result = futures::try_join!(self.api.subcategories(), self.api.categories());
        let result = result.map(|(subcategories, categories)| {
            self.categories = categories;
            subcategories
        });
        self.list.finish(result, LOAD_ERROR)
    }

    /// Only categories present in the loaded list can be selected
    pub fn select_category(&mut self, id: &EntityId) -> bool {
        if self.categories.iter().any(|c| &c.id == id) {
            self.state.form.category_id = Some(id.clone());
            self.state.errors.clear_field("categoryId");
            true
        } else {
            self.state
                .errors
                .insert("categoryId", format!("Unknown category {}", id));
            false
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.accept(self.state.form.validate()) {
            return SubmitOutcome::Invalid;
        }

        let operation = self.state.operation();
        let Some(payload) = self.state.form.to_payload(self.state.edit_id.clone()) else {
            return SubmitOutcome::Invalid;
        };

        self.state.submitting = true;
        let result = match operation {
            Operation::Update => self.api.update_subcategory(&payload).await,
            Operation::Create => self.api.create_subcategory(&payload).await,
        };
        self.state.submitting = false;

        match result {
            Ok(_) => {
                tracing::info!("Subcategory '{}' saved ({:?})", payload.title, operation);
                self.state.reset();
                self.load().await;
                SubmitOutcome::Saved(operation)
            }
            Err(err) => {
                tracing::warn!("Saving subcategory '{}' failed: {}", payload.title, err);
                self.state.form_error = Some(user_message(&err, SAVE_ERROR));
                SubmitOutcome::Failed
            }
        }
    }

    /// A parent missing from the loaded categories is cleared so it must be re-selected
    pub fn edit(&mut self, id: &EntityId) -> bool {
        match self.list.items.iter().find(|s| &s.id == id) {
            Some(sub) => {
                let mut form = SubCategoryForm::from(sub);
                let orphaned = form
                    .category_id
                    .as_ref()
                    .is_some_and(|id| !self.categories.iter().any(|c| &c.id == id));
                if orphaned {
                    form.category_id = None;
                }
                self.state.form = form;
                self.state.edit_id = Some(sub.id.clone());
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
        if !confirm.confirm("Delete this subcategory?") {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_subcategory(id).await {
            Ok(_) => {
                tracing::info!("Subcategory {} deleted", id);
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!("Deleting subcategory {} failed: {}", id, err);
                self.list.list_error = Some(user_message(&err, DELETE_ERROR));
                DeleteOutcome::Failed
            }
        }
    }

    /// Every loaded subcategory, orphans included
    pub fn rows(&self) -> Vec<SubCategoryRow<'_>> {
        self.list
            .items
            .iter()
            .map(|sub| SubCategoryRow {
                sub_category: sub,
                category_label: taxonomy::category_label(&self.categories, sub),
            })
            .collect()
    }
}
