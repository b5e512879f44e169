use serde::Serialize;

use crate::api::BloomsApi;
use crate::controllers::{user_message, Confirm, DeleteOutcome, FormState, ListState, SubmitOutcome};
use crate::models::{Blog, BlogPayload, CategoryNode, Identity, SubCategoryLeaf};
use crate::session::Session;
use crate::taxonomy::{MappingLabel, MappingSet, TaxonomyIndex};
use crate::types::{EntityId, Operation};
use crate::validation::{FieldErrors, Validate};

pub const LOAD_ERROR: &str = "Failed to load blogs. Please try again.";
const SAVE_ERROR: &str = "Could not publish blog. Please try again.";
const DELETE_ERROR: &str = "Could not delete blog. Please try again.";
const SIGNED_OUT: &str = "Your session has ended. Sign in again to publish.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub title: String,
    pub description: String,
    pub content: String,
    pub mappings: MappingSet,
}

impl BlogForm {
    fn to_payload(&self, id: Option<EntityId>, author_id: EntityId) -> BlogPayload {
        BlogPayload {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content.clone(),
            author_id,
            category_mappings: self.mappings.to_vec(),
        }
    }
}

impl From<&Blog> for BlogForm {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            description: blog.description.clone(),
            content: blog.content.clone(),
            mappings: MappingSet::from_mappings(blog.category_mappings.clone()),
        }
    }
}

impl Validate for BlogForm {
    // Description is optional and untagged blogs are allowed
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "Title is required");
        errors.require("content", &self.content, "Content is required");
        errors
    }
}

impl Serialize for BlogForm {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("BlogForm", 4)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("content", &self.content)?;
        s.serialize_field("categoryMappings", self.mappings.as_slice())?;
        s.end()
    }
}

/// Blog screen: published blogs, the category tree, and the compose form
pub struct BlogController<'a, A: BloomsApi + ?Sized> {
    api: &'a A,
    session: &'a Session,
    pub list: ListState<Blog>,
    pub taxonomy: TaxonomyIndex,
    pub state: FormState<BlogForm>,
}

impl<'a, A: BloomsApi + ?Sized> BlogController<'a, A> {
    pub fn new(api: &'a A, session: &'a Session) -> Self {
        Self {
            api,
            session,
            list: ListState::default(),
            taxonomy: TaxonomyIndex::default(),
            state: FormState::default(),
        }
    }

    pub async fn load(&mut self) -> bool {
        self.list.begin();
        let result = futures::try_join!(self.api.blogs(), self.api.category_tree());
        let result = result.map(|(blogs, tree)| {
            self.taxonomy = TaxonomyIndex::new(tree);
            blogs
        });
        self.list.finish(result, LOAD_ERROR)
    }

    /// Checkbox toggle for one subcategory under `category`
    pub fn toggle_mapping(&mut self, category: &CategoryNode, sub_category: &SubCategoryLeaf) -> bool {
        self.state.errors.clear_field("categoryMappings");
        self.state.form.mappings.toggle(category, sub_category)
    }

    /// Toggle by subcategory id, resolving its parent from the loaded tree.
    /// Returns `None` for ids the tree does not know.
    pub fn toggle_tag(&mut self, sub_category_id: &EntityId) -> Option<bool> {
        match self.taxonomy.resolve(sub_category_id) {
            Some((category, sub_category)) => {
                self.state.errors.clear_field("categoryMappings");
                Some(self.state.form.mappings.toggle(category, sub_category))
            }
            None => {
                self.state.errors.insert(
                    "categoryMappings",
                    format!("Unknown subcategory {}", sub_category_id),
                );
                None
            }
        }
    }

    pub fn is_tagged(&self, sub_category_id: &EntityId) -> bool {
        self.state.form.mappings.contains(sub_category_id)
    }

    /// Validates, then stamps the author from whoever is signed in right now
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.state.accept(self.state.form.validate()) {
            return SubmitOutcome::Invalid;
        }

        let Some(author_id) = self.session.current_user().and_then(Identity::id) else {
            tracing::warn!("Blog submit without a signed-in author");
            self.state.form_error = Some(SIGNED_OUT.to_string());
            return SubmitOutcome::Unauthenticated;
        };

        let operation = self.state.operation();
        let payload = self.state.form.to_payload(self.state.edit_id.clone(), author_id);

        self.state.submitting = true;
        let result = match operation {
            Operation::Update => self.api.update_blog(&payload).await,
            Operation::Create => self.api.create_blog(&payload).await,
        };
        self.state.submitting = false;

        match result {
            Ok(_) => {
                tracing::info!(
                    "Blog '{}' saved ({:?}, {} tags)",
                    payload.title,
                    operation,
                    payload.category_mappings.len()
                );
                self.state.reset();
                self.load().await;
                SubmitOutcome::Saved(operation)
            }
            Err(err) => {
                tracing::warn!("Saving blog '{}' failed: {}", payload.title, err);
                self.state.form_error = Some(user_message(&err, SAVE_ERROR));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn edit(&mut self, id: &EntityId) -> bool {
        match self.list.items.iter().find(|b| &b.id == id) {
            Some(blog) => {
                self.state.form = BlogForm::from(blog);
                self.state.edit_id = Some(blog.id.clone());
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
        if !confirm.confirm("Delete this blog?") {
            return DeleteOutcome::Cancelled;
        }

        match self.api.delete_blog(id).await {
            Ok(_) => {
                tracing::info!("Blog {} deleted", id);
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                tracing::warn!("Deleting blog {} failed: {}", id, err);
                self.list.list_error = Some(user_message(&err, DELETE_ERROR));
                DeleteOutcome::Failed
            }
        }
    }

    /// Tag labels for a blog, named from the current tree
    pub fn labels(&self, blog: &Blog) -> Vec<MappingLabel> {
        blog.category_mappings
            .iter()
            .map(|m| self.taxonomy.label(m))
            .collect()
    }
}
