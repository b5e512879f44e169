use serde::Serialize;

use crate::api::BloomsApi;

pub const LOAD_ERROR: &str = "Failed to load dashboard stats.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub blogs: usize,
    pub categories: usize,
    pub sub_categories: usize,
}

/// Admin landing page: entity counts
pub struct DashboardController<'a, A: BloomsApi + ?Sized> {
    api: &'a A,
    pub stats: Stats,
    pub loading: bool,
    pub list_error: Option<String>,
}

impl<'a, A: BloomsApi + ?Sized> DashboardController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            stats: Stats::default(),
            loading: false,
            list_error: None,
        }
    }

    pub async fn load(&mut self) -> bool {
        self.loading = true;
        let result = futures::try_join!(
            self.api.blogs(),
            self.api.categories(),
            self.api.subcategories()
        );
        self.loading = false;

        match result {
            Ok((blogs, categories, subcategories)) => {
                self.stats = Stats {
                    blogs: blogs.len(),
                    categories: categories.len(),
                    sub_categories: subcategories.len(),
                };
                self.list_error = None;
                true
            }
            Err(err) => {
                tracing::warn!("{}: {}", LOAD_ERROR, err);
                self.list_error = Some(LOAD_ERROR.to_string());
                false
            }
        }
    }
}
