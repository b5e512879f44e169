//! In-memory stand-in for the Blooms backend used by controller tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Mutex;

use crate::api::BloomsApi;
use crate::error::RequestError;
use crate::models::{
    Blog, BlogPayload, Category, CategoryNode, CategoryPayload, Credentials, Identity,
    RegisterPayload, SubCategory, SubCategoryLeaf, SubCategoryPayload,
};
use crate::types::EntityId;

/// List endpoints whose failure can be injected one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Read {
    Categories,
    SubCategories,
    Blogs,
    CategoryTree,
}

impl Read {
    const ALL: [Read; 4] = [Read::Categories, Read::SubCategories, Read::Blogs, Read::CategoryTree];
}

#[derive(Default)]
struct FakeState {
    next_id: i64,
    categories: Vec<Category>,
    subcategories: Vec<SubCategory>,
    blogs: Vec<Blog>,
    accounts: Vec<(Credentials, Identity)>,
    registered: Vec<RegisterPayload>,
    blog_payloads: Vec<BlogPayload>,
    mutations: usize,
    reads: usize,
    failing_reads: HashSet<Read>,
    fail_mutations: Option<(u16, Option<String>)>,
}

impl FakeState {
    fn next_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId::Int(self.next_id)
    }

    fn check_mutation(&mut self) -> Result<(), RequestError> {
        self.mutations += 1;
        match &self.fail_mutations {
            Some((status, message)) => Err(RequestError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_read(&mut self, read: Read) -> Result<(), RequestError> {
        self.reads += 1;
        if self.failing_reads.contains(&read) {
            return Err(RequestError::Status { status: 503, message: None });
        }
        Ok(())
    }

    fn category_title(&self, id: &EntityId) -> Option<String> {
        self.categories.iter().find(|c| &c.id == id).map(|c| c.title.clone())
    }
}

/// Records every call; failures can be switched on per call kind
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().expect("fake api lock");
        f(&mut state)
    }

    pub fn seed_category(&self, title: &str, desc: &str) -> EntityId {
        self.with(|s| {
            let id = s.next_id();
            s.categories.push(Category {
                id: id.clone(),
                title: title.into(),
                desc: desc.into(),
                category_url: None,
            });
            id
        })
    }

    pub fn seed_subcategory(&self, title: &str, category_id: &EntityId) -> EntityId {
        self.with(|s| {
            let id = s.next_id();
            let category_name = s.category_title(category_id);
            s.subcategories.push(SubCategory {
                id: id.clone(),
                title: title.into(),
                desc: String::new(),
                c_url: None,
                category_id: Some(category_id.clone()),
                category_name,
            });
            id
        })
    }

    pub fn seed_blog(&self, blog: Blog) {
        self.with(|s| s.blogs.push(blog));
    }

    /// Accept `username`/`password` and answer with `identity`
    pub fn add_account(&self, username: &str, password: &str, identity: Value) {
        let identity = Identity::from_payload(identity).expect("non-empty identity");
        self.with(|s| {
            s.accounts.push((
                Credentials {
                    username: username.into(),
                    password: password.into(),
                },
                identity,
            ))
        });
    }

    pub fn fail_mutations_with(&self, status: u16, message: Option<&str>) {
        self.with(|s| s.fail_mutations = Some((status, message.map(str::to_string))));
    }

    pub fn fail_reads(&self, fail: bool) {
        self.with(|s| {
            s.failing_reads.clear();
            if fail {
                s.failing_reads.extend(Read::ALL);
            }
        });
    }

    /// Fail only `read`; the other list endpoints keep answering
    pub fn fail_read(&self, read: Read) {
        self.with(|s| {
            s.failing_reads.insert(read);
        });
    }

    pub fn clear_failures(&self) {
        self.with(|s| {
            s.fail_mutations = None;
            s.failing_reads.clear();
        });
    }

    pub fn mutation_count(&self) -> usize {
        self.with(|s| s.mutations)
    }

    pub fn read_count(&self) -> usize {
        self.with(|s| s.reads)
    }

    pub fn blog_payloads(&self) -> Vec<BlogPayload> {
        self.with(|s| s.blog_payloads.clone())
    }

    pub fn registered(&self) -> Vec<RegisterPayload> {
        self.with(|s| s.registered.clone())
    }
}

#[async_trait]
impl BloomsApi for FakeApi {
    async fn register(&self, payload: &RegisterPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            if s.registered.iter().any(|r| r.username == payload.username) {
                return Err(RequestError::Status {
                    status: 409,
                    message: Some("Username already taken".into()),
                });
            }
            s.registered.push(payload.clone());
            let id = s.next_id();
            Ok(Some(json!({
                "id": id,
                "name": payload.name,
                "username": payload.username,
                "email": payload.email,
            })))
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<Identity>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            Ok(s.accounts
                .iter()
                .find(|(c, _)| c == credentials)
                .map(|(_, identity)| identity.clone()))
        })
    }

    async fn categories(&self) -> Result<Vec<Category>, RequestError> {
        self.with(|s| {
            s.check_read(Read::Categories)?;
            Ok(s.categories.clone())
        })
    }

    async fn create_category(&self, payload: &CategoryPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            let id = s.next_id();
            s.categories.push(Category {
                id,
                title: payload.title.clone(),
                desc: payload.desc.clone(),
                category_url: payload.category_url.clone(),
            });
            Ok(None)
        })
    }

    async fn update_category(&self, payload: &CategoryPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            let id = payload.id.clone();
            match s.categories.iter_mut().find(|c| Some(&c.id) == id.as_ref()) {
                Some(c) => {
                    c.title = payload.title.clone();
                    c.desc = payload.desc.clone();
                    c.category_url = payload.category_url.clone();
                    Ok(None)
                }
                None => Err(RequestError::Status { status: 404, message: None }),
            }
        })
    }

    async fn delete_category(&self, id: &EntityId) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            s.categories.retain(|c| &c.id != id);
            Ok(None)
        })
    }

    async fn subcategories(&self) -> Result<Vec<SubCategory>, RequestError> {
        self.with(|s| {
            s.check_read(Read::SubCategories)?;
            Ok(s.subcategories.clone())
        })
    }

    async fn create_subcategory(&self, payload: &SubCategoryPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            let id = s.next_id();
            let category_name = s.category_title(&payload.category_id);
            s.subcategories.push(SubCategory {
                id,
                title: payload.title.clone(),
                desc: payload.desc.clone(),
                c_url: payload.c_url.clone(),
                category_id: Some(payload.category_id.clone()),
                category_name,
            });
            Ok(None)
        })
    }

    async fn update_subcategory(&self, payload: &SubCategoryPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            let category_name = s.category_title(&payload.category_id);
            let id = payload.id.clone();
            match s.subcategories.iter_mut().find(|c| Some(&c.id) == id.as_ref()) {
                Some(sub) => {
                    sub.title = payload.title.clone();
                    sub.desc = payload.desc.clone();
                    sub.c_url = payload.c_url.clone();
                    sub.category_id = Some(payload.category_id.clone());
                    sub.category_name = category_name;
                    Ok(None)
                }
                None => Err(RequestError::Status { status: 404, message: None }),
            }
        })
    }

    async fn delete_subcategory(&self, id: &EntityId) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            s.subcategories.retain(|c| &c.id != id);
            Ok(None)
        })
    }

    async fn blogs(&self) -> Result<Vec<Blog>, RequestError> {
        self.with(|s| {
            s.check_read(Read::Blogs)?;
            Ok(s.blogs.clone())
        })
    }

    async fn category_tree(&self) -> Result<Vec<CategoryNode>, RequestError> {
        self.with(|s| {
            s.check_read(Read::CategoryTree)?;
            Ok(s.categories
                .iter()
                .map(|c| CategoryNode {
                    category_id: c.id.clone(),
                    name: c.title.clone(),
                    sub_category_detail_list: s
                        .subcategories
                        .iter()
                        .filter(|sub| sub.category_id.as_ref() == Some(&c.id))
                        .map(|sub| SubCategoryLeaf {
                            sub_category_id: sub.id.clone(),
                            name: sub.title.clone(),
                        })
                        .collect(),
                })
                .collect())
        })
    }

    async fn create_blog(&self, payload: &BlogPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            s.blog_payloads.push(payload.clone());
            let id = s.next_id();
            s.blogs.push(Blog {
                id,
                title: payload.title.clone(),
                description: payload.description.clone(),
                content: payload.content.clone(),
                author_id: Some(payload.author_id.clone()),
                author_name: Some(format!("user {}", payload.author_id)),
                category_mappings: payload.category_mappings.clone(),
            });
            Ok(None)
        })
    }

    async fn update_blog(&self, payload: &BlogPayload) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            s.blog_payloads.push(payload.clone());
            let id = payload.id.clone();
            match s.blogs.iter_mut().find(|b| Some(&b.id) == id.as_ref()) {
                Some(blog) => {
                    blog.title = payload.title.clone();
                    blog.description = payload.description.clone();
                    blog.content = payload.content.clone();
                    blog.author_id = Some(payload.author_id.clone());
                    blog.category_mappings = payload.category_mappings.clone();
                    Ok(None)
                }
                None => Err(RequestError::Status { status: 404, message: None }),
            }
        })
    }

    async fn delete_blog(&self, id: &EntityId) -> Result<Option<Value>, RequestError> {
        self.with(|s| {
            s.check_mutation()?;
            s.blogs.retain(|b| &b.id != id);
            Ok(None)
        })
    }
}
