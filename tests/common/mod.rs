#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use blooms_admin::api::ApiClient;
use blooms_admin::config::ApiConfig;

/// In-process stand-in for the Blooms backend, one per test for isolation
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<Mutex<Store>>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    pub users: Vec<Value>,
    pub categories: Vec<Value>,
    pub subcategories: Vec<Value>,
    pub blogs: Vec<Value>,
    pub last_authorization: Option<String>,
}

impl Store {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<Store>>;

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind fake backend")?;

        let store: Shared = Arc::default();
        let app = Router::new()
            .nest("/api", routes())
            .with_state(store.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            store,
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&ApiConfig::for_base_url(&self.base_url))?)
    }

    pub fn seed_user(&self, username: &str, password: &str, name: &str) -> Value {
        let mut store = self.store.lock().unwrap();
        let id = store.allocate();
        let user = json!({
            "id": id,
            "name": name,
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password,
        });
        store.users.push(user.clone());
        user
    }

    pub fn seed_category(&self, title: &str) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.allocate();
        store.categories.push(json!({ "id": id, "title": title, "desc": "" }));
        id
    }

    pub fn seed_subcategory(&self, title: &str, category_id: i64) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.allocate();
        store.subcategories.push(json!({
            "id": id,
            "title": title,
            "desc": "",
            "categoryId": category_id,
        }));
        id
    }

    pub fn blogs(&self) -> Vec<Value> {
        self.store.lock().unwrap().blogs.clone()
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.store.lock().unwrap().last_authorization.clone()
    }
}

fn routes() -> Router<Shared> {
    Router::new()
        .route("/user", post(register))
        .route("/user/login", post(login))
        .route("/category/all", get(|s: State<Shared>| list(s, Kind::Category)))
        .route(
            "/category",
            post(|s: State<Shared>, b: Json<Value>| create(s, Kind::Category, b))
                .put(|s: State<Shared>, b: Json<Value>| update(s, Kind::Category, b))
                .delete(|s: State<Shared>, q: Query<HashMap<String, String>>| remove(s, Kind::Category, q)),
        )
        .route("/subcategory/subcategories", get(|s: State<Shared>| list(s, Kind::SubCategory)))
        .route(
            "/subcategory",
            post(|s: State<Shared>, b: Json<Value>| create(s, Kind::SubCategory, b))
                .put(|s: State<Shared>, b: Json<Value>| update(s, Kind::SubCategory, b))
                .delete(|s: State<Shared>, q: Query<HashMap<String, String>>| remove(s, Kind::SubCategory, q)),
        )
        .route("/blog/all", get(|s: State<Shared>| list(s, Kind::Blog)))
        .route("/blog/categories", get(category_tree))
        .route(
            "/blog",
            post(create_blog)
                .put(|s: State<Shared>, b: Json<Value>| update(s, Kind::Blog, b))
                .delete(|s: State<Shared>, q: Query<HashMap<String, String>>| remove(s, Kind::Blog, q)),
        )
}

#[derive(Clone, Copy)]
enum Kind {
    Category,
    SubCategory,
    Blog,
}

impl Kind {
    fn rows(self, store: &mut Store) -> &mut Vec<Value> {
        match self {
            Kind::Category => &mut store.categories,
            Kind::SubCategory => &mut store.subcategories,
            Kind::Blog => &mut store.blogs,
        }
    }

    fn id_param(self) -> &'static str {
        match self {
            Kind::Category => "categoryId",
            Kind::SubCategory => "subCategoryId",
            Kind::Blog => "blogId",
        }
    }
}

fn same_id(row: &Value, id: &Value) -> bool {
    row["id"].to_string().trim_matches('"') == id.to_string().trim_matches('"')
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn register(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    if store.users.iter().any(|u| u["username"] == body["username"]) {
        return error(StatusCode::CONFLICT, "Username already taken");
    }
    let id = store.allocate();
    let mut user = body;
    user["id"] = json!(id);
    store.users.push(user.clone());
    Json(user).into_response()
}

/// Bad credentials answer 200 with an empty body
async fn login(State(store): State<Shared>, Json(body): Json<Value>) -> Response {
    let store = store.lock().unwrap();
    let found = store
        .users
        .iter()
        .find(|u| u["username"] == body["username"] && u["password"] == body["password"]);
    match found {
        Some(user) => {
            let mut identity = user.clone();
            if let Some(map) = identity.as_object_mut() {
                map.remove("password");
                map.insert("token".into(), json!(format!("token-{}", user["id"])));
            }
            Json(identity).into_response()
        }
        None => StatusCode::OK.into_response(),
    }
}

async fn list(State(store): State<Shared>, kind: Kind) -> Response {
    let mut store = store.lock().unwrap();
    let rows = kind.rows(&mut store).clone();
    Json(Value::Array(rows)).into_response()
}

async fn create(State(store): State<Shared>, kind: Kind, Json(mut body): Json<Value>) -> Response {
    if body["title"].as_str().map_or(true, str::is_empty) {
        return error(StatusCode::BAD_REQUEST, "Title is required");
    }
    let mut store = store.lock().unwrap();
    let id = store.allocate();
    body["id"] = json!(id);
    kind.rows(&mut store).push(body.clone());
    Json(body).into_response()
}

async fn create_blog(State(store): State<Shared>, headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    store.last_authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let id = store.allocate();
    body["id"] = json!(id);
    store.blogs.push(body);
    // blog creation answers with plain text
    (StatusCode::OK, "Blog created").into_response()
}

async fn update(State(store): State<Shared>, kind: Kind, Json(body): Json<Value>) -> Response {
    let mut store = store.lock().unwrap();
    let rows = kind.rows(&mut store);
    match rows.iter_mut().find(|row| same_id(row, &body["id"])) {
        Some(row) => {
            *row = body.clone();
            Json(body).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Record not found"),
    }
}

async fn remove(
    State(store): State<Shared>,
    kind: Kind,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let Some(id) = query.get(kind.id_param()) else {
        return error(StatusCode::BAD_REQUEST, "Missing id");
    };
    let id = json!(id);
    let mut store = store.lock().unwrap();
    let rows = kind.rows(&mut store);
    let before = rows.len();
    rows.retain(|row| !same_id(row, &id));
    if rows.len() == before {
        return error(StatusCode::NOT_FOUND, "Record not found");
    }
    StatusCode::OK.into_response()
}

async fn category_tree(State(store): State<Shared>) -> Response {
    let store = store.lock().unwrap();
    let tree: Vec<Value> = store
        .categories
        .iter()
        .map(|c| {
            let children: Vec<Value> = store
                .subcategories
                .iter()
                .filter(|s| same_id(c, &s["categoryId"]))
                .map(|s| json!({ "subCategoryId": s["id"], "name": s["title"] }))
                .collect();
            json!({
                "categoryId": c["id"],
                "name": c["title"],
                "subCategoryDetailList": children,
            })
        })
        .collect();
    Json(Value::Array(tree)).into_response()
}
