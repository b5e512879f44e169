pub mod auth;
pub mod blog;
pub mod category;
pub mod dashboard;
pub mod subcategory;
