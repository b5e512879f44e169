pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod session;
pub mod taxonomy;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod testing;
