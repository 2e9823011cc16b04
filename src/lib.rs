// src/lib.rs

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod scrape;
pub mod state;
pub mod utils;

pub use routes::create_router;
