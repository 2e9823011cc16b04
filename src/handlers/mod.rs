// src/handlers/mod.rs

pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod summarizer;
