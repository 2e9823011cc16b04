// src/models/mod.rs

pub mod ai;
pub mod progress;
pub mod user;
