// src/lib.rs

pub mod config;
pub mod docs;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod state;

pub use routes::create_router;
