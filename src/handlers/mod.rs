// src/handlers/mod.rs

pub mod quiz;
pub mod result;
pub mod session;
