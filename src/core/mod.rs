//! Core configuration and data models shared by the API handler.

pub mod config;
pub mod models;
