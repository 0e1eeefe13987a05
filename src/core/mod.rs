// src/core/mod.rs
//! Core services: configuration, backend client, file helpers

pub mod api_client;
pub mod config_manager;
pub mod fs_ops;

pub use api_client::ApiClient;
pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
