//! Configuration domain module

mod app_config;
mod backend;

pub use app_config::{AppConfig, DEFAULT_PREVIEW_WIDTH};
pub use backend::{ClipboardBackend, ALL_BACKENDS};
