pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::SelectedConnection;
pub use repositories::{JsonFileStore, MemoryStore};
pub use services::SessionService;
