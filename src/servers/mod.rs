// Modules for server components
pub mod web_api;

// Re-export public APIs
pub use web_api::{create_router, AppState, WebApiConfig, WebApiServer};
