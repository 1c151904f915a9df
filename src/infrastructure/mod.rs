pub mod auth;
pub mod di;
pub mod json;
pub mod notifier;
pub mod repositories;
