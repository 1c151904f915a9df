// src/application/mod.rs
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod services;

// Re-export key types for easier imports
pub use dashboard::{Dashboard, DashboardState, EmptyState};
pub use services::link_service_impl::LinkServiceImpl;
