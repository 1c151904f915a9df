// src/domain/mod.rs
pub mod auth;
pub mod error;
pub mod link;
pub mod query;
pub mod repositories;
pub mod search;
pub mod selection;
pub mod tag;
pub mod user;
