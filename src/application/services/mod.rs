// src/application/services/mod.rs
pub mod link_service;
pub mod link_service_impl;
