pub mod link_repository;
