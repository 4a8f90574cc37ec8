//! Infrastructure layer: wire formats and the in-memory repository.

pub mod dto;
pub mod repository;
