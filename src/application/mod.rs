//! Application layer: wire DTOs, validators, and the API error taxonomy

pub mod dto;
pub mod error;
