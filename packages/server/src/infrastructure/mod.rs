//! Infrastructure layer
//!
//! Concrete implementations of the domain traits and the HTTP DTOs.

pub mod connection;
pub mod dto;
pub mod registry;
