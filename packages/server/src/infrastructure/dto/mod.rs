//! Data Transfer Objects
//!
//! HTTP response bodies.

pub mod http;
