//! ConnectionRegistry implementations
//!
//! - `inmemory`: copy-on-write map held in process memory

pub mod inmemory;

pub use inmemory::InMemoryConnectionRegistry;
