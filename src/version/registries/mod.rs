//! Registry implementations for fetching package versions

pub mod memory;

pub use memory::InMemoryRegistry;
