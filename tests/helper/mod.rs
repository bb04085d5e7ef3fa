//! Shared helpers for integration tests

#![allow(dead_code)]

mod advisory;
mod registry;

pub use advisory::*;
pub use registry::*;
