//! Library catalog application
//!
//! Genre and book instance modules, the form validation they share, and the
//! bootstrap that serves them.

pub mod app;
pub mod modules;
pub mod utils;
pub mod validation;

pub use app::{build_registry, build_store, run};
