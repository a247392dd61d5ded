//! System call module

pub mod types;

pub use types::*;
