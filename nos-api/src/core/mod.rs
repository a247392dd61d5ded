//! Core types shared across the NOS crates

pub mod types;
