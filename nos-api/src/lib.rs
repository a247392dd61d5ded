//! NOS API - Core interfaces and types for the NOS operating system
//!
//! This crate provides the types and abstractions shared by the memory
//! management and system call crates. It owns nothing stateful: the kernel
//! services it describes (process table, scheduler) live elsewhere and are
//! reached through the traits defined here.
//!
//! # Architecture
//!
//! - **Core**: Identifier aliases and kernel error codes
//! - **Error**: Common error type and the errno mapping
//! - **Syscall**: System call status encoding
//! - **Process**: Process control and scheduling interfaces
//! - **Sync**: Lock re-exports for `no_std` code
//!
//! # Usage
//!
//! ```rust
//! use nos_api::{Error, Result, SyscallResult};
//!
//! fn check(len: i32) -> Result<isize> {
//!     if len <= 0 {
//!         return Err(Error::InvalidArgument("length must be positive"));
//!     }
//!     Ok(0)
//! }
//!
//! let status = SyscallResult::from(check(-1)).to_isize();
//! assert!(status < 0);
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

// Core modules
pub mod core;
pub mod error;
pub mod syscall;
pub mod process;
pub mod sync;

// Re-export commonly used types
pub use crate::core::types::*;
pub use crate::error::{Error, Result};
pub use crate::syscall::types::SyscallResult;
pub use crate::process::interface::{ProcessControl, Scheduler};
