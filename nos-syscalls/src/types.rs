//! System call type definitions
//!
//! This module contains system call numbers.

/// System call numbers
pub const SYS_FORK: u32 = 1;
pub const SYS_EXIT: u32 = 2;
pub const SYS_WAIT: u32 = 3;
pub const SYS_KILL: u32 = 6;
pub const SYS_GETPID: u32 = 11;
pub const SYS_SBRK: u32 = 12;
pub const SYS_SLEEP: u32 = 13;
pub const SYS_UPTIME: u32 = 14;

// Write protection
pub const SYS_MPROTECT: u32 = 22;
pub const SYS_MUNPROTECT: u32 = 23;
