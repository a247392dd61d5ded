//! NOS System Calls
//!
//! This crate provides the system call dispatch mechanism and the handlers
//! for the process, timer and memory-protection system calls.
//!
//! # Architecture
//!
//! - **Core**: Dispatcher and the handler trait
//! - **Common**: Argument decoding shared by all handlers
//! - **Process**: fork, exit, wait, kill, getpid, sbrk
//! - **Time**: sleep, uptime and the tick clock behind them
//! - **Memory**: mprotect and munprotect
//!
//! Handlers never reach into kernel globals. Everything they act on is
//! handed to [`init_syscalls`] through [`KernelServices`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use nos_syscalls::{init_syscalls, KernelServices, SYS_MPROTECT};
//!
//! let dispatcher = init_syscalls(&services)?;
//! let status = dispatcher.dispatch_raw(SYS_MPROTECT, &[addr, len]);
//! ```

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

use spin::Mutex;
use nos_api::{ProcessControl, Scheduler};
use nos_memory_management::{FrameMapper, ProtectionToggle, TlbInvalidator};

#[macro_use]
pub mod logging;

// Core modules
pub mod core;
pub mod common;
pub mod process;
pub mod memory;
pub mod time;
pub mod types;

// Re-export commonly used items
pub use self::core::{SyscallDispatcher, SyscallHandler, SyscallStats};
pub use time::TickClock;
pub use types::*;

/// Kernel services the system call handlers delegate to
pub struct KernelServices<M, F> {
    /// Process table, relative to the calling process
    pub process: Arc<dyn ProcessControl>,
    /// Scheduler used by sleeping callers
    pub scheduler: Arc<dyn Scheduler>,
    /// Clock advanced by the timer interrupt
    pub clock: Arc<TickClock>,
    /// Write-protection engine, one request at a time
    pub protection: Arc<Mutex<ProtectionToggle<M, F>>>,
}

impl<M, F> Clone for KernelServices<M, F> {
    fn clone(&self) -> Self {
        Self {
            process: Arc::clone(&self.process),
            scheduler: Arc::clone(&self.scheduler),
            clock: Arc::clone(&self.clock),
            protection: Arc::clone(&self.protection),
        }
    }
}

/// Build a dispatcher with every system call handler registered
pub fn init_syscalls<M, F>(services: &KernelServices<M, F>) -> nos_api::Result<SyscallDispatcher>
where
    M: FrameMapper + Send + 'static,
    F: TlbInvalidator + Send + 'static,
{
    let mut dispatcher = SyscallDispatcher::new();

    process::register_handlers(&mut dispatcher, &services.process)?;
    time::register_handlers(&mut dispatcher, &services.clock, &services.process, &services.scheduler)?;
    memory::register_handlers(&mut dispatcher, &services.process, &services.protection)?;

    sys_debug!("{} system calls registered", dispatcher.handler_count());
    Ok(dispatcher)
}
