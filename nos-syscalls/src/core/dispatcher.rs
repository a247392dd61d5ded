//! System call dispatcher
//!
//! This module provides the core system call dispatch mechanism.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use nos_api::sync::Mutex;
use nos_api::{Error, SyscallResult};

use super::traits::SyscallHandler;

/// System call dispatcher
pub struct SyscallDispatcher {
    /// Registered system call handlers
    handlers: BTreeMap<u32, Box<dyn SyscallHandler>>,
    /// System call statistics
    stats: Mutex<SyscallStats>,
}

impl SyscallDispatcher {
    /// Create a new system call dispatcher
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            stats: Mutex::new(SyscallStats::default()),
        }
    }

    /// Register a system call handler, replacing any previous one for `id`
    pub fn register_handler(&mut self, id: u32, handler: Box<dyn SyscallHandler>) {
        self.handlers.insert(id, handler);
    }

    /// Get a system call handler
    pub fn get_handler(&self, id: u32) -> Option<&dyn SyscallHandler> {
        self.handlers.get(&id).map(|handler| handler.as_ref())
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch a system call
    pub fn dispatch(&self, id: u32, args: &[usize]) -> nos_api::Result<isize> {
        let result = match self.handlers.get(&id) {
            Some(handler) if handler.is_available() => handler.execute(args),
            _ => {
                sys_debug!("system call {} not found", id);
                Err(Error::NoSyscall(id))
            }
        };

        let mut stats = self.stats.lock();
        stats.total_calls += 1;
        *stats.calls_by_type.entry(id).or_insert(0) += 1;
        if result.is_err() {
            stats.error_count += 1;
        }

        result
    }

    /// Dispatch a system call and encode the outcome as the user-visible status word
    ///
    /// Failures become `-errno`.
    pub fn dispatch_raw(&self, id: u32, args: &[usize]) -> isize {
        SyscallResult::from(self.dispatch(id, args)).to_isize()
    }

    /// Get system call statistics
    pub fn get_stats(&self) -> SyscallStats {
        self.stats.lock().clone()
    }
}

impl Default for SyscallDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// System call statistics
#[derive(Debug, Clone, Default)]
pub struct SyscallStats {
    /// Total number of system calls
    pub total_calls: u64,
    /// Number of calls by type
    pub calls_by_type: BTreeMap<u32, u64>,
    /// Number of errors
    pub error_count: u64,
}
