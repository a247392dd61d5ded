//! Process management interface
//!
//! The process table and the scheduler are owned by the kernel. System call
//! handlers only see them through these traits, which keeps the handlers
//! testable without a running kernel.

use crate::core::types::{Pid, RawPhysAddr};
use crate::error::Result;

/// Operations on the process table, always relative to the calling process
pub trait ProcessControl: Send + Sync {
    /// Duplicates the calling process and returns the child's pid
    fn fork(&self) -> Result<Pid>;

    /// Terminates the calling process
    ///
    /// In a running kernel this never returns to the caller.
    fn exit(&self);

    /// Waits for a child to exit and returns its pid
    ///
    /// Fails with [`Error::NoChild`](crate::Error::NoChild) when the caller
    /// has no children, so user space sees `ECHILD`.
    fn wait(&self) -> Result<Pid>;

    /// Marks the process `pid` as killed
    fn kill(&self, pid: Pid) -> Result<()>;

    /// Returns the calling process's pid
    fn current_pid(&self) -> Pid;

    /// Returns the current top of the calling process's memory image
    fn memory_limit(&self) -> usize;

    /// Grows (or shrinks, for negative `delta`) the calling process's memory
    fn grow_memory(&self, delta: isize) -> Result<()>;

    /// Returns true once the calling process has been killed
    fn is_killed(&self) -> bool;

    /// Physical address of the calling process's page directory
    fn page_directory_root(&self) -> RawPhysAddr;
}

/// Blocking primitives provided by the scheduler
pub trait Scheduler: Send + Sync {
    /// Blocks the caller until the next timer tick has been delivered
    fn wait_for_tick(&self);
}
