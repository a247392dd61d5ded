//! Error handling module for NOS operating system

use core::fmt;

use crate::core::types::KernelError;

/// Common error type used throughout NOS operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Kernel error
    Kernel(KernelError),
    /// Invalid argument
    InvalidArgument(&'static str),
    /// Address not backed by a present mapping
    BadAddress(usize),
    /// Resource not found, reported as "no such process"
    NotFound(&'static str),
    /// Caller has no child to wait for
    NoChild,
    /// Permission denied
    PermissionDenied(&'static str),
    /// Out of memory
    OutOfMemory,
    /// Interrupted while waiting
    Interrupted,
    /// System call number has no handler
    NoSyscall(u32),
}

impl Error {
    /// Returns the errno value reported to user space
    pub const fn errno(&self) -> i32 {
        self.kind().errno()
    }

    /// Collapses the error to its kernel error code
    pub const fn kind(&self) -> KernelError {
        match self {
            Error::Kernel(err) => *err,
            Error::InvalidArgument(_) => KernelError::InvalidArgument,
            Error::BadAddress(_) => KernelError::BadAddress,
            Error::NotFound(_) => KernelError::NoProcess,
            Error::NoChild => KernelError::NoChild,
            Error::PermissionDenied(_) => KernelError::PermissionDenied,
            Error::OutOfMemory => KernelError::OutOfMemory,
            Error::Interrupted => KernelError::Interrupted,
            Error::NoSyscall(_) => KernelError::NoSyscall,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Kernel(err) => write!(f, "Kernel error: {}", err),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::BadAddress(addr) => write!(f, "Bad address: {:#x}", addr),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::NoChild => write!(f, "No child processes"),
            Error::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::Interrupted => write!(f, "Interrupted"),
            Error::NoSyscall(id) => write!(f, "System call {} not found", id),
        }
    }
}

impl From<KernelError> for Error {
    fn from(err: KernelError) -> Self {
        Error::Kernel(err)
    }
}

/// Result type for operations that can fail
pub type Result<T> = core::result::Result<T, Error>;

/// Creates a new invalid argument error
pub fn invalid_argument(msg: &'static str) -> Error {
    Error::InvalidArgument(msg)
}

/// Creates a new not found error
pub fn not_found(msg: &'static str) -> Error {
    Error::NotFound(msg)
}

/// Creates a new out of memory error
pub fn out_of_memory() -> Error {
    Error::OutOfMemory
}
