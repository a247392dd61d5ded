//! Core types used throughout NOS operating system

use core::fmt;

/// Process identifier type
pub type Pid = u32;

/// Physical address as a bare machine word
///
/// The memory management crate wraps it in its `PhysAddr` newtype.
pub type RawPhysAddr = usize;

/// Virtual address as a bare machine word
pub type RawVirtAddr = usize;

/// Clock tick count
pub type Ticks = u64;

/// POSIX error numbers reported to user space
pub mod errno {
    /// Operation not permitted
    pub const EPERM: i32 = 1;
    /// No such process
    pub const ESRCH: i32 = 3;
    /// Interrupted system call
    pub const EINTR: i32 = 4;
    /// No child processes
    pub const ECHILD: i32 = 10;
    /// Out of memory
    pub const ENOMEM: i32 = 12;
    /// Bad address
    pub const EFAULT: i32 = 14;
    /// Device or resource busy
    pub const EBUSY: i32 = 16;
    /// Invalid argument
    pub const EINVAL: i32 = 22;
    /// Function not implemented
    pub const ENOSYS: i32 = 38;
}

/// Represents a kernel error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Operation not permitted
    PermissionDenied,
    /// Invalid argument
    InvalidArgument,
    /// Address is not mapped in the caller's address space
    BadAddress,
    /// Not enough memory
    OutOfMemory,
    /// Resource busy
    Busy,
    /// No such process
    NoProcess,
    /// No children to wait for
    NoChild,
    /// Interrupted system call
    Interrupted,
    /// System call not implemented
    NoSyscall,
    /// Unknown error
    Unknown(i32),
}

impl KernelError {
    /// Returns the errno value user space sees for this error
    pub const fn errno(self) -> i32 {
        match self {
            KernelError::PermissionDenied => errno::EPERM,
            KernelError::InvalidArgument => errno::EINVAL,
            KernelError::BadAddress => errno::EFAULT,
            KernelError::OutOfMemory => errno::ENOMEM,
            KernelError::Busy => errno::EBUSY,
            KernelError::NoProcess => errno::ESRCH,
            KernelError::NoChild => errno::ECHILD,
            KernelError::Interrupted => errno::EINTR,
            KernelError::NoSyscall => errno::ENOSYS,
            KernelError::Unknown(code) => code,
        }
    }

    /// Maps an errno value back to a kernel error
    pub const fn from_errno(code: i32) -> Self {
        match code {
            errno::EPERM => KernelError::PermissionDenied,
            errno::EINVAL => KernelError::InvalidArgument,
            errno::EFAULT => KernelError::BadAddress,
            errno::ENOMEM => KernelError::OutOfMemory,
            errno::EBUSY => KernelError::Busy,
            errno::ESRCH => KernelError::NoProcess,
            errno::ECHILD => KernelError::NoChild,
            errno::EINTR => KernelError::Interrupted,
            errno::ENOSYS => KernelError::NoSyscall,
            other => KernelError::Unknown(other),
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::PermissionDenied => write!(f, "Operation not permitted"),
            KernelError::InvalidArgument => write!(f, "Invalid argument"),
            KernelError::BadAddress => write!(f, "Bad address"),
            KernelError::OutOfMemory => write!(f, "Not enough memory"),
            KernelError::Busy => write!(f, "Resource busy"),
            KernelError::NoProcess => write!(f, "No such process"),
            KernelError::NoChild => write!(f, "No child processes"),
            KernelError::Interrupted => write!(f, "Interrupted system call"),
            KernelError::NoSyscall => write!(f, "Function not implemented"),
            KernelError::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}
