//! System call types

use crate::core::types::KernelError;
use crate::error::Result;

/// System call number
pub type SyscallNumber = u32;

/// System call result as seen by user space
///
/// Success carries the non-negative return value; failures carry the
/// positive errno which is negated on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallResult {
    /// Success with return value
    Success(isize),
    /// Error with errno
    Error(i32),
}

impl SyscallResult {
    /// Creates a successful result
    pub fn success(value: isize) -> Self {
        SyscallResult::Success(value)
    }

    /// Creates an error result
    pub fn error(error: KernelError) -> Self {
        SyscallResult::Error(error.errno())
    }

    /// Returns true if result is success
    pub fn is_success(&self) -> bool {
        matches!(self, SyscallResult::Success(_))
    }

    /// Returns true if result is error
    pub fn is_error(&self) -> bool {
        matches!(self, SyscallResult::Error(_))
    }

    /// Encodes the result as the status word returned to user space
    pub fn to_isize(self) -> isize {
        match self {
            SyscallResult::Success(value) => value,
            SyscallResult::Error(code) => -(code as isize),
        }
    }

    /// Decodes a status word
    pub fn from_isize(value: isize) -> Self {
        if value < 0 {
            SyscallResult::Error((-value) as i32)
        } else {
            SyscallResult::Success(value)
        }
    }
}

impl From<Result<isize>> for SyscallResult {
    fn from(result: Result<isize>) -> Self {
        match result {
            Ok(value) => SyscallResult::Success(value),
            Err(err) => SyscallResult::Error(err.errno()),
        }
    }
}
