//! API tests

use nos_api::core::types::errno;
use nos_api::{Error, KernelError, Result, SyscallResult};

#[test]
fn test_syscall_result() {
    let success = SyscallResult::Success(42);
    assert_eq!(success.to_isize(), 42);

    let error = SyscallResult::Error(2);
    assert_eq!(error.to_isize(), -2);

    assert_eq!(SyscallResult::from_isize(42), SyscallResult::Success(42));
    assert_eq!(SyscallResult::from_isize(-2), SyscallResult::Error(2));
    assert_eq!(SyscallResult::from_isize(0), SyscallResult::Success(0));
}

#[test]
fn test_result_conversion() {
    let ok: Result<isize> = Ok(7);
    assert_eq!(SyscallResult::from(ok).to_isize(), 7);

    let err: Result<isize> = Err(Error::InvalidArgument("misaligned"));
    assert_eq!(SyscallResult::from(err).to_isize(), -(errno::EINVAL as isize));

    let unmapped: Result<isize> = Err(Error::BadAddress(0x3000));
    assert_eq!(SyscallResult::from(unmapped), SyscallResult::Error(errno::EFAULT));
}

#[test]
fn test_kernel_error_result() {
    let result = SyscallResult::error(KernelError::Interrupted);
    assert!(result.is_error());
    assert!(!result.is_success());
    assert_eq!(result.to_isize(), -(errno::EINTR as isize));
}

#[test]
fn test_error_display() {
    assert_eq!(
        Error::BadAddress(0x3000).to_string(),
        "Bad address: 0x3000"
    );
    assert_eq!(
        Error::Kernel(KernelError::NoProcess).to_string(),
        "Kernel error: No such process"
    );
}
