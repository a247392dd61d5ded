//! System call traits
//!
//! This module provides common traits for system calls.

use nos_api::Result;

/// System call handler trait
pub trait SyscallHandler: Send + Sync {
    /// Execute the system call
    fn execute(&self, args: &[usize]) -> Result<isize>;

    /// Get the system call name
    fn name(&self) -> &str;

    /// Get the system call ID
    fn id(&self) -> u32;

    /// Check if the system call is available
    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestHandler {
        name: &'static str,
        id: u32,
    }

    impl SyscallHandler for TestHandler {
        fn execute(&self, _args: &[usize]) -> Result<isize> {
            Ok(0)
        }

        fn name(&self) -> &str {
            self.name
        }

        fn id(&self) -> u32 {
            self.id
        }
    }

    #[test]
    fn test_syscall_handler() {
        let handler = TestHandler {
            name: "test",
            id: 100,
        };

        assert_eq!(handler.name(), "test");
        assert_eq!(handler.id(), 100);
        assert!(handler.is_available());
    }
}
