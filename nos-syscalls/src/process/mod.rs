//! Process system calls
//!
//! This module provides process management related system calls. Each
//! handler decodes its arguments and delegates to [`ProcessControl`].

use alloc::boxed::Box;
use alloc::sync::Arc;

use nos_api::{Error, Pid, ProcessControl, Result};

use crate::common::arg_int;
use crate::core::{SyscallDispatcher, SyscallHandler};

/// Register process system call handlers
pub fn register_handlers(dispatcher: &mut SyscallDispatcher, process: &Arc<dyn ProcessControl>) -> Result<()> {
    // Register fork system call
    dispatcher.register_handler(
        crate::types::SYS_FORK,
        Box::new(ForkHandler { process: Arc::clone(process) }),
    );

    // Register exit system call
    dispatcher.register_handler(
        crate::types::SYS_EXIT,
        Box::new(ExitHandler { process: Arc::clone(process) }),
    );

    // Register wait system call
    dispatcher.register_handler(
        crate::types::SYS_WAIT,
        Box::new(WaitHandler { process: Arc::clone(process) }),
    );

    // Register kill system call
    dispatcher.register_handler(
        crate::types::SYS_KILL,
        Box::new(KillHandler { process: Arc::clone(process) }),
    );

    // Register getpid system call
    dispatcher.register_handler(
        crate::types::SYS_GETPID,
        Box::new(GetpidHandler { process: Arc::clone(process) }),
    );

    // Register sbrk system call
    dispatcher.register_handler(
        crate::types::SYS_SBRK,
        Box::new(SbrkHandler { process: Arc::clone(process) }),
    );

    Ok(())
}

/// Fork system call handler
struct ForkHandler {
    process: Arc<dyn ProcessControl>,
}

impl SyscallHandler for ForkHandler {
    fn execute(&self, _args: &[usize]) -> Result<isize> {
        let child = self.process.fork()?;
        sys_trace!("fork: pid {} created child {}", self.process.current_pid(), child);
        Ok(child as isize)
    }

    fn name(&self) -> &str {
        "fork"
    }

    fn id(&self) -> u32 {
        crate::types::SYS_FORK
    }
}

/// Exit system call handler
struct ExitHandler {
    process: Arc<dyn ProcessControl>,
}

impl SyscallHandler for ExitHandler {
    fn execute(&self, _args: &[usize]) -> Result<isize> {
        sys_trace!("exit: pid {}", self.process.current_pid());
        self.process.exit();
        // Only reached when the process table lets the caller continue
        Ok(0)
    }

    fn name(&self) -> &str {
        "exit"
    }

    fn id(&self) -> u32 {
        crate::types::SYS_EXIT
    }
}

/// Wait system call handler
struct WaitHandler {
    process: Arc<dyn ProcessControl>,
}

impl SyscallHandler for WaitHandler {
    fn execute(&self, _args: &[usize]) -> Result<isize> {
        let child = self.process.wait()?;
        Ok(child as isize)
    }

    fn name(&self) -> &str {
        "wait"
    }

    fn id(&self) -> u32 {
        crate::types::SYS_WAIT
    }
}

/// Kill system call handler
struct KillHandler {
    process: Arc<dyn ProcessControl>,
}

impl SyscallHandler for KillHandler {
    fn execute(&self, args: &[usize]) -> Result<isize> {
        let pid = arg_int(args, 0)?;
        sys_trace!("kill called with: pid={}", pid);
        let pid = Pid::try_from(pid).map_err(|_| Error::NotFound("no such process"))?;
        self.process.kill(pid)?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "kill"
    }

    fn id(&self) -> u32 {
        crate::types::SYS_KILL
    }
}

/// Getpid system call handler
struct GetpidHandler {
    process: Arc<dyn ProcessControl>,
}

impl SyscallHandler for GetpidHandler {
    fn execute(&self, _args: &[usize]) -> Result<isize> {
        Ok(self.process.current_pid() as isize)
    }

    fn name(&self) -> &str {
        "getpid"
    }

    fn id(&self) -> u32 {
        crate::types::SYS_GETPID
    }
}

/// Sbrk system call handler
///
/// Returns the memory limit from before the change.
struct SbrkHandler {
    process: Arc<dyn ProcessControl>,
}

impl SyscallHandler for SbrkHandler {
    fn execute(&self, args: &[usize]) -> Result<isize> {
        let delta = arg_int(args, 0)?;
        sys_trace!("sbrk called with: delta={}", delta);
        let previous = self.process.memory_limit();
        self.process.grow_memory(delta as isize)?;
        Ok(previous as isize)
    }

    fn name(&self) -> &str {
        "sbrk"
    }

    fn id(&self) -> u32 {
        crate::types::SYS_SBRK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

    struct FakeProcess {
        limit: AtomicUsize,
        killed: AtomicU32,
        exited: AtomicBool,
    }

    impl FakeProcess {
        fn new() -> Self {
            Self {
                limit: AtomicUsize::new(0x4000),
                killed: AtomicU32::new(0),
                exited: AtomicBool::new(false),
            }
        }
    }

    impl ProcessControl for FakeProcess {
        fn fork(&self) -> Result<Pid> {
            Ok(8)
        }

        fn exit(&self) {
            self.exited.store(true, Ordering::SeqCst);
        }

        fn wait(&self) -> Result<Pid> {
            Err(Error::NoChild)
        }

        fn kill(&self, pid: Pid) -> Result<()> {
            if pid == 0 || pid > 64 {
                return Err(Error::NotFound("no such process"));
            }
            self.killed.store(pid, Ordering::SeqCst);
            Ok(())
        }

        fn current_pid(&self) -> Pid {
            3
        }

        fn memory_limit(&self) -> usize {
            self.limit.load(Ordering::SeqCst)
        }

        fn grow_memory(&self, delta: isize) -> Result<()> {
            let limit = self.limit.load(Ordering::SeqCst) as isize + delta;
            if limit < 0 {
                return Err(Error::OutOfMemory);
            }
            self.limit.store(limit as usize, Ordering::SeqCst);
            Ok(())
        }

        fn is_killed(&self) -> bool {
            false
        }

        fn page_directory_root(&self) -> nos_api::RawPhysAddr {
            0x10_0000
        }
    }

    fn setup() -> (Arc<FakeProcess>, SyscallDispatcher) {
        let fake = Arc::new(FakeProcess::new());
        let process: Arc<dyn ProcessControl> = fake.clone();
        let mut dispatcher = SyscallDispatcher::new();
        register_handlers(&mut dispatcher, &process).unwrap();
        (fake, dispatcher)
    }

    #[test]
    fn test_register_handlers() {
        let (_, dispatcher) = setup();
        assert_eq!(dispatcher.handler_count(), 6);
        assert_eq!(dispatcher.get_handler(crate::types::SYS_SBRK).map(|h| h.name()), Some("sbrk"));
    }

    #[test]
    fn test_fork_getpid_wait() {
        let (_, dispatcher) = setup();
        assert_eq!(dispatcher.dispatch(crate::types::SYS_FORK, &[]), Ok(8));
        assert_eq!(dispatcher.dispatch(crate::types::SYS_GETPID, &[]), Ok(3));
        assert_eq!(
            dispatcher.dispatch(crate::types::SYS_WAIT, &[]),
            Err(Error::NoChild)
        );
    }

    #[test]
    fn test_exit() {
        let (fake, dispatcher) = setup();
        assert_eq!(dispatcher.dispatch(crate::types::SYS_EXIT, &[]), Ok(0));
        assert!(fake.exited.load(Ordering::SeqCst));
    }

    #[test]
    fn test_kill() {
        let (fake, dispatcher) = setup();
        assert_eq!(dispatcher.dispatch(crate::types::SYS_KILL, &[5]), Ok(0));
        assert_eq!(fake.killed.load(Ordering::SeqCst), 5);

        // -1 as a C int
        let result = dispatcher.dispatch(crate::types::SYS_KILL, &[0xFFFF_FFFF]);
        assert_eq!(result, Err(Error::NotFound("no such process")));
        assert!(dispatcher.dispatch(crate::types::SYS_KILL, &[]).is_err());
    }

    #[test]
    fn test_sbrk_returns_previous_limit() {
        let (fake, dispatcher) = setup();
        assert_eq!(dispatcher.dispatch(crate::types::SYS_SBRK, &[0x1000]), Ok(0x4000));
        assert_eq!(fake.memory_limit(), 0x5000);

        let shrink = (-0x2000i32) as u32 as usize;
        assert_eq!(dispatcher.dispatch(crate::types::SYS_SBRK, &[shrink]), Ok(0x5000));
        assert_eq!(fake.memory_limit(), 0x3000);

        let too_far = (-0x10000i32) as u32 as usize;
        assert_eq!(dispatcher.dispatch(crate::types::SYS_SBRK, &[too_far]), Err(Error::OutOfMemory));
    }
}
