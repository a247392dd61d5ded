//! Memory system calls
//!
//! `mprotect(addr, len)` makes every page overlapping the range read-only,
//! `munprotect(addr, len)` makes it writable again. Both return 0 or a
//! negative errno. A failure part-way through leaves the pages before the
//! failing one already changed; see
//! [`ProtectionToggle`](nos_memory_management::ProtectionToggle).

use alloc::boxed::Box;
use alloc::sync::Arc;

use nos_api::sync::Mutex;
use nos_api::{ProcessControl, Result};
use nos_memory_management::{FrameMapper, PhysAddr, ProtectionToggle, TlbInvalidator, WriteAccess};

use crate::common::{arg_addr, arg_int};
use crate::core::{SyscallDispatcher, SyscallHandler};

/// Register memory system call handlers
pub fn register_handlers<M, F>(
    dispatcher: &mut SyscallDispatcher,
    process: &Arc<dyn ProcessControl>,
    protection: &Arc<Mutex<ProtectionToggle<M, F>>>,
) -> Result<()>
where
    M: FrameMapper + Send + 'static,
    F: TlbInvalidator + Send + 'static,
{
    // Register mprotect system call
    dispatcher.register_handler(
        crate::types::SYS_MPROTECT,
        Box::new(ProtectHandler::new(
            crate::types::SYS_MPROTECT,
            WriteAccess::ReadOnly,
            Arc::clone(process),
            Arc::clone(protection),
        )),
    );

    // Register munprotect system call
    dispatcher.register_handler(
        crate::types::SYS_MUNPROTECT,
        Box::new(ProtectHandler::new(
            crate::types::SYS_MUNPROTECT,
            WriteAccess::Writable,
            Arc::clone(process),
            Arc::clone(protection),
        )),
    );

    Ok(())
}

/// Handler shared by mprotect and munprotect
pub struct ProtectHandler<M, F> {
    id: u32,
    access: WriteAccess,
    process: Arc<dyn ProcessControl>,
    protection: Arc<Mutex<ProtectionToggle<M, F>>>,
}

impl<M, F> ProtectHandler<M, F> {
    /// Create a handler applying `access` to the caller's pages
    pub fn new(
        id: u32,
        access: WriteAccess,
        process: Arc<dyn ProcessControl>,
        protection: Arc<Mutex<ProtectionToggle<M, F>>>,
    ) -> Self {
        Self {
            id,
            access,
            process,
            protection,
        }
    }
}

impl<M, F> SyscallHandler for ProtectHandler<M, F>
where
    M: FrameMapper + Send,
    F: TlbInvalidator + Send,
{
    fn id(&self) -> u32 {
        self.id
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        let addr = arg_addr(args, 0)?;
        let len = arg_int(args, 1)?;
        sys_trace!("{} called with: addr={:#x}, len={}", self.name(), addr.as_usize(), len);

        let root = PhysAddr::new(self.process.page_directory_root());
        let outcome = self
            .protection
            .lock()
            .set_range(root, addr, len as isize, self.access);
        if let Err(err) = outcome {
            sys_warn!("{} by pid {} failed: {}", self.name(), self.process.current_pid(), err);
            return Err(err.into());
        }
        Ok(0)
    }

    fn name(&self) -> &str {
        match self.access {
            WriteAccess::ReadOnly => "mprotect",
            WriteAccess::Writable => "munprotect",
        }
    }
}
