//! Time system calls
//!
//! This module provides the timer tick counter and the system calls built
//! on it.

use alloc::boxed::Box;
use alloc::sync::Arc;

use nos_api::sync::Mutex;
use nos_api::{Error, ProcessControl, Result, Scheduler, Ticks};

use crate::common::arg_int;
use crate::core::{SyscallDispatcher, SyscallHandler};

/// Monotonic count of timer interrupts since boot
pub struct TickClock {
    ticks: Mutex<Ticks>,
}

impl TickClock {
    /// Create a clock at tick zero
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(0),
        }
    }

    /// Advance the clock by one tick, called from the timer interrupt
    pub fn tick(&self) -> Ticks {
        let mut ticks = self.ticks.lock();
        *ticks = ticks.wrapping_add(1);
        *ticks
    }

    /// Ticks elapsed since boot
    pub fn now(&self) -> Ticks {
        *self.ticks.lock()
    }

    /// Block the calling process for `n` ticks
    ///
    /// The clock lock is released while waiting. Returns
    /// [`Error::Interrupted`] if the caller is killed before the ticks
    /// have passed.
    pub fn sleep(&self, n: Ticks, process: &dyn ProcessControl, scheduler: &dyn Scheduler) -> Result<()> {
        let mut ticks = self.ticks.lock();
        let start = *ticks;
        while ticks.wrapping_sub(start) < n {
            if process.is_killed() {
                return Err(Error::Interrupted);
            }
            drop(ticks);
            scheduler.wait_for_tick();
            ticks = self.ticks.lock();
        }
        Ok(())
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Register time system call handlers
pub fn register_handlers(
    dispatcher: &mut SyscallDispatcher,
    clock: &Arc<TickClock>,
    process: &Arc<dyn ProcessControl>,
    scheduler: &Arc<dyn Scheduler>,
) -> Result<()> {
    // Register sleep system call
    dispatcher.register_handler(
        crate::types::SYS_SLEEP,
        Box::new(SleepHandler {
            clock: Arc::clone(clock),
            process: Arc::clone(process),
            scheduler: Arc::clone(scheduler),
        }),
    );

    // Register uptime system call
    dispatcher.register_handler(
        crate::types::SYS_UPTIME,
        Box::new(UptimeHandler {
            clock: Arc::clone(clock),
        }),
    );

    Ok(())
}

/// Sleep system call handler
struct SleepHandler {
    clock: Arc<TickClock>,
    process: Arc<dyn ProcessControl>,
    scheduler: Arc<dyn Scheduler>,
}

impl SyscallHandler for SleepHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_SLEEP
    }

    fn execute(&self, args: &[usize]) -> Result<isize> {
        let n = arg_int(args, 0)?;
        sys_trace!("sleep called with: n={}", n);
        let n = Ticks::try_from(n).map_err(|_| Error::InvalidArgument("negative sleep duration"))?;
        self.clock.sleep(n, self.process.as_ref(), self.scheduler.as_ref())?;
        Ok(0)
    }

    fn name(&self) -> &str {
        "sleep"
    }
}

/// Uptime system call handler
struct UptimeHandler {
    clock: Arc<TickClock>,
}

impl SyscallHandler for UptimeHandler {
    fn id(&self) -> u32 {
        crate::types::SYS_UPTIME
    }

    fn execute(&self, _args: &[usize]) -> Result<isize> {
        Ok(self.clock.now() as isize)
    }

    fn name(&self) -> &str {
        "uptime"
    }
}
