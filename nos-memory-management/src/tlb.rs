//! Translation cache invalidation

use crate::physical::PhysAddr;

/// Invalidates cached translations after page table edits
pub trait TlbInvalidator {
    /// Drop every cached translation of the address space rooted at `root`
    ///
    /// Acts on the current execution context only.
    fn flush_address_space(&self, root: PhysAddr);
}

impl<T: TlbInvalidator + ?Sized> TlbInvalidator for &T {
    fn flush_address_space(&self, root: PhysAddr) {
        (**self).flush_address_space(root)
    }
}

/// Full flush by reloading CR3 with the directory root
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub struct Cr3Reload {
    _private: (),
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl Cr3Reload {
    /// Creates the invalidator
    ///
    /// # Safety
    ///
    /// Must only be used in ring 0, and every root passed to
    /// [`flush_address_space`](TlbInvalidator::flush_address_space) must be
    /// the physical address of a valid page directory that also maps the
    /// running kernel.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
impl TlbInvalidator for Cr3Reload {
    #[inline]
    fn flush_address_space(&self, root: PhysAddr) {
        // SAFETY: guaranteed by the contract of `Cr3Reload::new`
        unsafe {
            core::arch::asm!(
                "mov cr3, {}",
                in(reg) root.as_usize(),
                options(nostack, preserves_flags)
            );
        }
    }
}
