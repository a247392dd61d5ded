//! Kernel address space layout
//!
//! Physical memory is mapped at [`KERNEL_BASE`] in every address space, so a
//! physical address becomes addressable by adding the base.

use crate::page_table::{FrameMapper, PageDirectory, PageTable};
use crate::physical::PhysAddr;

/// First kernel virtual address; physical memory is mapped from here
pub const KERNEL_BASE: usize = 0x8000_0000;

/// Translate a physical address into the kernel's direct map
#[inline]
pub const fn phys_to_virt(pa: PhysAddr) -> usize {
    pa.as_usize() + KERNEL_BASE
}

/// Translate a direct-map kernel address back to physical
#[inline]
pub const fn virt_to_phys(va: usize) -> PhysAddr {
    PhysAddr::new(va - KERNEL_BASE)
}

/// [`FrameMapper`] over the kernel's direct map
///
/// Used by the running kernel; hosted code uses
/// [`FrameArena`](crate::sim::FrameArena) instead.
pub struct DirectMap {
    _private: (),
}

impl DirectMap {
    /// Creates the direct-map translator
    ///
    /// # Safety
    ///
    /// Physical memory must be mapped at [`KERNEL_BASE`] in the active
    /// address space, every frame handed to the mapper must hold a page
    /// directory or page table, and no other reference to those frames may
    /// be live while a returned table is borrowed.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl FrameMapper for DirectMap {
    fn page_directory(&mut self, root: PhysAddr) -> &PageDirectory {
        // SAFETY: guaranteed by the contract of `DirectMap::new`
        unsafe { &*(phys_to_virt(root) as *const PageDirectory) }
    }

    fn page_table(&mut self, frame: PhysAddr) -> &mut PageTable {
        // SAFETY: guaranteed by the contract of `DirectMap::new`
        unsafe { &mut *(phys_to_virt(frame) as *mut PageTable) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_map_translation() {
        assert_eq!(phys_to_virt(PhysAddr::new(0x1000)), 0x8000_1000);
        assert_eq!(virt_to_phys(0x8000_1000), PhysAddr::new(0x1000));
        assert_eq!(virt_to_phys(phys_to_virt(PhysAddr::new(0x0030_0000))), PhysAddr::new(0x0030_0000));
    }
}
