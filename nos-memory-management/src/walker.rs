//! Page table walker
//!
//! Finds the leaf entry mapping a virtual address without allocating or
//! modifying anything.

use crate::page_table::{FrameMapper, PageTableEntry};
use crate::physical::PhysAddr;
use crate::virtual_mem::VirtAddr;

/// Read-only walker over a two-level page table
pub struct PageTableWalker<M> {
    mapper: M,
}

impl<M: FrameMapper> PageTableWalker<M> {
    /// Create a walker translating frames through `mapper`
    pub const fn new(mapper: M) -> Self {
        Self { mapper }
    }

    /// Locate the leaf entry for `va` in the directory stored at `root`
    ///
    /// Returns `None` when the directory entry covering `va` is not present.
    /// The leaf entry itself is returned whether or not it is present.
    pub fn locate(&mut self, root: PhysAddr, va: VirtAddr) -> Option<&mut PageTableEntry> {
        let pde = self.mapper.page_directory(root)[va.directory_index()];
        if !pde.is_present() {
            mm_trace!("locate {:#x}: no page table (pde {:?})", va.as_usize(), pde);
            return None;
        }
        let table = self.mapper.page_table(pde.frame());
        Some(&mut table[va.table_index()])
    }

    /// Borrow the underlying frame mapper
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Mutably borrow the underlying frame mapper
    pub fn mapper_mut(&mut self) -> &mut M {
        &mut self.mapper
    }

    /// Consume the walker and return the mapper
    pub fn into_mapper(self) -> M {
        self.mapper
    }
}

#[cfg(all(test, feature = "alloc"))]
mod tests {
    use super::*;
    use crate::page_table::EntryFlags;
    use crate::sim::FrameArena;

    #[test]
    fn test_locate_unmapped_directory() {
        let mut arena = FrameArena::new();
        let root = arena.new_directory();
        let mut walker = PageTableWalker::new(&mut arena);
        assert!(walker.locate(root, VirtAddr::new(0x1000)).is_none());
    }

    #[test]
    fn test_locate_returns_leaf_even_when_not_present() {
        let mut arena = FrameArena::new();
        let root = arena.new_directory();
        arena.map_page(root, VirtAddr::new(0x1000), EntryFlags::WRITABLE | EntryFlags::USER);

        let mut walker = PageTableWalker::new(&mut arena);
        let pte = walker.locate(root, VirtAddr::new(0x1000)).copied();
        assert!(pte.is_some_and(|pte| pte.is_present() && pte.is_writable()));

        // Same page table, different slot that was never mapped
        let sibling = walker.locate(root, VirtAddr::new(0x5000)).copied();
        assert_eq!(sibling, Some(PageTableEntry::empty()));
    }

    #[test]
    fn test_locate_ignores_page_offset() {
        let mut arena = FrameArena::new();
        let root = arena.new_directory();
        arena.map_page(root, VirtAddr::new(0x0040_2000), EntryFlags::USER);

        let mut walker = PageTableWalker::new(&mut arena);
        let aligned = walker.locate(root, VirtAddr::new(0x0040_2000)).copied();
        let inner = walker.locate(root, VirtAddr::new(0x0040_2ABC)).copied();
        assert!(aligned.is_some());
        assert_eq!(aligned, inner);
    }

    #[test]
    fn test_locate_does_not_allocate() {
        let mut arena = FrameArena::new();
        let root = arena.new_directory();
        let before = arena.table_count();
        let mut walker = PageTableWalker::new(&mut arena);
        let _ = walker.locate(root, VirtAddr::new(0x0080_0000));
        assert_eq!(arena.table_count(), before);
    }
}
