//! Hosted frame arena
//!
//! A heap-backed stand-in for physical memory that hands out page
//! directories and page tables at fake frame addresses. It lets the walker
//! and the protection toggle run in unit tests, integration tests and
//! benchmarks without touching real hardware.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;

use crate::page_table::{EntryFlags, FrameMapper, PageDirectory, PageDirectoryEntry, PageTable, PageTableEntry};
use crate::physical::{PhysAddr, PAGE_SIZE};
use crate::virtual_mem::VirtAddr;

/// First fake frame handed out by the arena
const FIRST_FRAME: usize = 0x0010_0000;

/// Heap-backed [`FrameMapper`]
pub struct FrameArena {
    directories: BTreeMap<PhysAddr, Box<PageDirectory>>,
    tables: BTreeMap<PhysAddr, Box<PageTable>>,
    next_frame: usize,
}

impl FrameArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self {
            directories: BTreeMap::new(),
            tables: BTreeMap::new(),
            next_frame: FIRST_FRAME,
        }
    }

    fn alloc_frame(&mut self) -> PhysAddr {
        let frame = PhysAddr::new(self.next_frame);
        self.next_frame += PAGE_SIZE;
        frame
    }

    /// Allocate an empty page directory and return its root
    pub fn new_directory(&mut self) -> PhysAddr {
        let root = self.alloc_frame();
        self.directories.insert(root, Box::new(PageDirectory::new()));
        root
    }

    /// Number of page tables allocated so far
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Map the page containing `va` to a fresh frame with `flags | PRESENT`
    ///
    /// Creates the covering page table on first use. Returns the frame the
    /// page now maps to.
    ///
    /// # Panics
    ///
    /// Panics if `root` was not returned by [`new_directory`](Self::new_directory).
    pub fn map_page(&mut self, root: PhysAddr, va: VirtAddr, flags: EntryFlags) -> PhysAddr {
        let pde = self.directory_mut(root)[va.directory_index()];
        let table_frame = if pde.is_present() {
            pde.frame()
        } else {
            let frame = self.alloc_frame();
            self.tables.insert(frame, Box::new(PageTable::new()));
            let dir_flags = EntryFlags::PRESENT | EntryFlags::WRITABLE | EntryFlags::USER;
            self.directory_mut(root)[va.directory_index()] = PageDirectoryEntry::new(frame, dir_flags);
            frame
        };

        let page_frame = self.alloc_frame();
        self.page_table(table_frame)[va.table_index()] =
            PageTableEntry::new(page_frame, flags | EntryFlags::PRESENT);
        page_frame
    }

    /// Clear the present bit of the leaf mapping `va`, leaving the rest of the entry
    ///
    /// Returns false if no page table covers `va`.
    pub fn mark_not_present(&mut self, root: PhysAddr, va: VirtAddr) -> bool {
        match self.entry_mut(root, va) {
            Some(pte) => {
                pte.set_present(false);
                true
            }
            None => false,
        }
    }

    /// Copy of the leaf entry for `va`, if a page table covers it
    pub fn entry(&mut self, root: PhysAddr, va: VirtAddr) -> Option<PageTableEntry> {
        self.entry_mut(root, va).copied()
    }

    fn entry_mut(&mut self, root: PhysAddr, va: VirtAddr) -> Option<&mut PageTableEntry> {
        let pde = self.page_directory(root)[va.directory_index()];
        if !pde.is_present() {
            return None;
        }
        Some(&mut self.page_table(pde.frame())[va.table_index()])
    }

    fn directory_mut(&mut self, root: PhysAddr) -> &mut PageDirectory {
        match self.directories.get_mut(&root) {
            Some(directory) => &mut **directory,
            None => panic!("frame {:#x} does not hold a page directory", root.as_usize()),
        }
    }
}

impl Default for FrameArena {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMapper for FrameArena {
    /// # Panics
    ///
    /// Panics if `root` does not hold a page directory.
    fn page_directory(&mut self, root: PhysAddr) -> &PageDirectory {
        self.directory_mut(root)
    }

    /// # Panics
    ///
    /// Panics if `frame` does not hold a page table.
    fn page_table(&mut self, frame: PhysAddr) -> &mut PageTable {
        match self.tables.get_mut(&frame) {
            Some(table) => &mut **table,
            None => panic!("frame {:#x} does not hold a page table", frame.as_usize()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_page_shares_tables() {
        let mut arena = FrameArena::new();
        let root = arena.new_directory();
        arena.map_page(root, VirtAddr::new(0x1000), EntryFlags::WRITABLE);
        arena.map_page(root, VirtAddr::new(0x2000), EntryFlags::WRITABLE);
        assert_eq!(arena.table_count(), 1);

        arena.map_page(root, VirtAddr::new(0x0040_0000), EntryFlags::empty());
        assert_eq!(arena.table_count(), 2);
    }

    #[test]
    fn test_mark_not_present() {
        let mut arena = FrameArena::new();
        let root = arena.new_directory();
        let frame = arena.map_page(root, VirtAddr::new(0x1000), EntryFlags::WRITABLE);

        assert!(arena.mark_not_present(root, VirtAddr::new(0x1000)));
        let pte = arena.entry(root, VirtAddr::new(0x1000));
        assert!(pte.is_some_and(|pte| !pte.is_present() && pte.is_writable() && pte.frame() == frame));

        assert!(!arena.mark_not_present(root, VirtAddr::new(0x0080_0000)));
    }
}
