//! Page directory and page table structures
//!
//! Both levels of the 32-bit scheme are one 4 KiB frame holding 1024 32-bit
//! entries. An entry stores a frame address in its upper 20 bits and flags
//! in the lower 12.

use core::fmt;
use core::ops::{Index, IndexMut};

use bitflags::bitflags;
use static_assertions::const_assert_eq;

use crate::physical::{PhysAddr, PAGE_SIZE};

/// Number of entries in a page directory or page table
pub const ENTRIES_PER_TABLE: usize = 1024;

/// Bits of an entry holding the frame address
const FRAME_MASK: u32 = 0xFFFF_F000;

bitflags! {
    /// Flags shared by directory and leaf entries
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EntryFlags: u32 {
        /// Entry maps something
        const PRESENT = 1 << 0;
        /// Writes are allowed
        const WRITABLE = 1 << 1;
        /// Accessible from user mode
        const USER = 1 << 2;
        /// Write-through caching
        const WRITE_THROUGH = 1 << 3;
        /// Caching disabled
        const CACHE_DISABLE = 1 << 4;
        /// Set by the CPU on access
        const ACCESSED = 1 << 5;
        /// Set by the CPU on write (leaf only)
        const DIRTY = 1 << 6;
        /// 4 MiB page (directory only)
        const HUGE_PAGE = 1 << 7;
        /// Not flushed on root reload (leaf only)
        const GLOBAL = 1 << 8;
    }
}

/// Entry of a page directory, pointing at a page table
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct PageDirectoryEntry(u32);

impl PageDirectoryEntry {
    /// An absent entry
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds an entry pointing at the page table in `frame`
    pub fn new(frame: PhysAddr, flags: EntryFlags) -> Self {
        Self((frame.as_usize() as u32 & FRAME_MASK) | flags.bits())
    }

    /// Raw entry bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Physical frame of the page table
    pub const fn frame(self) -> PhysAddr {
        PhysAddr::new((self.0 & FRAME_MASK) as usize)
    }

    /// Entry flags
    pub fn flags(self) -> EntryFlags {
        EntryFlags::from_bits_truncate(self.0 & !FRAME_MASK)
    }

    /// True if the entry points at a page table
    pub fn is_present(self) -> bool {
        self.flags().contains(EntryFlags::PRESENT)
    }
}

impl fmt::Debug for PageDirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDirectoryEntry")
            .field("frame", &format_args!("{:#x}", self.frame().as_usize()))
            .field("flags", &self.flags())
            .finish()
    }
}

/// Leaf entry of a page table, mapping one 4 KiB page
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct PageTableEntry(u32);

impl PageTableEntry {
    /// An absent entry
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds an entry mapping `frame`
    pub fn new(frame: PhysAddr, flags: EntryFlags) -> Self {
        Self((frame.as_usize() as u32 & FRAME_MASK) | flags.bits())
    }

    /// Raw entry bits
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Physical frame the page maps to
    pub const fn frame(self) -> PhysAddr {
        PhysAddr::new((self.0 & FRAME_MASK) as usize)
    }

    /// Entry flags
    pub fn flags(self) -> EntryFlags {
        EntryFlags::from_bits_truncate(self.0 & !FRAME_MASK)
    }

    /// True if the page is mapped
    pub fn is_present(self) -> bool {
        self.flags().contains(EntryFlags::PRESENT)
    }

    /// True if user writes are allowed
    pub fn is_writable(self) -> bool {
        self.flags().contains(EntryFlags::WRITABLE)
    }

    /// Sets or clears the writable bit, leaving every other bit alone
    pub fn set_writable(&mut self, writable: bool) {
        if writable {
            self.0 |= EntryFlags::WRITABLE.bits();
        } else {
            self.0 &= !EntryFlags::WRITABLE.bits();
        }
    }

    /// Sets or clears the present bit
    pub fn set_present(&mut self, present: bool) {
        if present {
            self.0 |= EntryFlags::PRESENT.bits();
        } else {
            self.0 &= !EntryFlags::PRESENT.bits();
        }
    }
}

impl fmt::Debug for PageTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageTableEntry")
            .field("frame", &format_args!("{:#x}", self.frame().as_usize()))
            .field("flags", &self.flags())
            .finish()
    }
}

/// Top-level table of an address space
#[repr(C, align(4096))]
pub struct PageDirectory {
    entries: [PageDirectoryEntry; ENTRIES_PER_TABLE],
}

impl PageDirectory {
    /// Create a new empty page directory
    pub const fn new() -> Self {
        Self {
            entries: [PageDirectoryEntry::empty(); ENTRIES_PER_TABLE],
        }
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &PageDirectoryEntry> {
        self.entries.iter()
    }
}

impl Default for PageDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for PageDirectory {
    type Output = PageDirectoryEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl IndexMut<usize> for PageDirectory {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

/// Second-level table holding leaf entries
#[repr(C, align(4096))]
pub struct PageTable {
    entries: [PageTableEntry; ENTRIES_PER_TABLE],
}

impl PageTable {
    /// Create a new empty page table
    pub const fn new() -> Self {
        Self {
            entries: [PageTableEntry::empty(); ENTRIES_PER_TABLE],
        }
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &PageTableEntry> {
        self.entries.iter()
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for PageTable {
    type Output = PageTableEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl IndexMut<usize> for PageTable {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.entries[index]
    }
}

const_assert_eq!(core::mem::size_of::<PageTableEntry>(), 4);
const_assert_eq!(core::mem::size_of::<PageDirectoryEntry>(), 4);
const_assert_eq!(core::mem::size_of::<PageTable>(), PAGE_SIZE);
const_assert_eq!(core::mem::size_of::<PageDirectory>(), PAGE_SIZE);

/// Turns physical frames into addressable tables
///
/// Implementations must be total over every frame a present entry can
/// name: the walker never asks for a frame that an entry did not point at.
pub trait FrameMapper {
    /// Returns the page directory stored in `root`
    fn page_directory(&mut self, root: PhysAddr) -> &PageDirectory;

    /// Returns the page table stored in `frame`
    fn page_table(&mut self, frame: PhysAddr) -> &mut PageTable;
}

impl<M: FrameMapper + ?Sized> FrameMapper for &mut M {
    fn page_directory(&mut self, root: PhysAddr) -> &PageDirectory {
        (**self).page_directory(root)
    }

    fn page_table(&mut self, frame: PhysAddr) -> &mut PageTable {
        (**self).page_table(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_encoding() {
        let pte = PageTableEntry::new(
            PhysAddr::new(0x0012_3456),
            EntryFlags::PRESENT | EntryFlags::WRITABLE | EntryFlags::USER,
        );
        assert_eq!(pte.frame(), PhysAddr::new(0x0012_3000));
        assert_eq!(pte.bits(), 0x0012_3007);
        assert!(pte.is_present());
        assert!(pte.is_writable());
    }

    #[test]
    fn test_set_writable_only_touches_writable_bit() {
        let flags = EntryFlags::PRESENT | EntryFlags::WRITABLE | EntryFlags::USER | EntryFlags::DIRTY;
        let mut pte = PageTableEntry::new(PhysAddr::new(0x8000), flags);

        pte.set_writable(false);
        assert!(!pte.is_writable());
        assert_eq!(pte.flags(), flags - EntryFlags::WRITABLE);
        assert_eq!(pte.frame(), PhysAddr::new(0x8000));

        pte.set_writable(false);
        assert_eq!(pte.flags(), flags - EntryFlags::WRITABLE);

        pte.set_writable(true);
        assert_eq!(pte.flags(), flags);
    }

    #[test]
    fn test_directory_entry() {
        assert!(!PageDirectoryEntry::empty().is_present());
        let pde = PageDirectoryEntry::new(PhysAddr::new(0x0020_0000), EntryFlags::PRESENT | EntryFlags::USER);
        assert!(pde.is_present());
        assert_eq!(pde.frame(), PhysAddr::new(0x0020_0000));
    }

    #[test]
    fn test_tables_start_empty() {
        let table = PageTable::new();
        assert!(table.iter().all(|pte| !pte.is_present()));
        let directory = PageDirectory::new();
        assert_eq!(directory.iter().count(), ENTRIES_PER_TABLE);
    }
}
