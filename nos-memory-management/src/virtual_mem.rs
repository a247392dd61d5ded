//! Virtual addresses on the 32-bit two-level paging scheme
//!
//! ```text
//!  31            22 21            12 11              0
//! +----------------+----------------+----------------+
//! | directory idx  |   table idx    |  page offset   |
//! +----------------+----------------+----------------+
//! ```

use crate::physical::{PAGE_SIZE, PAGE_SHIFT, page_round_up, page_round_down};

/// Shift of the page directory index
pub const DIRECTORY_SHIFT: usize = 22;
/// Mask applied to either 10-bit index after shifting
pub const INDEX_MASK: usize = 0x3FF;
/// First address past the end of the 32-bit address space
pub const ADDRESS_SPACE_END: u64 = 1 << 32;

/// A virtual address
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct VirtAddr(pub usize);

impl VirtAddr {
    /// Creates a new virtual address from a raw usize value.
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Returns the virtual address as a raw usize value.
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns the offset within the current page.
    pub const fn page_offset(self) -> usize {
        self.0 & (PAGE_SIZE - 1)
    }

    /// Returns the page number for this virtual address.
    pub const fn page_number(self) -> usize {
        self.0 >> PAGE_SHIFT
    }

    /// Checks if the virtual address is page-aligned.
    pub const fn is_page_aligned(self) -> bool {
        self.page_offset() == 0
    }

    /// Rounds up the virtual address to the next page boundary.
    pub const fn page_round_up(self) -> Self {
        Self(page_round_up(self.0))
    }

    /// Rounds down the virtual address to the previous page boundary.
    pub const fn page_round_down(self) -> Self {
        Self(page_round_down(self.0))
    }

    /// Index into the page directory (bits 31..22)
    pub const fn directory_index(self) -> usize {
        (self.0 >> DIRECTORY_SHIFT) & INDEX_MASK
    }

    /// Index into the page table (bits 21..12)
    pub const fn table_index(self) -> usize {
        (self.0 >> PAGE_SHIFT) & INDEX_MASK
    }

    /// Adds `bytes`, returning `None` when the result leaves the 32-bit address space
    pub fn checked_add(self, bytes: usize) -> Option<Self> {
        let end = (self.0 as u64).checked_add(bytes as u64)?;
        if end >= ADDRESS_SPACE_END {
            return None;
        }
        Some(Self(end as usize))
    }
}

impl From<usize> for VirtAddr {
    fn from(addr: usize) -> Self {
        Self(addr)
    }
}

impl From<VirtAddr> for usize {
    fn from(addr: VirtAddr) -> Self {
        addr.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices() {
        let va = VirtAddr::new(0x0040_3123);
        assert_eq!(va.directory_index(), 1);
        assert_eq!(va.table_index(), 3);
        assert_eq!(va.page_offset(), 0x123);

        let top = VirtAddr::new(0xFFFF_F000);
        assert_eq!(top.directory_index(), 0x3FF);
        assert_eq!(top.table_index(), 0x3FF);
    }

    #[test]
    fn test_alignment() {
        assert!(VirtAddr::new(0x1000).is_page_aligned());
        assert!(!VirtAddr::new(0x1001).is_page_aligned());
        assert_eq!(VirtAddr::new(0x1001).page_round_down(), VirtAddr::new(0x1000));
        assert_eq!(VirtAddr::new(0x1001).page_round_up(), VirtAddr::new(0x2000));
    }

    #[test]
    fn test_checked_add_stays_in_address_space() {
        assert_eq!(VirtAddr::new(0x1000).checked_add(0xFFF), Some(VirtAddr::new(0x1FFF)));
        assert_eq!(VirtAddr::new(0xFFFF_F000).checked_add(0xFFF), Some(VirtAddr::new(0xFFFF_FFFF)));
        assert_eq!(VirtAddr::new(0xFFFF_F000).checked_add(0x1000), None);
    }
}
