//! NOS Memory Management
//!
//! This crate implements the user-visible write-protection service over the
//! 32-bit two-level paging scheme: a page-table walker that finds the leaf
//! entry mapping an address, and a toggle that clears or sets the writable
//! bit across a range and then invalidates the translation cache.
//!
//! Hardware access is injected. A [`FrameMapper`] turns physical frames into
//! addressable tables and a [`TlbInvalidator`] flushes the translation cache,
//! so the same code runs against real page tables ([`DirectMap`],
//! [`Cr3Reload`]) or against a hosted [`FrameArena`](sim::FrameArena).

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod logging;

// Memory management modules
pub mod physical;
pub mod virtual_mem;
pub mod page_table;
pub mod layout;
pub mod walker;
pub mod tlb;
pub mod protection;
#[cfg(feature = "alloc")]
pub mod sim;

// Re-export commonly used types and functions
pub use physical::{PhysAddr, PAGE_SIZE, PAGE_SHIFT, page_round_up, page_round_down, addr_to_pfn, pfn_to_addr};
pub use virtual_mem::VirtAddr;
pub use page_table::{EntryFlags, FrameMapper, PageDirectory, PageDirectoryEntry, PageTable, PageTableEntry, ENTRIES_PER_TABLE};
pub use layout::{DirectMap, KERNEL_BASE, phys_to_virt, virt_to_phys};
pub use walker::PageTableWalker;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub use tlb::Cr3Reload;
pub use tlb::TlbInvalidator;
pub use protection::{ProtectionError, ProtectionToggle, WriteAccess};
