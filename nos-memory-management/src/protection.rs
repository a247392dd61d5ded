//! User-requested write protection
//!
//! [`ProtectionToggle`] clears or sets the writable bit of every page in a
//! range and then flushes the translation cache once.
//!
//! # Partial failure
//!
//! A request is **not** atomic. Pages are edited in ascending order as they
//! are reached; when a page turns out to be unmapped the request stops there
//! and reports [`ProtectionError::UnmappedPage`], but every page before it
//! keeps its new permission. The translation cache is only flushed after a
//! fully successful request, so after a failure the hardware may keep
//! serving the old permission for those earlier pages until the next flush.
//! Callers that need all-or-nothing must check the range first or undo the
//! prefix themselves.

use core::fmt;

use crate::page_table::FrameMapper;
use crate::physical::{PhysAddr, PAGE_SIZE};
use crate::tlb::TlbInvalidator;
use crate::virtual_mem::VirtAddr;
use crate::walker::PageTableWalker;

/// Direction of a protection change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAccess {
    /// Clear the writable bit
    ReadOnly,
    /// Set the writable bit
    Writable,
}

/// Why a protection request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionError {
    /// Base address is not page-aligned
    InvalidAlignment(VirtAddr),
    /// Length is not positive, or the range runs past the address space
    InvalidLength(isize),
    /// A page in the range has no present leaf entry
    UnmappedPage(VirtAddr),
}

impl fmt::Display for ProtectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtectionError::InvalidAlignment(va) => write!(f, "misaligned address {:#x}", va.as_usize()),
            ProtectionError::InvalidLength(len) => write!(f, "invalid length {}", len),
            ProtectionError::UnmappedPage(va) => write!(f, "unmapped page {:#x}", va.as_usize()),
        }
    }
}

impl From<ProtectionError> for nos_api::Error {
    fn from(err: ProtectionError) -> Self {
        match err {
            ProtectionError::InvalidAlignment(_) => nos_api::Error::InvalidArgument("misaligned address"),
            ProtectionError::InvalidLength(_) => nos_api::Error::InvalidArgument("invalid length"),
            ProtectionError::UnmappedPage(va) => nos_api::Error::BadAddress(va.as_usize()),
        }
    }
}

/// Flips the writable bit across page ranges of one address space at a time
///
/// Performs no locking; callers serialize requests against the same
/// address space.
pub struct ProtectionToggle<M, F> {
    walker: PageTableWalker<M>,
    tlb: F,
}

impl<M: FrameMapper, F: TlbInvalidator> ProtectionToggle<M, F> {
    /// Create a toggle reading tables through `mapper` and flushing through `tlb`
    pub const fn new(mapper: M, tlb: F) -> Self {
        Self {
            walker: PageTableWalker::new(mapper),
            tlb,
        }
    }

    /// Make `[base, base + length)` read-only
    pub fn restrict_write(&mut self, root: PhysAddr, base: VirtAddr, length: isize) -> Result<(), ProtectionError> {
        self.set_range(root, base, length, WriteAccess::ReadOnly)
    }

    /// Make `[base, base + length)` writable again
    pub fn restore_write(&mut self, root: PhysAddr, base: VirtAddr, length: isize) -> Result<(), ProtectionError> {
        self.set_range(root, base, length, WriteAccess::Writable)
    }

    /// Apply `access` to every page overlapping `[base, base + length)`
    ///
    /// `root` is the physical address of the page directory. See the
    /// [module documentation](self) for what a failure leaves behind.
    pub fn set_range(
        &mut self,
        root: PhysAddr,
        base: VirtAddr,
        length: isize,
        access: WriteAccess,
    ) -> Result<(), ProtectionError> {
        if !base.is_page_aligned() {
            mm_warn!("set_range: misaligned base {:#x}", base.as_usize());
            return Err(ProtectionError::InvalidAlignment(base));
        }
        if length <= 0 {
            mm_warn!("set_range: invalid length {}", length);
            return Err(ProtectionError::InvalidLength(length));
        }
        let last = base
            .checked_add(length as usize - 1)
            .ok_or(ProtectionError::InvalidLength(length))?
            .page_round_down();

        let writable = access == WriteAccess::Writable;
        let mut page = base;
        loop {
            let pte = match self.walker.locate(root, page) {
                Some(pte) if pte.is_present() => pte,
                _ => {
                    mm_warn!(
                        "set_range: page {:#x} not mapped, {} page(s) before it already {:?}",
                        page.as_usize(),
                        (page.as_usize() - base.as_usize()) / PAGE_SIZE,
                        access
                    );
                    return Err(ProtectionError::UnmappedPage(page));
                }
            };
            pte.set_writable(writable);
            if page == last {
                break;
            }
            page = VirtAddr::new(page.as_usize() + PAGE_SIZE);
        }

        self.tlb.flush_address_space(root);
        mm_debug!(
            "set_range: {} page(s) at {:#x} now {:?}",
            (last.as_usize() - base.as_usize()) / PAGE_SIZE + 1,
            base.as_usize(),
            access
        );
        Ok(())
    }

    /// Borrow the page table walker
    pub fn walker_mut(&mut self) -> &mut PageTableWalker<M> {
        &mut self.walker
    }

    /// Borrow the frame mapper
    pub fn mapper_mut(&mut self) -> &mut M {
        self.walker.mapper_mut()
    }

    /// Borrow the translation cache invalidator
    pub fn invalidator(&self) -> &F {
        &self.tlb
    }
}
