//! Common system call utilities
//!
//! Raw arguments arrive as machine words. Every argument of the calls
//! handled here is a 32-bit C `int`, so decoding truncates the word and
//! reinterprets it as signed.

use nos_api::{Error, Result};
use nos_memory_management::VirtAddr;

/// Fetch the `n`th argument as a 32-bit signed integer
pub fn arg_int(args: &[usize], n: usize) -> Result<i32> {
    match args.get(n) {
        Some(&raw) => Ok(raw as u32 as i32),
        None => {
            sys_trace!("argument {} missing ({} supplied)", n, args.len());
            Err(Error::InvalidArgument("missing system call argument"))
        }
    }
}

/// Fetch the `n`th argument as a user virtual address
pub fn arg_addr(args: &[usize], n: usize) -> Result<VirtAddr> {
    arg_int(args, n).map(|value| VirtAddr::new(value as u32 as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_int() {
        assert_eq!(arg_int(&[5, 7], 1), Ok(7));
        assert_eq!(arg_int(&[0xFFFF_FFFF], 0), Ok(-1));
        assert!(arg_int(&[5], 1).is_err());
    }

    #[test]
    fn test_arg_addr_keeps_high_half() {
        assert_eq!(arg_addr(&[0x8000_1000], 0), Ok(VirtAddr::new(0x8000_1000)));
    }
}
