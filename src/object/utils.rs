//! Alignment helpers for the 4-byte record layout.

/// Alignment of record start addresses and of padded payload sizes.
pub const ALIGNMENT: u32 = 4;

/// Align a value up to the specified power-of-two alignment
#[inline(always)]
pub fn align_up(value: u32, alignment: u32) -> u32 {
    if alignment == 0 || alignment == 1 {
        value
    } else {
        value.saturating_add(alignment - 1) & !(alignment - 1)
    }
}

/// Round a byte count up to the next multiple of 4.
#[inline(always)]
pub fn align4(value: u32) -> u32 {
    align_up(value, ALIGNMENT)
}

/// Same as [`align4`] for host-side sizes.
#[inline(always)]
pub fn align4_usize(value: usize) -> usize {
    (value + 3) & !3
}

#[inline(always)]
pub fn is_aligned(addr: u32) -> bool {
    addr % ALIGNMENT == 0
}

/// Whether values of `width` bytes may be placed in element arrays.
///
/// Byte and half-word accesses have their own paths; everything else must be
/// readable as whole 32-bit words.
pub const fn is_permitted_width(width: usize) -> bool {
    width == 1 || width == 2 || (width != 0 && width % 4 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 4), 0);
        assert_eq!(align_up(1, 4), 4);
        assert_eq!(align_up(4, 4), 4);
        assert_eq!(align_up(5, 4), 8);
        assert_eq!(align_up(0x1234, 0x1000), 0x2000);
        assert_eq!(align_up(0x1234, 0), 0x1234);
    }

    #[test]
    fn test_align4() {
        for len in 0..64u32 {
            let size = align4(len);
            assert_eq!(size % 4, 0);
            assert!(size >= len && size - len < 4);
            assert_eq!(align4_usize(len as usize), size as usize);
        }
    }

    #[test]
    fn test_permitted_widths() {
        assert!(is_permitted_width(1));
        assert!(is_permitted_width(2));
        assert!(is_permitted_width(4));
        assert!(is_permitted_width(12));
        assert!(!is_permitted_width(0));
        assert!(!is_permitted_width(3));
        assert!(!is_permitted_width(6));
    }

    #[test]
    fn test_is_aligned() {
        assert!(is_aligned(0x4020_0000));
        assert!(!is_aligned(0x4020_0002));
    }
}
