//! Two-phase "size first" output protocol.

/// Outcome of copying a value into a caller-supplied buffer.
///
/// A too-short buffer is left untouched and the exact number of bytes the
/// value needs is reported, so callers can size a buffer and retry.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// The value was written; holds the exact number of bytes used.
    Written(usize),
    /// The buffer was too short; holds the exact capacity required.
    NeedsCapacity(usize),
}

impl Fill {
    /// Copy `src` into the front of `out` if it fits.
    pub fn copy(src: &[u8], out: &mut [u8]) -> Self {
        match out.get_mut(..src.len()) {
            Some(dst) => {
                dst.copy_from_slice(src);
                Fill::Written(src.len())
            }
            None => Fill::NeedsCapacity(src.len()),
        }
    }

    /// The byte count carried by either variant.
    pub fn len(self) -> usize {
        match self {
            Fill::Written(n) | Fill::NeedsCapacity(n) => n,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_fits() {
        let mut buf = [0u8; 8];
        assert_eq!(Fill::copy(b"abc", &mut buf), Fill::Written(3));
        assert_eq!(&buf[..3], b"abc");
    }

    #[test]
    fn test_copy_too_short_leaves_buffer() {
        let mut buf = [0xAAu8; 2];
        assert_eq!(Fill::copy(b"abc", &mut buf), Fill::NeedsCapacity(3));
        assert_eq!(buf, [0xAA, 0xAA]);
    }

    #[test]
    fn test_zero_capacity_then_exact() {
        let value = b"hello world";
        let needed = match Fill::copy(value, &mut []) {
            Fill::NeedsCapacity(n) => n,
            Fill::Written(_) => panic!("empty buffer cannot hold data"),
        };
        let mut buf = vec![0u8; needed];
        assert_eq!(Fill::copy(value, &mut buf), Fill::Written(needed));
        assert_eq!(&buf, value);
    }

    #[test]
    fn test_empty_value_always_fits() {
        assert_eq!(Fill::copy(b"", &mut []), Fill::Written(0));
        assert!(Fill::Written(0).is_empty());
    }
}
