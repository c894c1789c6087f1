use core::cmp::Ordering;
use core::hash::{Hash, Hasher};
use core::ops::{Add, AddAssign};

use crate::error::StorageError;

use super::ByteString;

impl PartialEq for ByteString {
    #[inline]
    fn eq(&self, other: &ByteString) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ByteString {}

impl PartialOrd for ByteString {
    #[inline]
    fn partial_cmp(&self, other: &ByteString) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteString {
    /// Lexicographic byte order: a proper prefix orders first.
    #[inline]
    fn cmp(&self, other: &ByteString) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for ByteString {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

macro_rules! impl_eq {
    ($($rhs:ty),* $(,)?) => {$(
        impl PartialEq<$rhs> for ByteString {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                self.as_bytes() == AsRef::<[u8]>::as_ref(other)
            }
        }

        impl PartialEq<ByteString> for $rhs {
            #[inline]
            fn eq(&self, other: &ByteString) -> bool {
                AsRef::<[u8]>::as_ref(self) == other.as_bytes()
            }
        }
    )*};
}

impl_eq!([u8], &[u8], &mut [u8], str, &str);

impl<const N: usize> PartialEq<[u8; N]> for ByteString {
    #[inline]
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == &other[..]
    }
}

impl<const N: usize> PartialEq<&[u8; N]> for ByteString {
    #[inline]
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == &other[..]
    }
}

impl<const N: usize> PartialEq<ByteString> for [u8; N] {
    #[inline]
    fn eq(&self, other: &ByteString) -> bool {
        &self[..] == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<ByteString> for &[u8; N] {
    #[inline]
    fn eq(&self, other: &ByteString) -> bool {
        &self[..] == other.as_bytes()
    }
}

/// Allocate a new string holding `lhs` followed by `rhs`.
fn concat(lhs: &[u8], rhs: &[u8]) -> ByteString {
    let Some(len) = lhs.len().checked_add(rhs.len()) else {
        StorageError::CapacityLimit.panic();
    };
    let mut result = ByteString::with_capacity(len);
    result.extend_from_slice(lhs);
    result.extend_from_slice(rhs);
    result
}

impl Add<&ByteString> for &ByteString {
    type Output = ByteString;

    #[inline]
    fn add(self, rhs: &ByteString) -> ByteString {
        concat(self, rhs)
    }
}

impl Add<&[u8]> for &ByteString {
    type Output = ByteString;

    #[inline]
    fn add(self, rhs: &[u8]) -> ByteString {
        concat(self, rhs)
    }
}

impl Add<&str> for &ByteString {
    type Output = ByteString;

    #[inline]
    fn add(self, rhs: &str) -> ByteString {
        concat(self, rhs.as_bytes())
    }
}

impl Add<&ByteString> for &[u8] {
    type Output = ByteString;

    #[inline]
    fn add(self, rhs: &ByteString) -> ByteString {
        concat(self, rhs)
    }
}

impl Add<&ByteString> for &str {
    type Output = ByteString;

    #[inline]
    fn add(self, rhs: &ByteString) -> ByteString {
        concat(self.as_bytes(), rhs)
    }
}

// Consuming forms reuse the allocation of the left operand.

impl Add<&ByteString> for ByteString {
    type Output = ByteString;

    #[inline]
    fn add(mut self, rhs: &ByteString) -> ByteString {
        self.extend_from_slice(rhs);
        self
    }
}

impl Add<&[u8]> for ByteString {
    type Output = ByteString;

    #[inline]
    fn add(mut self, rhs: &[u8]) -> ByteString {
        self.extend_from_slice(rhs);
        self
    }
}

impl Add<&str> for ByteString {
    type Output = ByteString;

    #[inline]
    fn add(mut self, rhs: &str) -> ByteString {
        self.extend_from_slice(rhs.as_bytes());
        self
    }
}

impl AddAssign<&ByteString> for ByteString {
    #[inline]
    fn add_assign(&mut self, rhs: &ByteString) {
        self.extend_from_slice(rhs);
    }
}

impl AddAssign<&[u8]> for ByteString {
    #[inline]
    fn add_assign(&mut self, rhs: &[u8]) {
        self.extend_from_slice(rhs);
    }
}

impl AddAssign<&str> for ByteString {
    #[inline]
    fn add_assign(&mut self, rhs: &str) {
        self.extend_from_slice(rhs.as_bytes());
    }
}

impl AddAssign<u8> for ByteString {
    #[inline]
    fn add_assign(&mut self, rhs: u8) {
        self.push(rhs);
    }
}
