use core::ffi::CStr;

use super::ByteString;

impl Extend<u8> for ByteString {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (min_reserve, _) = iter.size_hint();
        self.reserve(min_reserve);
        for byte in iter {
            self.push(byte);
        }
    }
}

impl<'a> Extend<&'a u8> for ByteString {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl FromIterator<u8> for ByteString {
    #[inline]
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<'a> FromIterator<&'a u8> for ByteString {
    #[inline]
    fn from_iter<I: IntoIterator<Item = &'a u8>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl From<&[u8]> for ByteString {
    #[inline]
    fn from(data: &[u8]) -> Self {
        Self::from_slice(data)
    }
}

impl From<&mut [u8]> for ByteString {
    #[inline]
    fn from(data: &mut [u8]) -> Self {
        Self::from_slice(data)
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    #[inline]
    fn from(data: &[u8; N]) -> Self {
        Self::from_slice(data)
    }
}

impl<const N: usize> From<[u8; N]> for ByteString {
    #[inline]
    fn from(data: [u8; N]) -> Self {
        Self::from_slice(&data)
    }
}

impl From<&str> for ByteString {
    #[inline]
    fn from(data: &str) -> Self {
        Self::from_slice(data.as_bytes())
    }
}

impl From<&CStr> for ByteString {
    #[inline]
    fn from(data: &CStr) -> Self {
        Self::from_c_str(data)
    }
}

impl From<&alloc::string::String> for ByteString {
    #[inline]
    fn from(data: &alloc::string::String) -> Self {
        Self::from_slice(data.as_bytes())
    }
}

impl From<&alloc::vec::Vec<u8>> for ByteString {
    #[inline]
    fn from(data: &alloc::vec::Vec<u8>) -> Self {
        Self::from_slice(data)
    }
}

impl From<ByteString> for alloc::vec::Vec<u8> {
    #[inline]
    fn from(data: ByteString) -> Self {
        data.as_bytes().into()
    }
}
