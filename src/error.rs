//! Error handling.

use core::alloc::{Layout, LayoutError};
use core::fmt;

/// An enumeration of error types raised by string storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// A memory allocation failed.
    AllocError(Layout),
    /// The requested capacity cannot be represented.
    CapacityLimit,
    /// The provided layout was not allocatable.
    LayoutError(LayoutError),
}

impl StorageError {
    /// Generic description of this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllocError(_) => "Allocation error",
            Self::CapacityLimit => "Exceeded storage capacity limit",
            Self::LayoutError(_) => "Layout error",
        }
    }

    /// Generate a panic with this error as the reason.
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        if let Self::AllocError(layout) = self {
            handle_alloc_error(layout);
        } else {
            panic!("{}", self.as_str())
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LayoutError> for StorageError {
    fn from(err: LayoutError) -> Self {
        Self::LayoutError(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

#[cfg(not(test))]
use alloc::alloc::handle_alloc_error;

// `#[should_panic]` cannot observe the abort raised by the standard handler.
#[cfg(test)]
fn handle_alloc_error(layout: Layout) -> ! {
    panic!("memory allocation of {} bytes failed", layout.size());
}

/// An error raised by checked element access when the requested
/// position is not below the string length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRangeError {
    pub(crate) index: usize,
    pub(crate) length: usize,
}

impl OutOfRangeError {
    pub(crate) fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// Generic description of this error
    pub fn as_str(&self) -> &'static str {
        "Index out of range"
    }

    /// The position that was requested
    pub fn index(&self) -> usize {
        self.index
    }

    /// The length of the string at the time of the request
    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a panic with this error as the reason
    #[cold]
    #[inline(never)]
    pub fn panic(self) -> ! {
        panic!("{}", self);
    }
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{}: index {} for length {}",
            self.as_str(),
            self.index,
            self.length
        ))
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

#[cfg(test)]
mod tests {
    use super::{OutOfRangeError, StorageError};
    use core::alloc::Layout;

    #[test]
    #[should_panic(expected = "memory allocation of 8 bytes failed")]
    fn alloc_error_panic() {
        let a = StorageError::AllocError(Layout::new::<usize>());
        a.panic();
    }

    #[test]
    #[should_panic(expected = "Layout error")]
    fn layout_error_panic() {
        let err = Layout::from_size_align(0, 3).expect_err("expected layout error");
        let a = StorageError::LayoutError(err);
        a.panic();
    }

    #[test]
    #[should_panic(expected = "Exceeded storage capacity limit")]
    fn capacity_limit_panic() {
        StorageError::CapacityLimit.panic();
    }

    #[test]
    fn out_of_range_display() {
        let err = OutOfRangeError::new(7, 7);
        assert_eq!(err.index(), 7);
        assert_eq!(err.length(), 7);
        assert_eq!(format!("{}", err), "Index out of range: index 7 for length 7");
    }

    #[test]
    #[should_panic(expected = "index 3 for length 1")]
    fn out_of_range_panic() {
        OutOfRangeError::new(3, 1).panic();
    }
}
