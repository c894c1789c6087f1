use core::alloc::Layout;

use crate::error::StorageError;

/// Capacity of the first allocation made when growing an empty string.
pub(crate) const MIN_NON_ZERO_CAP: usize = 8;

/// The largest capacity whose allocation (including the terminator) has a valid layout.
pub(crate) const MAX_CAPACITY: usize = isize::MAX as usize - 1;

/// Layout of a string allocation: `capacity` bytes plus the terminator.
#[inline]
pub(crate) fn str_layout(capacity: usize) -> Result<Layout, StorageError> {
    let Some(size) = capacity.checked_add(1) else {
        return Err(StorageError::CapacityLimit);
    };
    Layout::array::<u8>(size).map_err(StorageError::LayoutError)
}
