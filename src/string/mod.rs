//! A growable, owned byte string.

use core::borrow::{Borrow, BorrowMut};
use core::cmp::Ordering;
use core::ffi::{c_char, CStr};
use core::ops::{Bound, Deref, DerefMut, Range, RangeBounds};
use core::ptr;
use core::slice;

use const_default::ConstDefault;

use crate::capacity::{Grow, GrowDoubling, GrowExact};
use crate::error::{OutOfRangeError, StorageError};
use crate::storage::{Global, RawHandle};

#[cfg(feature = "std")]
pub use self::io::{tokens, Tokens};

#[macro_use]
mod macros;

mod convert;
mod format;
#[cfg(feature = "std")]
mod io;
mod ops;

#[cold]
#[inline(never)]
pub(super) fn index_panic() -> ! {
    panic!("Invalid element index");
}

#[inline]
fn bounds_to_range(range: impl RangeBounds<usize>, length: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(i) => *i,
        Bound::Excluded(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => length,
        Bound::Included(i) => i.checked_add(1).unwrap_or_else(|| index_panic()),
        Bound::Excluded(i) => *i,
    };
    Range { start, end }
}

/// A growable, owned sequence of bytes with string value semantics.
///
/// An empty `ByteString` holds no allocation. A non-empty allocation always
/// reserves one byte past the capacity, so the content is kept terminated by
/// a zero byte and may be handed to C code without copying.
#[repr(transparent)]
pub struct ByteString {
    buffer: RawHandle,
}

impl ByteString {
    /// Constructs a new, empty `ByteString`.
    ///
    /// The string will not allocate until bytes are pushed onto it.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_string::ByteString;
    ///
    /// let s = ByteString::new();
    /// assert_eq!(s.capacity(), 0);
    /// assert!(s.as_ptr().is_null());
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: RawHandle::NEW,
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, StorageError> {
        let buffer = RawHandle::alloc_in(Global, capacity, false)?;
        Ok(Self { buffer })
    }

    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    /// Create a `ByteString` holding `count` copies of `byte`.
    pub fn from_elem(byte: u8, count: usize) -> Self {
        match Self::try_from_elem(byte, count) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_elem(byte: u8, count: usize) -> Result<Self, StorageError> {
        let mut s = Self::try_with_capacity(count)?;
        if count > 0 {
            unsafe {
                ptr::write_bytes(s.buffer.data_ptr_mut(), byte, count);
                s.buffer.set_length(count);
            }
        }
        Ok(s)
    }

    /// Copy a byte slice into a new `ByteString` with an exact capacity.
    pub fn from_slice(data: &[u8]) -> Self {
        match Self::try_from_slice(data) {
            Ok(res) => res,
            Err(error) => error.panic(),
        }
    }

    pub fn try_from_slice(data: &[u8]) -> Result<Self, StorageError> {
        let mut s = Self::try_with_capacity(data.len())?;
        unsafe { s.extend_unchecked(data) };
        Ok(s)
    }

    /// Copy `len` bytes starting at `data` into a new `ByteString`.
    ///
    /// # Safety
    /// Unless `len` is zero, `data` must be valid for reads of `len` bytes.
    pub unsafe fn from_raw_parts(data: *const u8, len: usize) -> Self {
        if len == 0 {
            Self::new()
        } else {
            Self::from_slice(slice::from_raw_parts(data, len))
        }
    }

    /// Copy the bytes of a C string, excluding its terminator.
    pub fn from_c_str(data: &CStr) -> Self {
        Self::from_slice(data.to_bytes())
    }

    /// Copy the bytes of a null-terminated C string, excluding its terminator.
    ///
    /// # Safety
    /// `data` must satisfy the requirements of [`CStr::from_ptr`].
    pub unsafe fn from_c_ptr(data: *const c_char) -> Self {
        Self::from_c_str(CStr::from_ptr(data))
    }
}

impl ByteString {
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.length()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Access the start of the storage, or a null pointer when no
    /// allocation is held.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        if self.buffer.is_allocated() {
            self.buffer.data_ptr()
        } else {
            ptr::null()
        }
    }

    /// Mutably access the start of the storage, or a null pointer when no
    /// allocation is held.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        if self.buffer.is_allocated() {
            self.buffer.data_ptr_mut()
        } else {
            ptr::null_mut()
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// The content followed by a zero byte.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.buffer.as_slice_with_nul().unwrap_or(b"\0")
    }

    /// A pointer to the null-terminated content, valid while the string is
    /// not modified.
    #[inline]
    pub fn as_c_ptr(&self) -> *const c_char {
        self.as_bytes_with_nul().as_ptr().cast()
    }

    /// View the content as a C string. The view ends at the first zero byte
    /// if the content contains one.
    pub fn as_c_str(&self) -> &CStr {
        match CStr::from_bytes_until_nul(self.as_bytes_with_nul()) {
            Ok(s) => s,
            Err(_) => unreachable!("string storage is always terminated"),
        }
    }

    /// Checked access to the byte at `index`.
    pub fn at(&self, index: usize) -> Result<&u8, OutOfRangeError> {
        let length = self.len();
        self.as_bytes()
            .get(index)
            .ok_or(OutOfRangeError::new(index, length))
    }

    /// Checked mutable access to the byte at `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut u8, OutOfRangeError> {
        let length = self.len();
        self.as_mut_bytes()
            .get_mut(index)
            .ok_or(OutOfRangeError::new(index, length))
    }

    /// The first byte.
    ///
    /// # Panics
    /// Panics if the string is empty.
    #[inline]
    pub fn front(&self) -> &u8 {
        match self.as_bytes().first() {
            Some(byte) => byte,
            None => index_panic(),
        }
    }

    #[inline]
    pub fn front_mut(&mut self) -> &mut u8 {
        match self.as_mut_bytes().first_mut() {
            Some(byte) => byte,
            None => index_panic(),
        }
    }

    /// The last byte.
    ///
    /// # Panics
    /// Panics if the string is empty.
    #[inline]
    pub fn back(&self) -> &u8 {
        match self.as_bytes().last() {
            Some(byte) => byte,
            None => index_panic(),
        }
    }

    #[inline]
    pub fn back_mut(&mut self) -> &mut u8 {
        match self.as_mut_bytes().last_mut() {
            Some(byte) => byte,
            None => index_panic(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Shorten the string to `length` bytes, keeping the capacity. Has no
    /// effect if the string is already shorter.
    pub fn truncate(&mut self, length: usize) {
        if length < self.len() {
            unsafe { self.buffer.set_length(length) };
        }
    }

    /// Reserve capacity for at least `reserve` more bytes. The allocation
    /// grows geometrically, so repeated appends run in amortized constant time.
    ///
    /// To reserve for a total of `n` bytes instead, pass
    /// `n.saturating_sub(s.len())`. This does nothing when `n` is within the
    /// current capacity.
    ///
    /// ```
    /// use flex_string::ByteString;
    ///
    /// let mut s = ByteString::from("abacaba");
    /// s.reserve(20usize.saturating_sub(s.len()));
    /// assert!(s.capacity() >= 20);
    /// let capacity = s.capacity();
    /// s.reserve(5usize.saturating_sub(s.len()));
    /// assert_eq!(s.capacity(), capacity);
    /// ```
    #[inline]
    pub fn reserve(&mut self, reserve: usize) {
        match self.try_reserve(reserve) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve(&mut self, reserve: usize) -> Result<(), StorageError> {
        self._try_reserve::<GrowDoubling>(reserve)
    }

    /// Reserve capacity for exactly `reserve` more bytes, if the current
    /// capacity is insufficient.
    #[inline]
    pub fn reserve_exact(&mut self, reserve: usize) {
        match self.try_reserve_exact(reserve) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    #[inline]
    pub fn try_reserve_exact(&mut self, reserve: usize) -> Result<(), StorageError> {
        self._try_reserve::<GrowExact>(reserve)
    }

    fn _try_reserve<G: Grow>(&mut self, reserve: usize) -> Result<(), StorageError> {
        let buf_cap = self.buffer.capacity();
        let Some(buf_needed) = self.buffer.length().checked_add(reserve) else {
            return Err(StorageError::CapacityLimit);
        };
        if buf_cap >= buf_needed {
            return Ok(());
        }
        let capacity = G::next_capacity(buf_cap, buf_needed);
        self.buffer.resize(capacity, false)
    }

    #[inline]
    pub fn shrink_to(&mut self, min_capacity: usize) {
        match self.try_shrink_to(min_capacity) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    /// Reduce the capacity to the larger of the length and `min_capacity`.
    /// The allocation is released when both are zero.
    pub fn try_shrink_to(&mut self, min_capacity: usize) -> Result<(), StorageError> {
        let capacity = self.buffer.length().max(min_capacity);
        if self.buffer.capacity() > capacity {
            self.buffer.resize(capacity, true)?;
        }
        Ok(())
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        match self.try_shrink_to_fit() {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    #[inline]
    pub fn try_shrink_to_fit(&mut self) -> Result<(), StorageError> {
        self.try_shrink_to(0)
    }

    pub fn push(&mut self, byte: u8) {
        match self.try_push(byte) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_push(&mut self, byte: u8) -> Result<(), StorageError> {
        self._try_reserve::<GrowDoubling>(1)?;
        unsafe {
            self.push_unchecked(byte);
        }
        Ok(())
    }

    /// # Safety
    /// The capacity must exceed the current length.
    #[inline]
    unsafe fn push_unchecked(&mut self, byte: u8) {
        let length = self.buffer.length();
        self.buffer.data_ptr_mut().add(length).write(byte);
        self.buffer.set_length(length + 1);
    }

    /// Remove the last byte and return it, or `None` if the string is empty.
    pub fn pop(&mut self) -> Option<u8> {
        let length = self.buffer.length();
        if length > 0 {
            let byte = self.as_bytes()[length - 1];
            unsafe { self.buffer.set_length(length - 1) };
            Some(byte)
        } else {
            None
        }
    }

    pub fn extend_from_slice(&mut self, items: &[u8]) {
        match self.try_extend_from_slice(items) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[u8]) -> Result<(), StorageError> {
        self._try_reserve::<GrowDoubling>(items.len())?;
        unsafe {
            self.extend_unchecked(items);
        }
        Ok(())
    }

    /// # Safety
    /// The spare capacity must hold at least `items.len()` bytes.
    unsafe fn extend_unchecked(&mut self, items: &[u8]) {
        if items.is_empty() {
            return;
        }
        let length = self.buffer.length();
        ptr::copy_nonoverlapping(
            items.as_ptr(),
            self.buffer.data_ptr_mut().add(length),
            items.len(),
        );
        self.buffer.set_length(length + items.len());
    }

    /// Append a copy of the bytes in `src` to the end of the string. The whole
    /// string may be appended to itself with `s.extend_from_within(..)`.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn extend_from_within<R>(&mut self, src: R)
    where
        R: RangeBounds<usize>,
    {
        match self.try_extend_from_within(src) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    pub fn try_extend_from_within<R>(&mut self, src: R) -> Result<(), StorageError>
    where
        R: RangeBounds<usize>,
    {
        let length = self.buffer.length();
        let Range { start, end } = bounds_to_range(src, length);
        if start > end || end > length {
            index_panic();
        }
        let count = end - start;
        if count == 0 {
            return Ok(());
        }
        // the source is read only after any reallocation
        self._try_reserve::<GrowDoubling>(count)?;
        unsafe {
            let data = self.buffer.data_ptr_mut();
            ptr::copy_nonoverlapping(data.add(start), data.add(length), count);
            self.buffer.set_length(length + count);
        }
        Ok(())
    }

    /// Move all bytes of `other` onto the end of this string, leaving
    /// `other` empty.
    pub fn append(&mut self, other: &mut Self) {
        if self.is_empty() {
            core::mem::swap(&mut self.buffer, &mut other.buffer);
        } else if !other.is_empty() {
            self.extend_from_slice(other);
            other.clear();
        }
    }

    pub fn insert(&mut self, index: usize, byte: u8) {
        self.insert_slice(index, &[byte])
    }

    pub fn try_insert(&mut self, index: usize, byte: u8) -> Result<(), StorageError> {
        self.try_insert_slice(index, &[byte])
    }

    pub fn insert_slice(&mut self, index: usize, values: &[u8]) {
        match self.try_insert_slice(index, values) {
            Ok(_) => (),
            Err(error) => error.panic(),
        }
    }

    /// Insert `values` before the byte at `index`.
    ///
    /// # Panics
    /// Panics if `index` is greater than the length.
    pub fn try_insert_slice(&mut self, index: usize, values: &[u8]) -> Result<(), StorageError> {
        let prev_len = self.buffer.length();
        if index > prev_len {
            index_panic();
        }
        let ins_count = values.len();
        if ins_count == 0 {
            return Ok(());
        }
        self._try_reserve::<GrowDoubling>(ins_count)?;
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            let tail_count = prev_len - index;
            if tail_count > 0 {
                ptr::copy(head, head.add(ins_count), tail_count);
            }
            ptr::copy_nonoverlapping(values.as_ptr(), head, ins_count);
            self.buffer.set_length(prev_len + ins_count);
        }
        Ok(())
    }

    /// Remove and return the byte at `index`, shifting the remainder down.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> u8 {
        let len = self.buffer.length();
        if index >= len {
            index_panic();
        }
        unsafe {
            let head = self.buffer.data_ptr_mut().add(index);
            let result = head.read();
            let copy_count = len - index - 1;
            if copy_count > 0 {
                ptr::copy(head.add(1), head, copy_count);
            }
            self.buffer.set_length(len - 1);
            result
        }
    }

    /// Keep only the bytes accepted by `f`, preserving their order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(u8) -> bool,
    {
        let data = self.as_mut_bytes();
        let mut kept = 0;
        for idx in 0..data.len() {
            let byte = data[idx];
            if f(byte) {
                data[kept] = byte;
                kept += 1;
            }
        }
        self.truncate(kept);
    }

    pub fn resize(&mut self, new_len: usize, value: u8) {
        match self.try_resize(new_len, value) {
            Ok(_) => (),
            Err(err) => err.panic(),
        }
    }

    /// Truncate to `new_len`, or extend with copies of `value` up to `new_len`.
    pub fn try_resize(&mut self, new_len: usize, value: u8) -> Result<(), StorageError> {
        let len = self.buffer.length();
        match new_len.cmp(&len) {
            Ordering::Greater => {
                let ins_count = new_len - len;
                self._try_reserve::<GrowDoubling>(ins_count)?;
                unsafe {
                    ptr::write_bytes(self.buffer.data_ptr_mut().add(len), value, ins_count);
                    self.buffer.set_length(new_len);
                }
            }
            Ordering::Less => {
                self.truncate(new_len);
            }
            Ordering::Equal => {}
        }
        Ok(())
    }

    /// Split the string in two at `at`, returning the bytes from `at` onward.
    /// The capacity of `self` is unchanged.
    ///
    /// # Panics
    /// Panics if `at` is greater than the length.
    pub fn split_off(&mut self, at: usize) -> Self {
        match self.try_split_off(at) {
            Ok(res) => res,
            Err(err) => err.panic(),
        }
    }

    pub fn try_split_off(&mut self, at: usize) -> Result<Self, StorageError> {
        let Some(tail) = self.as_bytes().get(at..) else {
            index_panic();
        };
        let other = Self::try_from_slice(tail)?;
        self.truncate(at);
        Ok(other)
    }

    /// Create an independent copy with a capacity equal to the length.
    pub fn try_clone(&self) -> Result<Self, StorageError> {
        let mut inst = Self {
            buffer: self.buffer.spawn(self.len(), true)?,
        };
        unsafe { inst.extend_unchecked(self) };
        Ok(inst)
    }

    /// Replace the content with a copy of `source`.
    ///
    /// The current allocation is reused when it can hold `source`, keeping its
    /// capacity. Otherwise a new allocation is made before the old one is
    /// released, so a failure leaves the string unchanged.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), StorageError> {
        if self.capacity() >= source.len() {
            self.clear();
            unsafe { self.extend_unchecked(source) };
        } else {
            *self = source.try_clone()?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for ByteString {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsMut<[u8]> for ByteString {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_bytes()
    }
}

impl Borrow<[u8]> for ByteString {
    #[inline]
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl BorrowMut<[u8]> for ByteString {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [u8] {
        self.as_mut_bytes()
    }
}

impl Clone for ByteString {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(res) => res,
            Err(err) => err.panic(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            err.panic();
        }
    }
}

impl ConstDefault for ByteString {
    const DEFAULT: Self = Self::new();
}

impl Default for ByteString {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ByteString {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl DerefMut for ByteString {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_bytes()
    }
}

impl<'a> IntoIterator for &'a ByteString {
    type Item = &'a u8;
    type IntoIter = slice::Iter<'a, u8>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_bytes().iter()
    }
}

impl<'a> IntoIterator for &'a mut ByteString {
    type Item = &'a mut u8;
    type IntoIter = slice::IterMut<'a, u8>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_bytes().iter_mut()
    }
}

// The handle uniquely owns plain bytes.
unsafe impl Send for ByteString {}

unsafe impl Sync for ByteString {}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for ByteString {
    /// Overwrite the whole allocation with zeroes, including spare capacity,
    /// and set the length to zero. The allocation is kept.
    fn zeroize(&mut self) {
        self.buffer.as_uninit_allocation().zeroize();
        unsafe { self.buffer.set_length(0) };
    }
}

/// ```compile_fail,E0502
/// use flex_string::ByteString;
///
/// let mut s = ByteString::from_slice(b"aba");
/// s += &s;
/// ```
#[cfg(doctest)]
fn _self_append_check() {}
