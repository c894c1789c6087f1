use core::alloc::Layout;
use core::fmt;
#[cfg(feature = "zeroize")]
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use core::slice;

use alloc::alloc::{alloc as raw_alloc, dealloc as raw_dealloc};

use crate::error::StorageError;

use super::utils::str_layout;

pub(crate) trait RawAlloc: fmt::Debug {
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError>;

    /// Move an allocation into a new block described by `new_layout`.
    ///
    /// # Safety
    /// `ptr` must be a live allocation of this allocator made with `old_layout`.
    /// On failure the original allocation is left untouched.
    unsafe fn try_resize(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, StorageError> {
        // Default implementation simply allocates and copies over the contents.
        let new_ptr = self.try_alloc(new_layout)?;
        let cp_len = old_layout.size().min(new_ptr.len());
        if cp_len > 0 {
            ptr::copy_nonoverlapping(ptr.as_ptr(), new_ptr.as_ptr().cast(), cp_len);
        }
        self.release(ptr, old_layout);
        Ok(new_ptr)
    }

    /// # Safety
    /// `ptr` must be a live allocation of this allocator made with `layout`.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Global;

impl RawAlloc for Global {
    #[inline]
    fn try_alloc(&self, layout: Layout) -> Result<NonNull<[u8]>, StorageError> {
        let ptr = if layout.size() == 0 {
            // SAFETY: layout alignments are guaranteed to be non-zero.
            unsafe { NonNull::new_unchecked(layout.align() as *mut u8) }
        } else {
            let Some(ptr) = NonNull::new(unsafe { raw_alloc(layout) }) else {
                return Err(StorageError::AllocError(layout));
            };
            ptr
        };
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() > 0 {
            raw_dealloc(ptr.as_ptr(), layout);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct StrHeader {
    pub capacity: usize,
    pub length: usize,
}

impl StrHeader {
    pub const EMPTY: Self = StrHeader {
        capacity: 0,
        length: 0,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }
}

/// The owner of a single string allocation.
///
/// A non-empty handle holds `capacity + 1` bytes, and the byte following
/// the logical content is always zero. An empty handle holds no allocation.
#[derive(Debug)]
pub(crate) struct RawHandle<A: RawAlloc = Global> {
    header: StrHeader,
    data: NonNull<u8>,
    alloc: A,
}

impl RawHandle<Global> {
    pub const NEW: Self = Self::dangling(Global);
}

impl<A: RawAlloc> RawHandle<A> {
    #[inline]
    pub const fn dangling(alloc: A) -> Self {
        Self {
            header: StrHeader::EMPTY,
            data: NonNull::dangling(),
            alloc,
        }
    }

    pub fn alloc_in(alloc: A, capacity: usize, exact: bool) -> Result<Self, StorageError> {
        if capacity == 0 {
            return Ok(Self::dangling(alloc));
        }
        let layout = str_layout(capacity)?;
        let ptr = alloc.try_alloc(layout)?;
        let mut header = StrHeader {
            capacity,
            length: 0,
        };
        if !exact && ptr.len() > layout.size() {
            header.capacity = ptr.len() - 1;
        }
        let data: NonNull<u8> = ptr.cast();
        unsafe { data.as_ptr().write(0) };
        Ok(Self {
            header,
            data,
            alloc,
        })
    }

    #[inline]
    pub fn spawn(&self, capacity: usize, exact: bool) -> Result<Self, StorageError>
    where
        A: Clone,
    {
        Self::alloc_in(self.alloc.clone(), capacity, exact)
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.header.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.header.capacity
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.header.length
    }

    /// # Safety
    /// `len` must not exceed the capacity and the bytes up to `len` must be
    /// initialized. Setting a length on an empty handle is a no-op.
    #[inline]
    pub unsafe fn set_length(&mut self, len: usize) {
        debug_assert!(len <= self.header.capacity);
        if self.is_allocated() {
            self.header.length = len;
            self.data.as_ptr().add(len).write(0);
        }
    }

    #[inline]
    pub fn data_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    #[inline]
    pub fn data_ptr_mut(&mut self) -> *mut u8 {
        self.data.as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.data_ptr(), self.header.length) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        unsafe { slice::from_raw_parts_mut(self.data_ptr_mut(), self.header.length) }
    }

    /// The logical content followed by its terminator.
    #[inline]
    pub fn as_slice_with_nul(&self) -> Option<&[u8]> {
        if self.is_allocated() {
            Some(unsafe { slice::from_raw_parts(self.data_ptr(), self.header.length + 1) })
        } else {
            None
        }
    }

    /// The whole allocation, including spare capacity and the terminator.
    #[cfg(feature = "zeroize")]
    #[inline]
    pub fn as_uninit_allocation(&mut self) -> &mut [MaybeUninit<u8>] {
        let size = if self.is_allocated() {
            self.header.capacity + 1
        } else {
            0
        };
        unsafe { slice::from_raw_parts_mut(self.data_ptr_mut().cast(), size) }
    }

    /// Move the contents into an allocation of `capacity` bytes, releasing the
    /// allocation entirely when `capacity` is zero. The content length must not
    /// exceed `capacity`. On failure the handle is unchanged.
    pub fn resize(&mut self, capacity: usize, exact: bool) -> Result<(), StorageError> {
        let length = self.header.length;
        debug_assert!(length <= capacity);
        if capacity == 0 {
            if self.is_allocated() {
                let layout = str_layout(self.header.capacity)?;
                unsafe { self.alloc.release(self.data, layout) };
                self.data = NonNull::dangling();
            }
            self.header = StrHeader::EMPTY;
            return Ok(());
        }
        let new_layout = str_layout(capacity)?;
        let ptr = if self.is_allocated() {
            let old_layout = str_layout(self.header.capacity)?;
            unsafe { self.alloc.try_resize(self.data, old_layout, new_layout) }?
        } else {
            self.alloc.try_alloc(new_layout)?
        };
        let mut header = StrHeader {
            capacity,
            length: length.min(capacity),
        };
        if !exact && ptr.len() > new_layout.size() {
            header.capacity = ptr.len() - 1;
        }
        self.data = ptr.cast();
        self.header = header;
        unsafe { self.data.as_ptr().add(header.length).write(0) };
        Ok(())
    }
}

impl<A: RawAlloc> Drop for RawHandle<A> {
    fn drop(&mut self) {
        if self.is_allocated() {
            let layout = str_layout(self.header.capacity).expect("error calculating layout");
            unsafe {
                self.alloc.release(self.data, layout);
            }
        }
    }
}
