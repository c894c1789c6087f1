//! Growable byte strings
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(test)]
#[macro_use]
extern crate std;

extern crate alloc;

pub(crate) mod error;

pub(crate) mod capacity;

pub(crate) mod storage;

pub mod string;

pub use self::{
    error::{OutOfRangeError, StorageError},
    string::ByteString,
};
