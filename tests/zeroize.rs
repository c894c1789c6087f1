#![cfg(feature = "zeroize")]

use core::slice;

use zeroize::{Zeroize, Zeroizing};

use flex_string::ByteString;

fn allocation(s: &ByteString) -> &[u8] {
    assert!(!s.as_ptr().is_null());
    unsafe { slice::from_raw_parts(s.as_ptr(), s.capacity() + 1) }
}

#[test]
fn string_zeroize() {
    let mut s = ByteString::from("secret");
    s.reserve_exact(10);
    s.extend_from_slice(b"tail");
    s.truncate(6);
    let capacity = s.capacity();
    s.zeroize();
    assert!(s.is_empty());
    assert_eq!(s.capacity(), capacity);
    assert!(allocation(&s).iter().all(|b| *b == 0));
}

#[test]
fn string_zeroize_empty() {
    let mut s = ByteString::new();
    s.zeroize();
    assert!(s.as_ptr().is_null());
    assert_eq!(s.capacity(), 0);
}

#[test]
fn string_zeroizing_wrapper() {
    let mut s = Zeroizing::new(ByteString::new());
    s.extend_from_slice(b"secret");
    assert_eq!(*s, "secret");
    let copy: ByteString = (*s).clone();
    drop(s);
    assert_eq!(copy, "secret");
}
