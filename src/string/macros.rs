/// Create a [`ByteString`](crate::ByteString) from a list of bytes, or from
/// a byte and a repeat count.
///
/// ```
/// use flex_string::bytestring;
///
/// assert_eq!(bytestring![b'a', b'b'], "ab");
/// assert_eq!(bytestring![b'z'; 3], "zzz");
/// assert!(bytestring![].is_empty());
/// ```
#[macro_export]
macro_rules! bytestring {
    () => (
        $crate::ByteString::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::ByteString::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::ByteString::from_slice(&[$($x),+])
    );
}
