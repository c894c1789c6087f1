#![cfg(feature = "std")]

use std::io::{self, BufRead, BufReader, Cursor, Read, Write};

use rstest::rstest;

use flex_string::{string::tokens, ByteString};

#[test]
fn output_write_to() {
    let mut out = Vec::new();
    ByteString::from("abacaba").write_to(&mut out).expect("write");
    out.push(b' ');
    ByteString::new().write_to(&mut out).expect("write");
    out.push(b' ');
    ByteString::from_elem(b'a', 5).write_to(&mut out).expect("write");
    assert_eq!(out, b"abacaba  aaaaa");
}

#[test]
fn output_display() {
    let out = format!(
        "{} {} {}",
        ByteString::from("abacaba"),
        ByteString::new(),
        ByteString::from_elem(b'a', 5)
    );
    assert_eq!(out, "abacaba  aaaaa");
}

#[test]
fn output_io_write() {
    let mut s = ByteString::from("ab");
    write!(s, "a{}a", 'c').expect("write");
    s.write_all(b"ba").expect("write");
    s.flush().expect("flush");
    assert_eq!(s, "abacaba");
}

#[rstest]
#[case::bare("abacaba", "abacaba")]
#[case::trailing("abacaba\t \n", "abacaba")]
#[case::leading("\r\n\tabacaba", "abacaba")]
#[case::vertical_tab("\x0b\x0cabacaba\x0baba", "abacaba")]
fn input_single(#[case] input: &str, #[case] expected: &str) {
    let mut reader = input.as_bytes();
    let mut s = ByteString::from("caba");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, expected);
}

#[test]
fn input_sequence() {
    let mut reader = &b" \t  \nabacaba\t\n\n\naba\r\r\r"[..];
    let mut s = ByteString::from("caba");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "abacaba");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "aba");
    assert!(!s.read_token(&mut reader).expect("read"));
    assert!(s.is_empty());
}

#[test]
fn input_delimiter_is_left() {
    let mut reader = &b"aba\ncaba"[..];
    let mut s = ByteString::new();
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(reader, b"\ncaba");
}

#[test]
fn input_large() {
    let mut data = vec![b' '; 1_000_000];
    data.extend(std::iter::repeat(b'a').take(1_000_000));
    let mut reader = Cursor::new(data);
    let mut s = ByteString::from("caba");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s.len(), 1_000_000);
    assert!(s.iter().all(|b| *b == b'a'));
    assert!(!s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "");
}

#[test]
fn input_small_buffer() {
    // tokens and whitespace runs span many buffer refills
    let input = "   abacaba \n\t  aba    caba  ";
    let mut reader = BufReader::with_capacity(2, input.as_bytes());
    let words: Vec<ByteString> = tokens(&mut reader)
        .collect::<io::Result<_>>()
        .expect("read");
    assert_eq!(words, ["abacaba", "aba", "caba"]);
}

#[test]
fn input_empty() {
    let mut s = ByteString::from("caba");
    assert!(!s.read_token(&mut &b""[..]).expect("read"));
    assert!(s.is_empty());
    assert!(!s.read_token(&mut &b" \r\n\t"[..]).expect("read"));
    assert!(s.is_empty());
}

/// Yields the input one byte at a time, failing with `Interrupted` before
/// each read that succeeds.
struct Flaky<'a> {
    data: &'a [u8],
    interrupt: usize,
}

impl Read for Flaky<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt > 0 {
            self.interrupt -= 1;
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.interrupt = 1;
        match self.data.split_first() {
            Some((first, rest)) if !buf.is_empty() => {
                buf[0] = *first;
                self.data = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn input_interrupted() {
    let mut reader = BufReader::with_capacity(
        1,
        Flaky {
            data: b" ab c",
            interrupt: 1,
        },
    );
    let mut s = ByteString::new();
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "ab");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "c");
    assert!(!s.read_token(&mut reader).expect("read"));
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "broken"))
    }
}

#[test]
fn input_error() {
    let mut reader = BufReader::new(Broken);
    let mut s = ByteString::from("caba");
    let err = s.read_token(&mut reader).expect_err("read error");
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert_eq!(s, "caba");

    let mut iter = tokens(BufReader::new(Broken));
    assert!(matches!(iter.next(), Some(Err(_))));
}

/// Yields its data, then fails every read once the data runs out.
struct FailAfter<'a> {
    data: &'a [u8],
}

impl Read for FailAfter<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated"));
        }
        let count = self.data.len().min(buf.len());
        buf[..count].copy_from_slice(&self.data[..count]);
        self.data = &self.data[count..];
        Ok(count)
    }
}

#[rstest]
#[case::filled("previous")]
#[case::empty("")]
fn input_error_mid_token(#[case] initial: &str) {
    let mut reader = BufReader::with_capacity(2, FailAfter { data: b"  abc" });
    let mut s = ByteString::from(initial);
    s.reserve_exact(16);
    let capacity = s.capacity();
    let err = s.read_token(&mut reader).expect_err("read error");
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(s, initial);
    assert_eq!(s.capacity(), capacity);
    assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
}

#[test]
fn input_after_content() {
    let mut reader = BufReader::with_capacity(3, &b" abacaba caba"[..]);
    let mut s = ByteString::from("previous content");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "abacaba");
    assert_eq!(s.as_bytes_with_nul(), b"abacaba\0");
    assert!(s.read_token(&mut reader).expect("read"));
    assert_eq!(s, "caba");
}

#[test]
fn tokens_into_inner() {
    let mut iter = tokens(&b"aba caba"[..]);
    assert_eq!(iter.next().map(|r| r.expect("read")), Some(ByteString::from("aba")));
    assert_eq!(iter.into_inner().fill_buf().expect("fill"), b" caba");
}
