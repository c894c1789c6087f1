//! Stream input and output.

use std::io::{self, BufRead, Write};

use crate::error::StorageError;

use super::ByteString;

/// Whitespace bytes as classified by the C locale.
#[inline]
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

#[inline]
fn storage_error(err: StorageError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

impl ByteString {
    /// Write the content to `writer` verbatim, without a terminator.
    #[inline]
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }

    /// Replace the content with the next whitespace-delimited token read
    /// from `reader`.
    ///
    /// Leading whitespace is skipped, then bytes are consumed up to the next
    /// whitespace byte (which is left in the reader) or the end of input.
    /// Returns `Ok(false)`, leaving the string empty, when the input held no
    /// token. On error the string keeps its previous content, although bytes
    /// already consumed from the reader are not restored.
    ///
    /// # Examples
    ///
    /// ```
    /// use flex_string::ByteString;
    ///
    /// let mut input: &[u8] = b" \t \nabacaba\naba";
    /// let mut s = ByteString::new();
    /// assert!(s.read_token(&mut input).unwrap());
    /// assert_eq!(s, "abacaba");
    /// assert!(s.read_token(&mut input).unwrap());
    /// assert_eq!(s, "aba");
    /// assert!(!s.read_token(&mut input).unwrap());
    /// assert!(s.is_empty());
    /// ```
    pub fn read_token<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> io::Result<bool> {
        // the token is staged after the current content
        let start = self.len();
        match self.append_token(reader) {
            Ok(true) => {
                let len = self.len();
                self.as_mut_bytes().copy_within(start..len, 0);
                self.truncate(len - start);
                Ok(true)
            }
            Ok(false) => {
                self.clear();
                Ok(false)
            }
            Err(err) => {
                self.truncate(start);
                Err(err)
            }
        }
    }

    /// Skip leading whitespace in `reader` and append the following token.
    fn append_token<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> io::Result<bool> {
        loop {
            let (skip, found) = {
                let available = match reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err),
                };
                if available.is_empty() {
                    return Ok(false);
                }
                match available.iter().position(|b| !is_space(*b)) {
                    Some(pos) => (pos, true),
                    None => (available.len(), false),
                }
            };
            reader.consume(skip);
            if found {
                break;
            }
        }
        loop {
            let (used, done) = {
                let available = match reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(err),
                };
                if available.is_empty() {
                    break;
                }
                match available.iter().position(|b| is_space(*b)) {
                    Some(pos) => {
                        self.try_extend_from_slice(&available[..pos])
                            .map_err(storage_error)?;
                        (pos, true)
                    }
                    None => {
                        self.try_extend_from_slice(available)
                            .map_err(storage_error)?;
                        (available.len(), false)
                    }
                }
            };
            reader.consume(used);
            if done {
                break;
            }
        }
        Ok(true)
    }
}

impl io::Write for ByteString {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.try_extend_from_slice(buf).map_err(storage_error)?;
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Iterate over the whitespace-delimited tokens of `reader`.
///
/// ```
/// use flex_string::string::tokens;
///
/// let words: Vec<_> = tokens(&b"one two\n three"[..])
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(words, ["one", "two", "three"]);
/// ```
pub fn tokens<R: BufRead>(reader: R) -> Tokens<R> {
    Tokens { reader }
}

/// An iterator over the whitespace-delimited tokens of a reader.
#[derive(Debug)]
pub struct Tokens<R> {
    reader: R,
}

impl<R> Tokens<R> {
    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<ByteString>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token = ByteString::new();
        match token.read_token(&mut self.reader) {
            Ok(true) => Some(Ok(token)),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::is_space;

    #[test]
    fn c_whitespace() {
        for byte in [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'] {
            assert!(is_space(byte));
        }
        for byte in [b'a', b'0', 0, 0x7f, 0xa0] {
            assert!(!is_space(byte));
        }
    }
}
