use core::ascii;
use core::fmt::{self, Write};

use super::ByteString;

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("b\"")?;
        for byte in self.as_bytes() {
            fmt::Display::fmt(&ascii::escape_default(*byte), f)?;
        }
        f.write_char('"')
    }
}

impl fmt::Display for ByteString {
    /// Writes the content verbatim when it is valid UTF-8. Each invalid
    /// sequence is written as U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;
            if !chunk.invalid().is_empty() {
                f.write_char(char::REPLACEMENT_CHARACTER)?;
            }
        }
        Ok(())
    }
}

impl fmt::Write for ByteString {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_extend_from_slice(s.as_bytes())
            .map_err(|_| fmt::Error)
    }
}
