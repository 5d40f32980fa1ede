//! Bounded output sink for command responses.

use crate::error::Error;

/// A fixed-capacity byte sink with a write cursor.
///
/// Every append is capacity-checked before it occurs; once the buffer cannot
/// hold a write in full, the write is refused with
/// [`Error::BufferOverflow`] rather than truncated silently. After a refused
/// write the contents beyond the cursor are undefined to the caller, which
/// must discard the buffer rather than treat partial content as valid.
///
/// # Examples
///
/// ```rust
/// use libacq::error::Error;
/// use libacq::shell::OutputBuffer;
///
/// let mut storage = [0u8; 8];
/// let mut out = OutputBuffer::new(&mut storage);
///
/// assert_eq!(out.append_str("dir/\r\n"), Ok(()));
/// assert_eq!(out.remaining(), 2);
/// assert_eq!(out.append_str("more"), Err(Error::BufferOverflow));
/// assert_eq!(out.as_str(), Some("dir/\r\n"));
/// ```
pub struct OutputBuffer<'a> {
    buffer: &'a mut [u8],
    cursor: usize,
}

impl core::fmt::Debug for OutputBuffer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("capacity", &self.buffer.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl<'a> OutputBuffer<'a> {
    /// Wrap a caller-provided buffer as an empty sink.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.cursor
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Capacity still available for appends.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Append raw bytes, refusing the whole write if it does not fit.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > self.remaining() {
            return Err(Error::BufferOverflow);
        }
        let end = self.cursor + bytes.len();
        self.buffer[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }

    /// Append a string, refusing the whole write if it does not fit.
    pub fn append_str(&mut self, text: &str) -> Result<(), Error> {
        self.append(text.as_bytes())
    }

    /// Written content so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.cursor]
    }

    /// Written content as a string, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    /// Reset the cursor, discarding written content.
    pub fn clear(&mut self) {
        self.cursor = 0;
    }
}
