//! Per-context last-error cell

use parking_lot::Mutex;

/// Holds at most one diagnostic string, replaced by each new failure
///
/// Reads do not consume the message; it stays until a newer failure
/// overwrites it or `clear` is called.
#[derive(Debug, Default)]
pub struct ErrorSlot {
    slot: Mutex<Option<String>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is stored with `message`
    pub fn record(&self, message: impl Into<String>) {
        *self.slot.lock() = Some(message.into());
    }

    /// Current message, if any
    pub fn get(&self) -> Option<String> {
        self.slot.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().is_none()
    }

    pub fn clear(&self) {
        *self.slot.lock() = None;
    }

    /// Copy the message into `buf` as a NUL-terminated C string
    ///
    /// Returns `None`, leaving `buf` untouched, when nothing is stored or
    /// `buf` is empty. Otherwise copies at most `buf.len() - 1` bytes, cut
    /// back to a UTF-8 character boundary, writes the terminator, and
    /// returns the number of bytes copied (terminator excluded).
    pub fn copy_into(&self, buf: &mut [u8]) -> Option<usize> {
        if buf.is_empty() {
            return None;
        }
        let slot = self.slot.lock();
        let message = slot.as_deref()?;

        let copied = truncate_at_char_boundary(message, buf.len() - 1);
        let n = copied.len();
        buf[..n].copy_from_slice(copied.as_bytes());
        buf[n] = 0;
        Some(n)
    }
}

/// Longest prefix of `s` no longer than `max` bytes that ends on a char boundary
fn truncate_at_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
