use std::ops::Range;

/// Read and write cursors of a ring buffer.
///
/// All arithmetic is done modulo a capacity that is passed in by the owner,
/// since the capacity can change on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pos {
    // Invariant: `read` < `cap`
    read: usize,
    // Invariant: `write` < `cap`
    write: usize,
}

impl Pos {
    pub const fn zero() -> Self {
        Self { read: 0, write: 0 }
    }

    #[inline(always)]
    pub const fn read(&self) -> usize {
        self.read
    }

    #[inline(always)]
    pub const fn write(&self) -> usize {
        self.write
    }

    /// Number of unread items.
    #[inline]
    pub const fn read_space(&self, cap: usize) -> usize {
        if self.write >= self.read {
            self.write - self.read
        } else {
            cap + self.write - self.read
        }
    }

    /// Number of free slots. One slot is always held back so that a full
    /// buffer can be told apart from an empty one.
    #[inline]
    pub const fn write_space(&self, cap: usize) -> usize {
        cap - 1 - self.read_space(cap)
    }

    /// Returns the index in storage of the item `offset` places after the read cursor.
    ///
    /// # Panics
    /// Panics if `cap == 0`.
    #[inline(always)]
    #[track_caller]
    pub const fn logical_index(&self, offset: usize, cap: usize) -> usize {
        // reduce `offset` first so the sum cannot overflow
        (self.read + offset % cap) % cap
    }

    pub fn advance_read(&mut self, n: usize, cap: usize) {
        self.read = self.logical_index(n, cap);
    }

    pub fn advance_write(&mut self, n: usize, cap: usize) {
        self.write = (self.write + n % cap) % cap;
    }

    /// Moves the read cursor by a signed amount.
    pub fn shift_read(&mut self, delta: isize, cap: usize) {
        self.read = wrap(self.read, delta, cap);
    }

    /// Moves the write cursor by a signed amount.
    pub fn shift_write(&mut self, delta: isize, cap: usize) {
        self.write = wrap(self.write, delta, cap);
    }

    /// Brings both cursors back into `0..cap` after the capacity changed.
    pub fn rebase(&mut self, cap: usize) {
        self.read %= cap;
        self.write %= cap;
    }

    /// Unread region as up to two physical ranges: the first runs from the
    /// read cursor towards the end of storage, the second starts at 0.
    pub fn readable(&self, cap: usize) -> (Range<usize>, Range<usize>) {
        segments(self.read, self.read_space(cap), cap)
    }

    /// Free region as up to two physical ranges, starting at the write cursor.
    pub fn vacant(&self, cap: usize) -> (Range<usize>, Range<usize>) {
        segments(self.write, self.write_space(cap), cap)
    }
}

/// Moves `at` by `delta` places, wrapping modulo `cap` in both directions.
#[inline]
fn wrap(at: usize, delta: isize, cap: usize) -> usize {
    debug_assert!(cap > 0);
    let step = if delta >= 0 {
        delta.unsigned_abs() % cap
    } else {
        cap - delta.unsigned_abs() % cap
    };
    (at + step) % cap
}

/// Splits `len` items starting at `at` into the part that fits before the
/// end of storage and the part that continues from offset 0.
#[inline]
pub(crate) fn segments(at: usize, len: usize, cap: usize) -> (Range<usize>, Range<usize>) {
    debug_assert!(at < cap && len < cap);
    let front_len = len.min(cap - at);
    (at..at + front_len, 0..len - front_len)
}
