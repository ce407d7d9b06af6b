//! A heap-backed ring buffer of `Copy` items with explicit read and write cursors.
//!
//! [`RingBuffer`] moves data in bulk with [`write_from`](RingBuffer::write_from) and
//! [`read_into`](RingBuffer::read_into), splitting each copy in two when it crosses
//! the physical end of storage. One slot is always left unused, so a buffer with
//! `capacity` slots holds at most `capacity - 1` items and
//! `read_space() + write_space() == capacity - 1` at all times.
//!
//! In [`CursorMode::Manual`] the bulk transfers only copy, and the caller decides
//! when to publish data by moving the cursors itself.
//!
//! The buffer does no synchronisation of its own.
//!
//! # Examples
//! ```
//! use cyclic_buffer::RingBuffer;
//!
//! let mut buf = RingBuffer::new(8);
//! buf.write_from(&[1, 2, 3, 4, 5]).unwrap();
//! assert_eq!((buf.read_space(), buf.write_space()), (5, 2));
//!
//! let mut out = [0; 3];
//! buf.read_into(&mut out).unwrap();
//! assert_eq!(out, [1, 2, 3]);
//! assert_eq!(buf, [4, 5]);
//! ```

pub mod config;
pub mod error;
pub mod iter;
mod pos;

use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    ops::{Index, IndexMut, Range},
};

pub use self::{
    config::{Config, CursorMode, DEFAULT_CAPACITY},
    error::{AllocError, BufferEmptyError, BufferFullError, TransferError},
    iter::{Iter, IterMut},
};

use self::pos::{segments, Pos};

/// Ring buffer of `T` over an owned, resizable block of storage.
#[derive(Clone)]
pub struct RingBuffer<T> {
    // Invariant: `buf.len()` is the capacity and is at least 1
    buf: Vec<T>,
    pos: Pos,
    mode: CursorMode,
}

impl<T: Copy + Default> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Creates an empty ring buffer with `capacity` slots, advancing cursors automatically.
    ///
    /// # Panics
    /// Panics if `capacity` is 0 or the storage cannot be allocated.
    #[track_caller]
    pub fn new(capacity: usize) -> Self {
        Self::with_config(Config::new().capacity(capacity))
    }

    /// Creates an empty ring buffer with `capacity` slots.
    pub fn try_new(capacity: usize) -> Result<Self, AllocError> {
        Self::try_with_config(Config::new().capacity(capacity))
    }

    /// Creates an empty ring buffer from `config`.
    ///
    /// # Panics
    /// Panics if `config.capacity` is 0 or the storage cannot be allocated.
    #[track_caller]
    pub fn with_config(config: Config) -> Self {
        match Self::try_with_config(config) {
            Ok(buf) => buf,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates an empty ring buffer from `config`. Fresh slots hold `T::default()`.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::{AllocError, Config, RingBuffer};
    /// assert!(RingBuffer::<u8>::try_with_config(Config::new().capacity(4)).is_ok());
    /// assert_eq!(
    ///     RingBuffer::<u8>::try_with_config(Config::new().capacity(0)).unwrap_err(),
    ///     AllocError::ZeroCapacity,
    /// );
    /// ```
    pub fn try_with_config(config: Config) -> Result<Self, AllocError> {
        if config.capacity == 0 {
            tracing::error!("refusing to create a ring buffer with zero capacity");
            return Err(AllocError::ZeroCapacity);
        }

        let mut buf = Vec::new();
        if let Err(err) = buf.try_reserve_exact(config.capacity) {
            tracing::error!(capacity = config.capacity, "could not allocate ring buffer: {err}");
            return Err(err.into());
        }
        buf.resize(config.capacity, T::default());

        Ok(Self {
            buf,
            pos: Pos::zero(),
            mode: config.cursor_mode,
        })
    }

    /// Changes the number of slots to `new_capacity`.
    ///
    /// Items keep their physical offsets: slots below `min(old, new)` are
    /// preserved and new slots hold `T::default()`. Unread items are *not*
    /// repacked, so a buffer whose contents wrap around the old end of storage
    /// will read back garbage after a resize. Cursors beyond the new end are
    /// wrapped into range. Resize an empty buffer to avoid surprises.
    ///
    /// On error the buffer is left exactly as it was.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(4);
    /// buf.write_from(&[1, 2, 3]).unwrap();
    /// assert_eq!(buf.write_space(), 0);
    ///
    /// buf.resize(8).unwrap();
    /// assert_eq!(buf.write_space(), 4);
    /// buf.write_from(&[4, 5, 6, 7]).unwrap();
    /// assert_eq!(buf, [1, 2, 3, 4, 5, 6, 7]);
    /// ```
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity == 0 {
            tracing::error!("refusing to resize ring buffer to zero capacity");
            return Err(AllocError::ZeroCapacity);
        }

        let old_capacity = self.capacity();
        if !self.is_empty() {
            tracing::warn!(
                unread = self.read_space(),
                old_capacity,
                new_capacity,
                "resizing ring buffer with unread items, they will not be repacked"
            );
        }

        if new_capacity > old_capacity {
            if let Err(err) = self.buf.try_reserve_exact(new_capacity - old_capacity) {
                tracing::error!(old_capacity, new_capacity, "could not grow ring buffer: {err}");
                return Err(err.into());
            }
            self.buf.resize(new_capacity, T::default());
        } else {
            self.buf.truncate(new_capacity);
            self.buf.shrink_to_fit();
        }
        self.pos.rebase(new_capacity);

        tracing::trace!(old_capacity, new_capacity, "resized ring buffer");
        Ok(())
    }
}

impl<T: Copy> RingBuffer<T> {
    /// Returns the number of slots, including the one that is always kept free.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn cursor_mode(&self) -> CursorMode {
        self.mode
    }

    /// Index in storage of the next item to read.
    #[inline]
    pub fn read_pos(&self) -> usize {
        self.pos.read()
    }

    /// Index in storage of the next slot to write.
    #[inline]
    pub fn write_pos(&self) -> usize {
        self.pos.write()
    }

    /// Returns the number of unread items.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(8);
    /// assert_eq!(buf.read_space(), 0);
    /// buf.write_from(&[0; 7]).unwrap();
    /// assert_eq!(buf.read_space(), 7);
    /// ```
    #[inline]
    pub fn read_space(&self) -> usize {
        self.pos.read_space(self.capacity())
    }

    /// Returns the number of items that can be written before the buffer is full.
    ///
    /// Always `capacity() - 1 - read_space()`.
    #[inline]
    pub fn write_space(&self) -> usize {
        self.pos.write_space(self.capacity())
    }

    /// Returns `true` if there is nothing to read.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_space() == 0
    }

    /// Returns `true` if there is no room to write.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.write_space() == 0
    }

    /// Copies all of `src` into the buffer at the write cursor.
    ///
    /// In [`CursorMode::Auto`] the write cursor is then moved past the new items.
    /// In [`CursorMode::Manual`] it stays put until [`advance_write`](Self::advance_write).
    ///
    /// Fails without touching the buffer if `src` is longer than [`write_space`](Self::write_space).
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::{RingBuffer, TransferError};
    /// let mut buf = RingBuffer::new(4);
    /// assert_eq!(buf.write_from(&[1, 2]), Ok(()));
    /// assert_eq!(
    ///     buf.write_from(&[3, 4]),
    ///     Err(TransferError::WriteOverflow { requested: 2, available: 1 }),
    /// );
    /// assert_eq!(buf, [1, 2]);
    /// ```
    pub fn write_from(&mut self, src: &[T]) -> Result<(), TransferError> {
        let available = self.write_space();
        if src.len() > available {
            tracing::debug!(
                requested = src.len(),
                available,
                "ring buffer write rejected: not enough free slots"
            );
            return Err(TransferError::WriteOverflow {
                requested: src.len(),
                available,
            });
        }

        let cap = self.capacity();
        let (front, back) = segments(self.pos.write(), src.len(), cap);
        let (head, tail) = src.split_at(front.len());
        self.buf[front].copy_from_slice(head);
        self.buf[back].copy_from_slice(tail);

        if self.mode == CursorMode::Auto {
            self.pos.advance_write(src.len(), cap);
        }
        Ok(())
    }

    /// Fills `dst` with the next `dst.len()` unread items.
    ///
    /// In [`CursorMode::Auto`] the read cursor is then moved past them.
    /// In [`CursorMode::Manual`] it stays put until [`advance_read`](Self::advance_read).
    ///
    /// Fails without touching the buffer or `dst` if `dst` is longer than
    /// [`read_space`](Self::read_space).
    pub fn read_into(&mut self, dst: &mut [T]) -> Result<(), TransferError> {
        self.peek_into(dst)?;
        if self.mode == CursorMode::Auto {
            self.pos.advance_read(dst.len(), self.capacity());
        }
        Ok(())
    }

    /// Like [`read_into`](Self::read_into), but never moves the read cursor.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(4);
    /// buf.write_from(&[1, 2, 3]).unwrap();
    /// let mut out = [0; 2];
    /// buf.peek_into(&mut out).unwrap();
    /// assert_eq!(out, [1, 2]);
    /// assert_eq!(buf.read_space(), 3);
    /// ```
    pub fn peek_into(&self, dst: &mut [T]) -> Result<(), TransferError> {
        let available = self.read_space();
        if dst.len() > available {
            tracing::debug!(
                requested = dst.len(),
                available,
                "ring buffer read rejected: not enough unread items"
            );
            return Err(TransferError::ReadUnderflow {
                requested: dst.len(),
                available,
            });
        }

        let (front, back) = segments(self.pos.read(), dst.len(), self.capacity());
        let (head, tail) = dst.split_at_mut(front.len());
        head.copy_from_slice(&self.buf[front]);
        tail.copy_from_slice(&self.buf[back]);
        Ok(())
    }

    /// Tries to add an item at the write cursor, if the buffer [is not full](Self::is_full).
    ///
    /// The write cursor always advances, whatever the [`CursorMode`].
    #[inline]
    pub fn try_push_back(&mut self, item: T) -> Result<(), BufferFullError> {
        if self.is_full() {
            return Err(BufferFullError::new());
        }
        let cap = self.capacity();
        self.buf[self.pos.write()] = item;
        self.pos.advance_write(1, cap);
        Ok(())
    }

    /// Adds an item at the write cursor.
    ///
    /// # Panics
    /// Panics if the buffer [is full](Self::is_full).
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(3);
    /// buf.push_back(0);
    /// buf.push_back(1);
    /// assert_eq!(buf, [0, 1]);
    /// ```
    ///
    /// ```should_panic
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(3);
    /// buf.write_from(&[0, 1]).unwrap();
    /// buf.push_back(2);
    /// ```
    #[track_caller]
    #[inline]
    pub fn push_back(&mut self, item: T) {
        if let Err(err) = self.try_push_back(item) {
            panic!("{err}");
        }
    }

    /// Removes and returns the item at the read cursor, if there is one.
    ///
    /// The read cursor always advances, whatever the [`CursorMode`].
    #[inline]
    pub fn try_pop_front(&mut self) -> Result<T, BufferEmptyError> {
        if self.is_empty() {
            return Err(BufferEmptyError::new());
        }
        let item = self.buf[self.pos.read()];
        self.pos.advance_read(1, self.capacity());
        Ok(item)
    }

    /// Removes and returns the item at the read cursor.
    ///
    /// # Panics
    /// Panics if the buffer [is empty](Self::is_empty).
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(4);
    /// buf.write_from(&[7, 8]).unwrap();
    /// assert_eq!(buf.pop_front(), 7);
    /// assert_eq!(buf.pop_front(), 8);
    /// assert!(buf.try_pop_front().is_err());
    /// ```
    #[track_caller]
    #[inline]
    pub fn pop_front(&mut self) -> T {
        match self.try_pop_front() {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }

    /// Moves the write cursor by `delta` slots, wrapping in either direction.
    ///
    /// Used to publish items copied in with [`CursorMode::Manual`] or written
    /// through [`vacant_slices_mut`](Self::vacant_slices_mut). No checks are
    /// made against the read cursor.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::{Config, CursorMode, RingBuffer};
    /// let mut buf = RingBuffer::with_config(Config::new().capacity(8).cursor_mode(CursorMode::Manual));
    /// buf.write_from(&[1, 2, 3]).unwrap();
    /// assert!(buf.is_empty());
    /// buf.advance_write(3);
    /// assert_eq!(buf, [1, 2, 3]);
    /// ```
    pub fn advance_write(&mut self, delta: isize) {
        let cap = self.capacity();
        self.pos.shift_write(delta, cap);
    }

    /// Moves the read cursor by `delta` slots, wrapping in either direction.
    ///
    /// No checks are made against the write cursor.
    pub fn advance_read(&mut self, delta: isize) {
        let cap = self.capacity();
        self.pos.shift_read(delta, cap);
    }

    /// Returns a reference to the unread item `offset` places after the read
    /// cursor, or `None` if there are not that many unread items.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(4);
    /// buf.write_from(&[0, 1]).unwrap();
    /// assert_eq!(buf.get(0), Some(&0));
    /// assert_eq!(buf.get(1), Some(&1));
    /// assert_eq!(buf.get(2), None);
    /// ```
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.read_space() {
            return None;
        }
        Some(&self.buf[self.pos.logical_index(offset, self.capacity())])
    }

    /// Mutable version of [`get`](Self::get).
    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset >= self.read_space() {
            return None;
        }
        let index = self.pos.logical_index(offset, self.capacity());
        Some(&mut self.buf[index])
    }

    /// Forgets all unread items by moving both cursors to 0.
    ///
    /// Storage is neither freed nor overwritten.
    pub fn clear(&mut self) {
        tracing::trace!(discarded = self.read_space(), "clearing ring buffer");
        self.pos = Pos::zero();
    }

    /// Returns the unread items as two slices.
    ///
    /// The first runs from the read cursor towards the end of storage. The second
    /// holds whatever wrapped around to the start, and is empty otherwise.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(4);
    /// buf.write_from(&[0, 1, 2]).unwrap();
    /// assert_eq!(buf.readable_slices(), (&[0, 1, 2][..], &[][..]));
    /// buf.pop_front();
    /// buf.pop_front();
    /// buf.write_from(&[3, 4]).unwrap();
    /// assert_eq!(buf.readable_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    pub fn readable_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.pos.readable(self.capacity());
        (&self.buf[front], &self.buf[back])
    }

    /// Returns the free slots as two mutable slices, starting at the write cursor.
    ///
    /// Writing here does not publish anything. Follow up with
    /// [`advance_write`](Self::advance_write) for the number of slots filled.
    ///
    /// # Examples
    /// ```
    /// # use cyclic_buffer::RingBuffer;
    /// let mut buf = RingBuffer::new(4);
    /// let (front, back) = buf.vacant_slices_mut();
    /// assert_eq!((front.len(), back.len()), (3, 0));
    /// front[..2].copy_from_slice(&[5, 6]);
    /// buf.advance_write(2);
    /// assert_eq!(buf, [5, 6]);
    /// ```
    pub fn vacant_slices_mut(&mut self) -> (&mut [T], &mut [T]) {
        let (front, back) = self.pos.vacant(self.capacity());
        split_mut(&mut self.buf, front, back)
    }

    /// Returns an iterator over the unread items.
    pub fn iter(&self) -> Iter<'_, T> {
        let (front, back) = self.readable_slices();
        Iter::new(front, back)
    }

    /// Returns an iterator over mutable references to the unread items.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (front, back) = self.pos.readable(self.capacity());
        let (front, back) = split_mut(&mut self.buf, front, back);
        IterMut::new(front, back)
    }

    /// Copies the unread items into a `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }
}

/// Borrows two disjoint ranges of `buf` mutably.
///
/// `back` must end before `front` starts, which holds for every pair produced
/// by `pos::segments`.
fn split_mut<T>(buf: &mut [T], front: Range<usize>, back: Range<usize>) -> (&mut [T], &mut [T]) {
    debug_assert!(back.is_empty() || back.end <= front.start);
    let (low, high) = buf.split_at_mut(front.start);
    (&mut high[..front.len()], &mut low[back])
}

impl<T: Copy> Index<usize> for RingBuffer<T> {
    type Output = T;

    /// # Panics
    /// Panics if `offset >= self.read_space()`.
    #[track_caller]
    fn index(&self, offset: usize) -> &T {
        match self.get(offset) {
            Some(item) => item,
            None => panic!(
                "offset {offset} is out of range for {} unread items",
                self.read_space()
            ),
        }
    }
}

impl<T: Copy> IndexMut<usize> for RingBuffer<T> {
    #[track_caller]
    fn index_mut(&mut self, offset: usize) -> &mut T {
        let available = self.read_space();
        match self.get_mut(offset) {
            Some(item) => item,
            None => panic!("offset {offset} is out of range for {available} unread items"),
        }
    }
}

impl<T: Copy + PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Copy + Eq> Eq for RingBuffer<T> {}

impl<T: Copy + PartialOrd> PartialOrd for RingBuffer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Copy + Ord> Ord for RingBuffer<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Copy + Hash> Hash for RingBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iter().for_each(|item| item.hash(state))
    }
}

impl<T: Copy + PartialEq, B: AsRef<[T]> + ?Sized> PartialEq<B> for RingBuffer<T> {
    fn eq(&self, other: &B) -> bool {
        self.iter().eq(other.as_ref())
    }
}

impl<T: Copy + Debug> Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'buf, T: Copy> IntoIterator for &'buf RingBuffer<T> {
    type Item = &'buf T;
    type IntoIter = Iter<'buf, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'buf, T: Copy> IntoIterator for &'buf mut RingBuffer<T> {
    type Item = &'buf mut T;
    type IntoIter = IterMut<'buf, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
