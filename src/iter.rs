use std::{iter::FusedIterator, slice};

macro_rules! iter {
    ($name:ident($inner:ident, {$( $mut_:tt )?})) => {
        /// Iterator over the unread items of a [`RingBuffer`](crate::RingBuffer),
        /// from the read cursor towards the write cursor.
        pub struct $name<'buf, T> {
            // items between the read cursor and the end of storage
            front: slice::$inner<'buf, T>,
            // items that wrapped around to the start of storage
            back: slice::$inner<'buf, T>,
        }

        impl<'buf, T> $name<'buf, T> {
            pub(crate) fn new(front: &'buf $($mut_)? [T], back: &'buf $($mut_)? [T]) -> Self {
                Self {
                    front: front.into_iter(),
                    back: back.into_iter(),
                }
            }
        }

        impl<'buf, T> Iterator for $name<'buf, T> {
            type Item = &'buf $($mut_)? T;

            #[inline]
            fn next(&mut self) -> Option<Self::Item> {
                self.front.next().or_else(|| self.back.next())
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                let len = self.len();
                (len, Some(len))
            }

            fn count(self) -> usize {
                self.len()
            }

            fn nth(&mut self, n: usize) -> Option<Self::Item> {
                let front_len = self.front.len();
                if n < front_len {
                    return self.front.nth(n);
                }
                // exhausts the front segment
                let _ = self.front.nth(front_len);
                self.back.nth(n - front_len)
            }

            fn last(mut self) -> Option<Self::Item> {
                self.next_back()
            }
        }

        impl<T> DoubleEndedIterator for $name<'_, T> {
            #[inline]
            fn next_back(&mut self) -> Option<Self::Item> {
                self.back.next_back().or_else(|| self.front.next_back())
            }

            fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
                let back_len = self.back.len();
                if n < back_len {
                    return self.back.nth_back(n);
                }
                let _ = self.back.nth_back(back_len);
                self.front.nth_back(n - back_len)
            }
        }

        impl<T> FusedIterator for $name<'_, T> {}

        impl<T> ExactSizeIterator for $name<'_, T> {
            fn len(&self) -> usize {
                self.front.len() + self.back.len()
            }
        }
    };
}

iter!(Iter(Iter, {/* no mut */}));
iter!(IterMut(IterMut, {mut}));

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::RingBuffer;

    /// Buffer of 6 slots holding `[2, 3, 4, 5, 6]` with the read cursor at 2,
    /// so the last two items sit at the start of storage.
    fn wrapped() -> RingBuffer<i32> {
        let mut buf = RingBuffer::new(6);
        buf.write_from(&[0, 1, 2, 3, 4]).unwrap();
        assert_eq!(buf.pop_front(), 0);
        assert_eq!(buf.pop_front(), 1);
        buf.write_from(&[5, 6]).unwrap();
        assert_eq!(buf.write_pos(), 1);
        buf
    }

    #[test]
    fn test_iter_nth() {
        // contiguous buffer

        let mut buf = RingBuffer::new(6);
        buf.write_from(&[0, 1, 2]).unwrap();
        let mut iter = buf.iter();

        assert_eq!(iter.len(), 3);
        assert!(iter.clone().eq(&[0, 1, 2]));

        assert_eq!(iter.nth(0), Some(&0));
        assert_eq!(iter.len(), 2);
        assert!(iter.clone().eq(&[1, 2]));

        assert_eq!(iter.nth(1), Some(&2));
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
        assert_eq!(buf.iter().nth(3), None);

        // wrapped buffer

        let buf = wrapped();
        let mut iter = buf.iter();

        assert_eq!(iter.len(), 5);
        assert!(iter.clone().eq(&[2, 3, 4, 5, 6]));

        assert_eq!(iter.nth(3), Some(&5));
        assert_eq!(iter.len(), 1);
        assert!(iter.clone().eq(&[6]));

        assert_eq!(iter.nth(0), Some(&6));
        assert!(iter.next().is_none());
        assert_eq!(buf.iter().nth(5), None);
    }

    #[test]
    fn test_iter_double_ended() {
        let buf = wrapped();

        assert!(buf.iter().rev().eq(&[6, 5, 4, 3, 2]));
        assert_eq!(buf.iter().last(), Some(&6));

        let mut iter = buf.iter();

        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.len(), 4);
        assert!(iter.clone().eq(&[2, 3, 4, 5]));

        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 2);
        assert!(iter.clone().eq(&[3, 4]));

        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&4));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());

        let mut iter = buf.iter();
        assert_eq!(iter.nth_back(2), Some(&4));
        assert!(iter.clone().eq(&[2, 3]));
        assert_eq!(buf.iter().nth_back(5), None);
    }

    #[test]
    fn test_iter_mut() {
        let mut buf = wrapped();

        buf.iter_mut()
            .zip(&[1, 2, 3, 4, 5])
            .for_each(|(a, b)| *a *= b);

        assert!(buf.iter().eq(&[2, 6, 12, 20, 30]));
        assert_eq!(buf.iter_mut().count(), 5);
    }
}
