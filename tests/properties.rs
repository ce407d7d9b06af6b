use std::collections::VecDeque;

use cyclic_buffer::{Config, CursorMode, RingBuffer, TransferError};
use proptest::{collection::vec, prelude::*};

#[derive(Debug, Clone)]
enum Op {
    Write(Vec<u8>),
    Read(usize),
    Push(u8),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        vec(any::<u8>(), 0..12).prop_map(Op::Write),
        (0usize..12).prop_map(Op::Read),
        any::<u8>().prop_map(Op::Push),
        Just(Op::Pop),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every operation agrees with a `VecDeque` holding the same items, and the
    /// two space counters always add up to one less than the capacity.
    #[test]
    fn prop_matches_queue_model(cap in 1usize..16, ops in vec(op(), 0..64)) {
        let mut buf = RingBuffer::<u8>::new(cap);
        let mut model = VecDeque::new();

        for op in ops {
            let free = cap - 1 - model.len();
            match op {
                Op::Write(items) => {
                    let res = buf.write_from(&items);
                    if items.len() <= free {
                        prop_assert_eq!(res, Ok(()));
                        model.extend(items);
                    } else {
                        prop_assert_eq!(
                            res,
                            Err(TransferError::WriteOverflow { requested: items.len(), available: free })
                        );
                    }
                }
                Op::Read(n) => {
                    let mut out = vec![0; n];
                    let res = buf.read_into(&mut out);
                    if n <= model.len() {
                        prop_assert_eq!(res, Ok(()));
                        let expected: Vec<u8> = model.drain(..n).collect();
                        prop_assert_eq!(out, expected);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Push(item) => {
                    let res = buf.try_push_back(item);
                    if free > 0 {
                        prop_assert!(res.is_ok());
                        model.push_back(item);
                    } else {
                        prop_assert!(res.is_err());
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(buf.try_pop_front().ok(), model.pop_front());
                }
            }

            prop_assert_eq!(buf.read_space() + buf.write_space(), cap - 1);
            prop_assert_eq!(buf.read_space(), model.len());
            prop_assert!(buf.read_pos() < cap);
            prop_assert!(buf.write_pos() < cap);
            prop_assert!(buf.iter().eq(model.iter()));
        }
    }

    /// A buffer that is empty at any cursor position can be resized and then
    /// filled to its new limit.
    #[test]
    fn prop_resize_empty_round_trip(cap in 1usize..32, new_cap in 1usize..64, offset in 0isize..64) {
        let mut buf = RingBuffer::<u16>::new(cap);
        buf.advance_read(offset);
        buf.advance_write(offset);
        prop_assert!(buf.is_empty());

        buf.resize(new_cap).unwrap();
        prop_assert!(buf.is_empty());
        prop_assert_eq!(buf.write_space(), new_cap - 1);

        let items: Vec<u16> = (0..new_cap as u16 - 1).collect();
        buf.write_from(&items).unwrap();
        prop_assert!(buf.is_full());

        let mut out = vec![0; items.len()];
        buf.read_into(&mut out).unwrap();
        prop_assert_eq!(out, items);
    }

    /// Copying with manual cursors and then moving them by hand ends up in the
    /// same place as automatic mode.
    #[test]
    fn prop_manual_mode_matches_auto(
        offset in 0isize..16,
        items in vec(any::<i32>(), 0..15),
        take in 0usize..15,
    ) {
        let config = Config::new().capacity(16);
        let mut auto = RingBuffer::<i32>::with_config(config);
        let mut manual = RingBuffer::<i32>::with_config(config.cursor_mode(CursorMode::Manual));
        for buf in [&mut auto, &mut manual] {
            buf.advance_read(offset);
            buf.advance_write(offset);
        }

        auto.write_from(&items).unwrap();
        manual.write_from(&items).unwrap();
        prop_assert!(manual.is_empty());
        manual.advance_write(items.len() as isize);
        prop_assert_eq!(&auto, &manual);

        let take = take.min(items.len());
        let (mut a, mut m) = (vec![0; take], vec![0; take]);
        auto.read_into(&mut a).unwrap();
        manual.read_into(&mut m).unwrap();
        manual.advance_read(take as isize);
        prop_assert_eq!(a, m);
        prop_assert_eq!(auto.read_pos(), manual.read_pos());
        prop_assert_eq!(auto.to_vec(), &items[take..]);
    }
}
